//! Employee record type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One employee, as a mapping from field name to value.
///
/// Values are strings or numbers. The record is materialized from one CSV row
/// for a single index operation and serialized as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeRecord(Map<String, Value>);

impl EmployeeRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the previous value if any.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Field value rendered as text.
    ///
    /// Strings are returned as-is, numbers and booleans in their JSON form.
    /// Single-element arrays (Solr returns multi-valued fields this way) are
    /// unwrapped.
    pub fn get_text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::Array(values) if values.len() == 1 => value_text(&values[0]),
            value => value_text(value),
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Field names in key order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for EmployeeRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_text() {
        let record = EmployeeRecord::new()
            .with_field("EEID", "E02003")
            .with_field("Age", 55)
            .with_field("Department", json!(["IT"]));

        assert_eq!(record.get_text("EEID"), Some("E02003".to_string()));
        assert_eq!(record.get_text("Age"), Some("55".to_string()));
        assert_eq!(record.get_text("Department"), Some("IT".to_string()));
        assert_eq!(record.get_text("Gender"), None);
    }

    #[test]
    fn test_serializes_flat() {
        let record = EmployeeRecord::new()
            .with_field("id", "E1")
            .with_field("Age", 30);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"id": "E1", "Age": 30}));

        let parsed: EmployeeRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_remove_field() {
        let mut record = EmployeeRecord::new()
            .with_field("Gender", "Male")
            .with_field("City", "Seattle");

        assert!(record.remove("Gender").is_some());
        assert!(!record.contains_field("Gender"));
        assert_eq!(record.fields().collect::<Vec<_>>(), vec!["City"]);
    }
}
