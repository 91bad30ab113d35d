//! Solr response decoding.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::errors::SearchError;
use employee_index_shared::{EmployeeRecord, FacetCounts, SearchResponse};

#[derive(Debug, Deserialize)]
pub(crate) struct SelectBody {
    response: ResultBody,
    #[serde(default)]
    facet_counts: Option<FacetCountsBody>,
}

#[derive(Debug, Deserialize)]
struct ResultBody {
    #[serde(rename = "numFound")]
    num_found: u64,
    #[serde(default)]
    docs: Vec<EmployeeRecord>,
}

#[derive(Debug, Deserialize)]
struct FacetCountsBody {
    #[serde(default)]
    facet_fields: BTreeMap<String, Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateBody {
    #[serde(rename = "responseHeader")]
    response_header: ResponseHeader,
}

#[derive(Debug, Deserialize)]
struct ResponseHeader {
    status: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PingBody {
    #[serde(default)]
    status: Option<String>,
}

impl SelectBody {
    pub(crate) fn into_search_response(self) -> Result<SearchResponse, SearchError> {
        let mut facets = BTreeMap::new();
        if let Some(counts) = self.facet_counts {
            for (field, flat) in counts.facet_fields {
                facets.insert(field, parse_facet_list(&flat)?);
            }
        }

        Ok(SearchResponse {
            num_found: self.response.num_found,
            docs: self.response.docs,
            facets,
        })
    }
}

impl UpdateBody {
    /// Solr reports update failures with a non-zero header status.
    pub(crate) fn status(&self) -> i64 {
        self.response_header.status
    }
}

impl PingBody {
    pub(crate) fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("OK")
    }
}

/// Decode Solr's flat facet list `[value, count, value, count, ...]`.
pub(crate) fn parse_facet_list(flat: &[Value]) -> Result<FacetCounts, SearchError> {
    if flat.len() % 2 != 0 {
        return Err(SearchError::parse(format!(
            "facet list has odd length {}",
            flat.len()
        )));
    }

    let mut counts = FacetCounts::new();
    for pair in flat.chunks_exact(2) {
        let value = match &pair[0] {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => {
                return Err(SearchError::parse(format!(
                    "unexpected facet value: {}",
                    other
                )))
            }
        };
        let count = pair[1].as_u64().ok_or_else(|| {
            SearchError::parse(format!("unexpected facet count: {}", pair[1]))
        })?;
        counts.add(value, count);
    }

    Ok(counts)
}

/// Pull the human-readable message out of a Solr error body, if there is one.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("msg"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_select_with_facets() {
        let body = json!({
            "responseHeader": {"status": 0},
            "response": {
                "numFound": 3,
                "start": 0,
                "docs": [
                    {"id": "E1", "Department": ["IT"]},
                    {"id": "E2", "Department": ["IT"]},
                    {"id": "E3", "Department": ["Finance"]}
                ]
            },
            "facet_counts": {
                "facet_queries": {},
                "facet_fields": {"Department": ["IT", 2, "Finance", 1]}
            }
        });

        let parsed: SelectBody = serde_json::from_value(body).unwrap();
        let response = parsed.into_search_response().unwrap();

        assert_eq!(response.num_found, 3);
        assert_eq!(response.docs.len(), 3);
        let facet = response.facet("Department").unwrap();
        assert_eq!(facet.get("IT"), Some(2));
        assert_eq!(facet.get("Finance"), Some(1));
        assert_eq!(facet.total(), 3);
    }

    #[test]
    fn test_parse_select_without_facets() {
        let body = json!({"response": {"numFound": 0, "start": 0, "docs": []}});
        let parsed: SelectBody = serde_json::from_value(body).unwrap();
        let response = parsed.into_search_response().unwrap();

        assert_eq!(response.num_found, 0);
        assert!(response.facets.is_empty());
    }

    #[test]
    fn test_parse_facet_list_odd_length() {
        let result = parse_facet_list(&[json!("IT")]);
        assert!(matches!(result, Err(SearchError::ParseError(_))));
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error":{"msg":"undefined field Foo","code":400}}"#;
        assert_eq!(error_message(body), "undefined field Foo");
        assert_eq!(error_message("plain text"), "plain text");
    }
}
