//! Cell decoding and column typing.

use serde_json::{Number, Value};

/// Decode ISO-8859-1 bytes. Every byte maps to the code point of the same value.
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// The single type shared by every value of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    /// Narrowest kind that fits every non-empty cell of a column, the way a
    /// dataframe reader picks a column type. One cell that is not a number
    /// makes the whole column text.
    pub(crate) fn infer<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut kind = ColumnKind::Integer;
        for cell in cells {
            if kind == ColumnKind::Integer && cell.parse::<i64>().is_ok() {
                continue;
            }
            if finite_float(cell).is_some() {
                kind = ColumnKind::Float;
                continue;
            }
            return ColumnKind::Text;
        }
        kind
    }

    /// Convert a cell of a column of this kind.
    pub(crate) fn value(self, cell: &str) -> Value {
        let number = match self {
            ColumnKind::Integer => cell.parse::<i64>().ok().map(Number::from),
            ColumnKind::Float => finite_float(cell),
            ColumnKind::Text => None,
        };
        number
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(cell.to_string()))
    }
}

fn finite_float(cell: &str) -> Option<Number> {
    cell.parse::<f64>().ok().and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode_latin1(b"caf\xe9"), "café");
        assert_eq!(decode_latin1(b"\xc3\xa9"), "Ã©");
    }

    #[test]
    fn test_infer_column_kind() {
        assert_eq!(ColumnKind::infer(["42", "-3"]), ColumnKind::Integer);
        assert_eq!(ColumnKind::infer(["42", "2.5"]), ColumnKind::Float);
        assert_eq!(ColumnKind::infer(["2.5", "7"]), ColumnKind::Float);
        assert_eq!(ColumnKind::infer(["12", "AB", "7"]), ColumnKind::Text);
        assert_eq!(ColumnKind::infer(["1.5", "NaN"]), ColumnKind::Text);
        assert_eq!(ColumnKind::infer(["15%"]), ColumnKind::Text);
        assert_eq!(ColumnKind::infer(["10/25/2016"]), ColumnKind::Text);
    }

    #[test]
    fn test_value_follows_column_kind() {
        assert_eq!(ColumnKind::Integer.value("42"), json!(42));
        assert_eq!(ColumnKind::Float.value("7"), json!(7.0));
        assert_eq!(ColumnKind::Float.value("2.5"), json!(2.5));
        assert_eq!(ColumnKind::Text.value("12"), json!("12"));
        assert_eq!(ColumnKind::Text.value("E02003"), json!("E02003"));
    }
}
