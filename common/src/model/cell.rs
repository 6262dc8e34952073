//! The value held by a single grid cell.
//!
//! Rows coming back from the store have no fixed schema, so every cell is one of a
//! small set of variants. Render and edit code matches on [`CellValue`] instead of
//! sniffing types at runtime. On the wire a cell is plain JSON: `null`, a boolean,
//! a number, a string, or (for arrays and objects) the nested document itself.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Nested array or object.
    Json(Value),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Text form of the value as typed into an input or written into a CSV field.
    ///
    /// `Null` becomes the empty string, nested documents become compact JSON and
    /// whole floats drop their fractional part (`30.0` -> `"30"`).
    pub fn to_plain_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => number_text(n),
            CellValue::String(s) => s.clone(),
            CellValue::Json(v) => v.to_string(),
        }
    }

    /// Converts text typed into a grid input back into a value, keeping the type of
    /// the value the cell originally held when the text parses as that type.
    ///
    /// Cleared number and JSON cells become `Null`. Text that does not parse is kept
    /// as a string and left for the store to accept or reject.
    pub fn coerce_text(original: &CellValue, text: String) -> CellValue {
        match original {
            CellValue::Number(_) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    CellValue::Null
                } else if let Ok(i) = trimmed.parse::<i64>() {
                    CellValue::Number(i.into())
                } else if let Some(n) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
                    CellValue::Number(n)
                } else {
                    CellValue::String(text)
                }
            }
            CellValue::Bool(_) => match text.trim() {
                "true" => CellValue::Bool(true),
                "false" => CellValue::Bool(false),
                _ => CellValue::String(text),
            },
            CellValue::Json(_) => {
                if text.trim().is_empty() {
                    CellValue::Null
                } else {
                    match serde_json::from_str::<Value>(&text) {
                        Ok(value) => CellValue::from(value),
                        Err(_) => CellValue::String(text),
                    }
                }
            }
            CellValue::Null | CellValue::String(_) => CellValue::String(text),
        }
    }
}

fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        n.to_string()
    } else {
        // f64's Display prints 30.0 as "30", unlike serde_json's.
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => CellValue::Number(n),
            Value::String(s) => CellValue::String(s),
            nested @ (Value::Array(_) | Value::Object(_)) => CellValue::Json(nested),
        }
    }
}

impl From<CellValue> for Value {
    fn from(cell: CellValue) -> Self {
        match cell {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(b),
            CellValue::Number(n) => Value::Number(n),
            CellValue::String(s) => Value::String(s),
            CellValue::Json(v) => v,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Number(i.into())
    }
}

impl From<f64> for CellValue {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(CellValue::Null, CellValue::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_values_map_onto_variants() {
        assert_eq!(CellValue::from(json!(null)), CellValue::Null);
        assert_eq!(CellValue::from(json!(true)), CellValue::Bool(true));
        assert_eq!(CellValue::from(json!(7)), CellValue::from(7));
        assert_eq!(CellValue::from(json!("x")), CellValue::from("x"));
        assert_eq!(CellValue::from(json!([1, 2])), CellValue::Json(json!([1, 2])));
        assert_eq!(
            CellValue::from(json!({"a": 1})),
            CellValue::Json(json!({"a": 1}))
        );
    }

    #[test]
    fn serializes_as_plain_json() {
        let cells = vec![
            CellValue::Null,
            CellValue::Bool(false),
            CellValue::from(2.5),
            CellValue::from("hi"),
            CellValue::Json(json!({"k": [1]})),
        ];
        let text = serde_json::to_string(&cells).unwrap();
        assert_eq!(text, r#"[null,false,2.5,"hi",{"k":[1]}]"#);

        let back: Vec<CellValue> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, cells);
    }

    #[test]
    fn plain_text_forms() {
        assert_eq!(CellValue::Null.to_plain_text(), "");
        assert_eq!(CellValue::Bool(true).to_plain_text(), "true");
        assert_eq!(CellValue::from(30.0).to_plain_text(), "30");
        assert_eq!(CellValue::from(2.5).to_plain_text(), "2.5");
        assert_eq!(CellValue::from(-4).to_plain_text(), "-4");
        assert_eq!(
            CellValue::Json(json!({"a": "b"})).to_plain_text(),
            r#"{"a":"b"}"#
        );
    }

    #[test]
    fn coerce_keeps_numbers_numeric() {
        let original = CellValue::from(30);
        assert_eq!(
            CellValue::coerce_text(&original, "31".into()),
            CellValue::from(31)
        );
        assert_eq!(
            CellValue::coerce_text(&original, " 1.5 ".into()),
            CellValue::from(1.5)
        );
        assert_eq!(CellValue::coerce_text(&original, "".into()), CellValue::Null);
        assert_eq!(
            CellValue::coerce_text(&original, "thirty".into()),
            CellValue::from("thirty")
        );
    }

    #[test]
    fn coerce_json_and_strings() {
        let json_cell = CellValue::Json(json!([1]));
        assert_eq!(
            CellValue::coerce_text(&json_cell, "[1,2]".into()),
            CellValue::Json(json!([1, 2]))
        );
        assert_eq!(
            CellValue::coerce_text(&json_cell, "[1,".into()),
            CellValue::from("[1,")
        );
        assert_eq!(
            CellValue::coerce_text(&CellValue::Null, "42".into()),
            CellValue::from("42")
        );
        assert_eq!(
            CellValue::coerce_text(&CellValue::from("a"), "".into()),
            CellValue::from("")
        );
    }
}
