//! Conversions between SQLite values and [`CellValue`]s.

use common::model::CellValue;
use common::store::StoreError;
use rusqlite::types::{Value, ValueRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Boolean,
    Json,
    Plain,
}

impl ColumnKind {
    /// Kind of a column from its declared type in `PRAGMA table_info`.
    pub(crate) fn from_decl(decl: &str) -> Self {
        let decl = decl.to_ascii_uppercase();
        if decl.contains("BOOL") {
            ColumnKind::Boolean
        } else if decl.contains("JSON") {
            ColumnKind::Json
        } else {
            ColumnKind::Plain
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

pub(crate) fn read_cell(kind: ColumnKind, value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(n) if kind == ColumnKind::Boolean => CellValue::Bool(n != 0),
        ValueRef::Integer(n) => CellValue::from(n),
        ValueRef::Real(f) => CellValue::from(f),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            if kind == ColumnKind::Json {
                match serde_json::from_str::<serde_json::Value>(&text) {
                    Ok(json) => CellValue::from(json),
                    Err(_) => CellValue::String(text),
                }
            } else {
                CellValue::String(text)
            }
        }
        ValueRef::Blob(bytes) => CellValue::String(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// SQLite value stored for `value` in `column`. Strings written to a boolean
/// column must spell a boolean; other strings are left to column affinity.
pub(crate) fn write_cell(column: &Column, value: &CellValue) -> Result<Value, StoreError> {
    Ok(match value {
        CellValue::Null => Value::Null,
        CellValue::Bool(b) => Value::Integer(i64::from(*b)),
        CellValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n.as_f64().map_or(Value::Null, Value::Real),
        },
        CellValue::Json(json) => Value::Text(json.to_string()),
        CellValue::String(s) if column.kind == ColumnKind::Boolean => parse_bool(&column.name, s)?,
        CellValue::String(s) => Value::Text(s.clone()),
    })
}

fn parse_bool(column: &str, text: &str) -> Result<Value, StoreError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(Value::Integer(1)),
        "false" | "0" => Ok(Value::Integer(0)),
        other => Err(StoreError::InvalidValue {
            column: column.to_string(),
            message: format!("'{other}' is not a boolean (expected true, false, 1 or 0)"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn column(kind: ColumnKind) -> Column {
        Column {
            name: "flag".into(),
            kind,
        }
    }

    #[test]
    fn kinds_from_declared_types() {
        assert_eq!(ColumnKind::from_decl("BOOLEAN"), ColumnKind::Boolean);
        assert_eq!(ColumnKind::from_decl("bool"), ColumnKind::Boolean);
        assert_eq!(ColumnKind::from_decl("JSON"), ColumnKind::Json);
        assert_eq!(ColumnKind::from_decl("TEXT"), ColumnKind::Plain);
        assert_eq!(ColumnKind::from_decl(""), ColumnKind::Plain);
    }

    #[test]
    fn reads_by_column_kind() {
        assert_eq!(read_cell(ColumnKind::Boolean, ValueRef::Integer(1)), CellValue::Bool(true));
        assert_eq!(read_cell(ColumnKind::Plain, ValueRef::Integer(1)), CellValue::from(1));
        assert_eq!(
            read_cell(ColumnKind::Json, ValueRef::Text(br#"{"a":[1]}"#)),
            CellValue::Json(json!({"a": [1]}))
        );
        assert_eq!(
            read_cell(ColumnKind::Json, ValueRef::Text(b"not json")),
            CellValue::from("not json")
        );
        assert_eq!(read_cell(ColumnKind::Plain, ValueRef::Null), CellValue::Null);
    }

    #[test]
    fn boolean_strings_must_spell_a_boolean() {
        let flag = column(ColumnKind::Boolean);
        assert_eq!(write_cell(&flag, &"TRUE".into()).unwrap(), Value::Integer(1));
        assert_eq!(write_cell(&flag, &"0".into()).unwrap(), Value::Integer(0));
        assert!(matches!(
            write_cell(&flag, &"maybe".into()),
            Err(StoreError::InvalidValue { .. })
        ));
        assert_eq!(write_cell(&flag, &CellValue::Bool(true)).unwrap(), Value::Integer(1));
    }

    #[test]
    fn writes_plain_values() {
        let plain = column(ColumnKind::Plain);
        assert_eq!(write_cell(&plain, &CellValue::from(7)).unwrap(), Value::Integer(7));
        assert_eq!(write_cell(&plain, &CellValue::from(2.5)).unwrap(), Value::Real(2.5));
        assert_eq!(
            write_cell(&plain, &CellValue::Json(json!([1, 2]))).unwrap(),
            Value::Text("[1,2]".into())
        );
        assert_eq!(write_cell(&plain, &"maybe".into()).unwrap(), Value::Text("maybe".into()));
    }
}
