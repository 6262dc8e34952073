//! How grid cells are shown and which input edits them.

use crate::model::CellValue;
use chrono::{DateTime, Local, NaiveDateTime};

const YES: &str = "כן";
const NO: &str = "לא";
const DATE_TIME_FORMAT: &str = "%-d.%-m.%Y, %H:%M:%S";

/// The widget a cell is edited with.
#[derive(Debug, Clone, PartialEq)]
pub enum CellEditor {
    /// Store-managed column, shown as display text.
    ReadOnly(String),
    /// Column whose loaded value is a boolean.
    Checkbox(bool),
    /// Free text input holding the value's plain text.
    Text(String),
}

/// Display text of a value in `column`. Read path only, never written back.
///
/// Timestamps in columns whose name mentions `date` are shown as local date and
/// time; a value that does not parse is shown as it is.
pub fn display_value(column: &str, value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        CellValue::Bool(true) => YES.to_string(),
        CellValue::Bool(false) => NO.to_string(),
        CellValue::Json(v) => v.to_string(),
        CellValue::String(s) if column.contains("date") && s.contains('T') => {
            format_date_time(s).unwrap_or_else(|| s.clone())
        }
        other => other.to_plain_text(),
    }
}

fn format_date_time(value: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).format(DATE_TIME_FORMAT).to_string());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.format(DATE_TIME_FORMAT).to_string())
}
