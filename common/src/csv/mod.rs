//! CSV codec used by the importer and exporter.
//!
//! The dialect is comma delimited with RFC4180-style quoting: a field containing a
//! comma, a double quote or a newline is wrapped in double quotes and its inner
//! quotes are doubled. Records are separated by `\n`; a trailing `\r` on a record is
//! dropped when reading so files saved on Windows import cleanly.

use crate::model::{CellValue, Row};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    #[error("unterminated quoted field in record starting at line {line}")]
    UnterminatedQuote { line: usize },

    #[error("the CSV header line is empty")]
    MissingHeader,
}

/// Splits one record into its fields.
///
/// Single pass over the characters with a field accumulator and a quoting flag.
/// A `"` immediately followed by another `"` emits one literal quote and consumes
/// both; any other `"` toggles quoting. A `,` outside quotes closes the current
/// field. The last field is always emitted, so an empty line yields one empty
/// field.
pub fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Renders one value as a CSV field.
pub fn format_csv_value(value: &CellValue) -> String {
    let text = value.to_plain_text();
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text
    }
}

/// Serializes rows as CSV text.
///
/// The header is the key list of the first row, joined unescaped. Every row is
/// written in header order; a key the row lacks is written as an empty field.
/// No rows produce an empty document.
pub fn rows_to_csv(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));
    for row in rows {
        let fields: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(format_csv_value).unwrap_or_default())
            .collect();
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

/// Splits CSV text into records on `\n`, ignoring newlines inside quoted fields.
///
/// Each record is returned with the 1-based line it starts on and without its
/// trailing `\r`.
pub fn split_records(text: &str) -> Result<Vec<(usize, &str)>, CsvError> {
    let mut records = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    let mut line = 1;
    let mut record_line = 1;

    for (idx, ch) in text.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '\n' => {
                if !in_quotes {
                    records.push((record_line, trim_cr(&text[start..idx])));
                    start = idx + 1;
                    record_line = line + 1;
                }
                line += 1;
            }
            _ => {}
        }
    }

    if in_quotes {
        return Err(CsvError::UnterminatedQuote { line: record_line });
    }
    records.push((record_line, trim_cr(&text[start..])));
    Ok(records)
}

fn trim_cr(record: &str) -> &str {
    record.strip_suffix('\r').unwrap_or(record)
}

/// Header names and data rows read from a CSV document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// Parses a whole CSV document into rows keyed by the header names.
///
/// The header is parsed with [`parse_csv_row`] like any other record. Blank
/// records are skipped. Values are zipped positionally against the headers: an
/// empty field becomes `Null`, extra fields are ignored and missing trailing
/// fields leave their key out of the row. One leading byte order mark is
/// dropped.
pub fn parse_csv(text: &str) -> Result<ParsedCsv, CsvError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let records = split_records(text)?;
    if records.iter().all(|(_, r)| r.trim().is_empty()) {
        return Ok(ParsedCsv::default());
    }
    let (_, header) = records[0];
    if header.trim().is_empty() {
        return Err(CsvError::MissingHeader);
    }
    let headers = parse_csv_row(header);

    let rows = records[1..]
        .iter()
        .filter(|(_, record)| !record.trim().is_empty())
        .map(|(_, record)| {
            let values = parse_csv_row(record);
            headers
                .iter()
                .zip(values)
                .map(|(header, value)| {
                    let cell = if value.is_empty() {
                        CellValue::Null
                    } else {
                        CellValue::String(value)
                    };
                    (header.clone(), cell)
                })
                .collect::<Row>()
        })
        .collect();

    Ok(ParsedCsv { headers, rows })
}
