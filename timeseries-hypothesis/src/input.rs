//! Reading measurements from semicolon-delimited tables.
//!
//! The expected layout is a header row followed by `timestamp;value;label`
//! rows, with timestamps formatted as `YYYY-MM-DD HH:MM:SS`. Fields may be
//! wrapped in double quotes, in which case they can contain the delimiter,
//! line breaks, or a doubled `""` for a literal quote.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use thiserror::Error;
use timeseries_hypothesis_core::{Measurement, TIMESTAMP_FORMAT};

const DELIMITER: char = ';';
const QUOTE: char = '"';

/// Errors that can occur while reading an input table.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input is empty: expected a header row")]
    MissingHeader,

    #[error("Line {line}: quoted field is never closed")]
    UnterminatedQuote { line: usize },

    #[error("Line {line}: expected 3 fields (timestamp;value;label), found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("Line {line}: invalid timestamp {value:?}: {source}")]
    Timestamp {
        line: usize,
        value: String,
        source: chrono::ParseError,
    },

    #[error("Line {line}: invalid value {value:?}: {source}")]
    Value {
        line: usize,
        value: String,
        source: std::num::ParseFloatError,
    },

    #[error("Line {line}: value {value:?} is not a finite number")]
    NonFinite { line: usize, value: String },
}

/// One table row and the line it starts on.
#[derive(Debug)]
struct Record {
    line: usize,
    fields: Vec<String>,
}

/// Read all measurements from the file at `path`.
pub fn read_measurements(path: &Path) -> Result<Vec<Measurement>, InputError> {
    let file = std::fs::File::open(path)?;
    parse_measurements(file)
}

/// Parse measurements from any reader. The first row is treated as a header.
pub fn parse_measurements(mut reader: impl Read) -> Result<Vec<Measurement>, InputError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let mut records = split_records(&text)?.into_iter();
    if records.next().is_none() {
        return Err(InputError::MissingHeader);
    }

    records.map(|record| parse_row(&record)).collect()
}

/// Split `text` into records, honouring quoted fields. Blank lines are dropped.
fn split_records(text: &str) -> Result<Vec<Record>, InputError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                QUOTE if chars.peek() == Some(&QUOTE) => {
                    chars.next();
                    field.push(QUOTE);
                }
                QUOTE => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            QUOTE if !quoted && field.trim().is_empty() => {
                field.clear();
                quoted = true;
                in_quotes = true;
            }
            DELIMITER => {
                fields.push(std::mem::take(&mut field));
                quoted = false;
            }
            '\r' if matches!(chars.peek(), Some(&'\n') | None) => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut fields), quoted, record_line);
                quoted = false;
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(InputError::UnterminatedQuote { line: record_line });
    }
    if quoted || !fields.is_empty() || !field.is_empty() {
        fields.push(field);
        push_record(&mut records, fields, quoted, record_line);
    }

    Ok(records)
}

fn push_record(records: &mut Vec<Record>, fields: Vec<String>, quoted: bool, line: usize) {
    let blank = !quoted && fields.len() == 1 && fields[0].trim().is_empty();
    if !blank {
        records.push(Record { line, fields });
    }
}

fn parse_row(record: &Record) -> Result<Measurement, InputError> {
    let line = record.line;
    let [raw_timestamp, raw_value, label] = record.fields.as_slice() else {
        return Err(InputError::FieldCount {
            line,
            found: record.fields.len(),
        });
    };

    let raw_timestamp = raw_timestamp.trim();
    let timestamp = NaiveDateTime::parse_from_str(raw_timestamp, TIMESTAMP_FORMAT).map_err(
        |source| InputError::Timestamp {
            line,
            value: raw_timestamp.to_string(),
            source,
        },
    )?;

    let raw_value = raw_value.trim();
    let value = raw_value.parse::<f64>().map_err(|source| InputError::Value {
        line,
        value: raw_value.to_string(),
        source,
    })?;
    if !value.is_finite() {
        return Err(InputError::NonFinite {
            line,
            value: raw_value.to_string(),
        });
    }

    Ok(Measurement::new(timestamp, value, label.as_str()))
}
