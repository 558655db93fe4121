use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use crate::error::BuildError;

/// Header-keyed view of one CSV record. Columns missing from a short row
/// are simply absent from the map.
pub type RawRow = HashMap<String, String>;

pub const REQUIRED_CHOICE_COLUMNS: [&str; 5] =
    ["choice1", "choice2", "choice3", "choice4", "choice5"];

/// Reads all rows of one source CSV, enforcing the header contract first.
///
/// The header must carry every `choice1..choice5` column (empty values are
/// fine, absent columns are not). Lexically malformed CSV text surfaces as
/// a parse error naming the file.
pub fn read_question_rows(path: &Path, filename: &str) -> Result<Vec<RawRow>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| BuildError::Parse {
            file: filename.to_owned(),
            source,
        })?
        .clone();

    for column in REQUIRED_CHOICE_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(BuildError::Schema {
                file: filename.to_owned(),
                column: column.to_owned(),
            }
            .into());
        }
    }

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|source| BuildError::Parse {
            file: filename.to_owned(),
            source,
        })?;

        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_owned(), value.to_owned()))
            .collect();

        rows.push(row);
    }

    Ok(rows)
}

/// Checks the domain constraint on `answer` before the row is normalized.
/// Row index is 0-based over data rows; the reported line adds the header.
pub fn validate_answer(row: &RawRow, filename: &str, row_index: usize) -> Result<u8, BuildError> {
    let raw = row.get("answer").map(String::as_str).unwrap_or("").trim();

    let parsed = raw.parse::<i64>().ok().filter(|n| (1..=5).contains(n));

    match parsed {
        Some(answer) => Ok(answer as u8),
        None => Err(BuildError::Validation {
            file: filename.to_owned(),
            line: row_index + 2,
            message: format!("answer must be an integer in 1..=5, got '{raw}'"),
        }),
    }
}
