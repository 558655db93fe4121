use chrono::{DateTime, NaiveDate, Utc};

use crate::model::QuestionRecord;
use crate::util::utc_string;

/// `{era}{era_year}年 全{N}問`, with the era half dropped when the first
/// record carries no usable era. The first record stands in for the whole
/// group, so a group mixing era labels across subjects inherits whichever
/// sorts first.
pub fn bundle_title(first: Option<&QuestionRecord>, items: usize) -> String {
    let left = match first {
        Some(record) if !record.era.is_empty() && record.era_year.is_some() => {
            format!("{}{}年", record.era, record.era_year.unwrap_or_default())
        }
        _ => String::new(),
    };

    format!("{left} 全{items}問").trim().to_owned()
}

pub fn etag_for(year_key: &str, content_version: &str) -> String {
    format!("W/\"{year_key}@{content_version}\"")
}

/// Latest parseable `updated_at` across the group, RFC 3339 re-rendered in
/// UTC. None when no record carries a parseable timestamp.
pub fn latest_updated_at(records: &[QuestionRecord]) -> Option<String> {
    records
        .iter()
        .filter_map(|record| parse_timestamp(&record.updated_at))
        .max()
        .map(utc_string)
}

/// Accepts full RFC 3339 timestamps and bare `YYYY-MM-DD` dates (taken as
/// UTC midnight), the shapes that occur in source data.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
