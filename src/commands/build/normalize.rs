use crate::model::{Category, Choice, LawCitation, QuestionRecord, SourceRef, DEFAULT_EXAM_NAME};

use super::parse::RawRow;

/// Era name → Gregorian offset (`year = offset + era_year`). Only 令和 is
/// covered; rows from older eras keep a null year until an entry is added.
const ERA_YEAR_OFFSETS: &[(&str, i32)] = &[("令和", 2018)];

/// Turns one raw row into a normalized record.
///
/// `index` is the row's 0-based position inside its own file and drives id
/// synthesis; `answer` has already passed validation.
pub fn normalize_row(
    row: &RawRow,
    index: usize,
    year_key: &str,
    category: Category,
    answer: u8,
    built_at: &str,
) -> QuestionRecord {
    let era = raw(row, "era").to_owned();
    let era_year = parse_int(raw(row, "era_year")).map(|n| n as i32);

    let id = match raw(row, "id").trim() {
        "" => format!("{year_key}-{:03}", index + 1),
        explicit => explicit.to_owned(),
    };

    let year = match raw(row, "year").trim() {
        "" => guess_gregorian_year(&era, era_year),
        explicit => explicit.parse::<i32>().ok(),
    };

    let subject = match raw(row, "subject").trim() {
        "" => category.subject_name().to_owned(),
        explicit => explicit.to_owned(),
    };

    let choices = (1..=5)
        .filter_map(|key| {
            let text = raw(row, &format!("choice{key}")).trim();
            (!text.is_empty()).then(|| Choice {
                key,
                text: text.to_owned(),
            })
        })
        .collect();

    let updated_at = match raw(row, "updated_at").trim() {
        "" => built_at.to_owned(),
        explicit => explicit.to_owned(),
    };

    let era_year_display = era_year.map(|n| n.to_string()).unwrap_or_default();
    let paper = format!("{era}{era_year_display}年 {subject}").trim().to_owned();

    QuestionRecord {
        id,
        year,
        era,
        era_year,
        exam: non_empty_or(raw(row, "exam"), DEFAULT_EXAM_NAME),
        subject,
        topic: raw(row, "topic").to_owned(),
        question_no: parse_int(raw(row, "question_no")).unwrap_or(0),
        statement: raw(row, "statement").to_owned(),
        choices,
        answer,
        explanation: raw(row, "explanation").to_owned(),
        law_citations: parse_law_citations(raw(row, "law_citations")),
        difficulty: parse_int(raw(row, "difficulty")).map(|n| n as i32),
        tags: parse_tags(raw(row, "tags")),
        source: SourceRef {
            paper,
            page: parse_int(raw(row, "source_page")),
        },
        updated_at,
    }
}

pub fn guess_gregorian_year(era: &str, era_year: Option<i32>) -> Option<i32> {
    let era_year = era_year?;

    ERA_YEAR_OFFSETS
        .iter()
        .find(|(name, _)| era.contains(name))
        .map(|(_, offset)| offset + era_year)
}

/// `;`-separated `law:article` pairs; the article is everything past the
/// first colon, defaulting to empty.
pub fn parse_law_citations(field: &str) -> Vec<LawCitation> {
    field
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once(':') {
            Some((law, article)) => LawCitation {
                law: law.trim().to_owned(),
                article: article.trim().to_owned(),
            },
            None => LawCitation {
                law: segment.to_owned(),
                article: String::new(),
            },
        })
        .collect()
}

pub fn parse_tags(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn raw<'a>(row: &'a RawRow, key: &str) -> &'a str {
    row.get(key).map(String::as_str).unwrap_or("")
}

fn parse_int(field: &str) -> Option<i64> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

fn non_empty_or(field: &str, fallback: &str) -> String {
    if field.is_empty() {
        fallback.to_owned()
    } else {
        field.to_owned()
    }
}
