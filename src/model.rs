use serde::{Deserialize, Serialize};

pub const MANIFEST_SCHEMA_VERSION: &str = "1.1.0";

pub const DEFAULT_EXAM_NAME: &str = "不動産鑑定士 短答";

/// Known source-file categories. The filename marker is the closed set of
/// accepted spellings; anything else is ignored at discovery time.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Category {
    Gyousei,
    Kanteihyoka,
}

impl Category {
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "gyousei" => Some(Self::Gyousei),
            "kanteihyoka" => Some(Self::Kanteihyoka),
            _ => None,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Self::Gyousei => "gyousei",
            Self::Kanteihyoka => "kanteihyoka",
        }
    }

    /// Display subject used when a row leaves its own subject blank.
    pub fn subject_name(self) -> &'static str {
        match self {
            Self::Gyousei => "行政法規",
            Self::Kanteihyoka => "鑑定評価法規",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub key: u8,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LawCitation {
    pub law: String,
    pub article: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    pub paper: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

/// One normalized question, serialized as a single JSONL line inside a
/// bundle. `year` stays present-but-null when it cannot be derived;
/// `era_year`, `difficulty` and `source.page` are omitted when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub year: Option<i32>,
    pub era: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub era_year: Option<i32>,
    pub exam: String,
    pub subject: String,
    pub topic: String,
    pub question_no: i64,
    pub statement: String,
    pub choices: Vec<Choice>,
    pub answer: u8,
    pub explanation: String,
    pub law_citations: Vec<LawCitation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<i32>,
    pub tags: Vec<String>,
    pub source: SourceRef,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleEntry {
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub items: usize,
    pub url: String,
    pub size: u64,
    pub sha256: String,
    pub etag: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub schema_version: String,
    pub content_version: String,
    pub generated_at: String,
    pub bundles: Vec<BundleEntry>,
}
