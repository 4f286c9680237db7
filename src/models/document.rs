use serde::{Deserialize, Serialize};

pub const UNKNOWN_AUTHOR: &str = "Ukjent forfatter";
pub const UNKNOWN_TITLE: &str = "Ukjent tittel";

/// A corpus search hit, normalized from the DHLAB corpus endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Never empty; falls back to a single placeholder author.
    pub authors: Vec<String>,
    pub title: String,
    /// Publication year, `null` when unknown.
    pub year: Option<i64>,
    /// External identifier of the digitized item.
    pub urn: String,
    /// Mirrors `urn` unless upstream supplied a distinct id.
    pub id: String,
}

/// Catalog metadata for a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub urn: String,
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<i64>,
    pub publisher: Option<String>,
    pub pages: Option<String>,
    pub language: Option<String>,
}
