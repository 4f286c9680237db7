//! Shaping of raw catalog and DHLAB records into the models served by the API.

use serde_json::Value;

use crate::error::UpstreamError;
use crate::models::document::{Document, DocumentMetadata, UNKNOWN_AUTHOR, UNKNOWN_TITLE};

const UNKNOWN_METADATA_TITLE: &str = "Unknown Title";
const UNKNOWN_METADATA_AUTHOR: &str = "Unknown Author";

/// Normalize the corpus endpoint's response into documents.
///
/// A `null` body is an empty result; anything other than an array is
/// malformed. Records without any identifier are skipped.
pub fn normalize_corpus(payload: &Value) -> Result<Vec<Document>, UpstreamError> {
    let records = match payload {
        Value::Null => return Ok(Vec::new()),
        Value::Array(records) => records,
        other => {
            return Err(UpstreamError::Malformed(format!(
                "expected a list of corpus records, got {}",
                json_kind(other)
            )))
        }
    };

    Ok(records.iter().filter_map(normalize_record).collect())
}

fn normalize_record(record: &Value) -> Option<Document> {
    let urn = text(record.get("urn"));
    let id = text(record.get("id"));

    let (urn, id) = match (urn, id) {
        (Some(urn), Some(id)) => (urn, id),
        (Some(urn), None) => (urn.clone(), urn),
        (None, Some(id)) => (id.clone(), id),
        (None, None) => {
            tracing::debug!(?record, "Skipping corpus record without identifier");
            return None;
        }
    };

    let mut authors: Vec<String> = match record.get("authors") {
        Some(Value::Array(items)) => items.iter().filter_map(|a| text(Some(a))).collect(),
        other => text(other).into_iter().collect(),
    };
    if authors.is_empty() {
        authors.push(UNKNOWN_AUTHOR.to_string());
    }

    Some(Document {
        authors,
        title: text(record.get("title")).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        year: year(record.get("year")),
        urn,
        id,
    })
}

/// Build document metadata from a catalog item record.
pub fn extract_metadata(urn: &str, item: &Value) -> DocumentMetadata {
    let metadata = item.get("metadata");
    let field = |name: &str| metadata.and_then(|m| m.get(name));

    let mut authors: Vec<String> = match field("creators") {
        Some(Value::Array(creators)) => creators
            .iter()
            .map(|c| text(c.get("name")).unwrap_or_else(|| UNKNOWN_METADATA_AUTHOR.to_string()))
            .collect(),
        _ => Vec::new(),
    };
    if authors.is_empty() {
        authors.push(UNKNOWN_METADATA_AUTHOR.to_string());
    }

    DocumentMetadata {
        urn: urn.to_string(),
        title: text(field("title")).unwrap_or_else(|| UNKNOWN_METADATA_TITLE.to_string()),
        authors,
        year: year(field("issued")),
        publisher: text(field("publisher")),
        pages: text(field("extent")),
        language: text(field("language")),
    }
}

/// Pull the suggestion strings out of a catalog suggest response.
pub fn extract_suggestions(payload: &Value) -> Vec<String> {
    match payload.get("suggestions") {
        Some(Value::Array(items)) => items.iter().filter_map(|s| text(Some(s))).collect(),
        _ => Vec::new(),
    }
}

/// Render a scalar (or list of scalars) as text. Blank strings count as absent.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(|i| text(Some(i))).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

/// Years arrive as numbers or as free text such as `"ca. 1905"`; zero means unknown.
fn year(value: Option<&Value>) -> Option<i64> {
    let year = match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => first_four_digits(s),
        _ => None,
    }?;

    (year != 0).then_some(year)
}

fn first_four_digits(s: &str) -> Option<i64> {
    let bytes = s.as_bytes();
    bytes
        .windows(4)
        .position(|w| w.iter().all(u8::is_ascii_digit))
        .and_then(|start| s[start..start + 4].parse().ok())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
