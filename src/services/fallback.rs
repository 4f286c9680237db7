//! Generated stand-in data for when the DHLAB API cannot answer.
//!
//! The output is shaped exactly like the real path's so the UI renders it the
//! same way.

use std::f64::consts::PI;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::Number;

use crate::models::dispersion::DispersionWindowRow;
use crate::models::document::{Document, UNKNOWN_AUTHOR, UNKNOWN_TITLE};
use crate::models::query::SearchQuery;

/// Nominal document length (in words) assumed by the dispersion fallback.
pub const NOMINAL_DOCUMENT_WORDS: u64 = 10_000;

pub const MIN_MOCK_DOCUMENTS: usize = 5;
pub const MAX_MOCK_DOCUMENTS: usize = 20;

const MOCK_AUTHORS: &[&str] = &[
    "Henrik Ibsen",
    "Knut Hamsun",
    "Sigrid Undset",
    "Bjørnstjerne Bjørnson",
    "Alexander Kielland",
    "Jonas Lie",
    "Amalie Skram",
    "Camilla Collett",
    "Arne Garborg",
    "Kristofer Uppdal",
    "Olav Duun",
    "Tarjei Vesaas",
];

const MOCK_TITLES: &[&str] = &[
    "Et dukkehjem",
    "Peer Gynt",
    "Sult",
    "Pan",
    "Kristin Lavransdatter",
    "Synnøve Solbakken",
    "En glad gutt",
    "Gift",
    "Skipper Worse",
    "Kommandørens døtre",
    "Constance Ring",
    "Bondens søn",
    "Fred",
];

/// Generate a plausible corpus for `query`.
///
/// Identifiers combine the current time with the record's position, so they
/// never collide within one batch.
pub fn generate_corpus<R: Rng + ?Sized>(rng: &mut R, query: &SearchQuery) -> Vec<Document> {
    let count = rng.random_range(MIN_MOCK_DOCUMENTS..=MAX_MOCK_DOCUMENTS);
    let timestamp = chrono::Utc::now().timestamp_millis();

    (0..count)
        .map(|sequence| {
            let author = MOCK_AUTHORS.choose(rng).copied().unwrap_or(UNKNOWN_AUTHOR);
            let title = MOCK_TITLES.choose(rng).copied().unwrap_or(UNKNOWN_TITLE);
            let year = rng.random_range(query.from_year..=query.to_year);
            let urn = format!("URN:NBN:no-nb_digibok_{timestamp}_{sequence:04}");

            let title = match &query.freetext {
                Some(freetext) => format!("{title} ({freetext})"),
                None => title.to_string(),
            };

            Document {
                authors: vec![author.to_string()],
                title,
                year: Some(year),
                id: urn.clone(),
                urn,
            }
        })
        .collect()
}

/// Number of windows the dispersion fallback produces for `step`.
pub fn mock_window_count(step: u32) -> u64 {
    NOMINAL_DOCUMENT_WORDS / u64::from(step.max(1))
}

/// Generate dispersion rows over a nominal document.
///
/// Each value is a random base frequency plus noise plus a sine trend over
/// the document, clamped at zero and rounded. Windows here end at
/// `start + window`, unlike the real path's `start + step`.
pub fn generate_dispersion<R: Rng + ?Sized>(
    rng: &mut R,
    words: &[String],
    window: u32,
    step: u32,
) -> Vec<DispersionWindowRow> {
    let windows = mock_window_count(step);
    let step = u64::from(step);
    let window = u64::from(window);

    (0..windows)
        .map(|i| {
            let start = i * step;
            let mut row = DispersionWindowRow::new(start, start + window);

            for word in words {
                let base = rng.random::<f64>() * 10.0;
                let noise = (rng.random::<f64>() - 0.5) * 2.0;
                let trend = (i as f64 / windows as f64 * PI * 2.0).sin() * 2.0;
                let value = (base + noise + trend).round().max(0.0) as u64;
                row.push(word.clone(), Number::from(value));
            }

            row
        })
        .collect()
}
