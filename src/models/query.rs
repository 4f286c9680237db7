use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const MIN_YEAR: i64 = 1800;
pub const MAX_YEAR: i64 = 2022;
pub const DEFAULT_FROM_YEAR: i64 = 1900;
pub const DEFAULT_TO_YEAR: i64 = 2020;

pub const MIN_WINDOW: u32 = 300;
pub const MIN_STEP: u32 = 100;
pub const DEFAULT_WINDOW: u32 = 2500;
pub const DEFAULT_STEP: u32 = 100;

/// A validated corpus search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub freetext: Option<String>,
    pub title: Option<String>,
    pub from_year: i64,
    pub to_year: i64,
}

/// A validated dispersion analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispersionRequest {
    pub urn: String,
    /// Words in request order; the order fixes the position of each word in
    /// the upstream frequency vectors.
    pub words: Vec<String>,
    /// Word count covered by one analysis window.
    pub window: u32,
    /// Word offset between consecutive window starts.
    pub step: u32,
}

/// Raw `/corpus` query parameters, exactly as they arrive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorpusParams {
    pub freetext: Option<String>,
    pub title: Option<String>,
    pub from_year: Option<String>,
    pub to_year: Option<String>,
}

/// Raw `/dispersion` query parameters, exactly as they arrive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DispersionParams {
    pub urn: Option<String>,
    pub words: Option<String>,
    pub window: Option<String>,
    pub pr: Option<String>,
}

impl SearchQuery {
    /// Validate raw parameters into a search query.
    pub fn from_params(params: CorpusParams) -> Result<Self, AppError> {
        let from_year = parse_int_or(params.from_year.as_deref(), DEFAULT_FROM_YEAR);
        let to_year = parse_int_or(params.to_year.as_deref(), DEFAULT_TO_YEAR);

        let in_range = |year: i64| (MIN_YEAR..=MAX_YEAR).contains(&year);
        if !in_range(from_year) || !in_range(to_year) {
            return Err(AppError::BadRequest(format!(
                "Year range must be between {MIN_YEAR} and {MAX_YEAR}"
            )));
        }

        if from_year > to_year {
            return Err(AppError::BadRequest(
                "from_year must be less than or equal to to_year".into(),
            ));
        }

        Ok(Self {
            freetext: non_blank(params.freetext),
            title: non_blank(params.title),
            from_year,
            to_year,
        })
    }
}

impl DispersionRequest {
    /// Validate raw parameters into a dispersion request.
    pub fn from_params(params: DispersionParams) -> Result<Self, AppError> {
        let urn = non_blank(params.urn)
            .ok_or_else(|| AppError::BadRequest("URN parameter is required".into()))?;

        let raw_words = params
            .words
            .ok_or_else(|| AppError::BadRequest("Words parameter is required".into()))?;
        let words = split_words(&raw_words);
        if words.is_empty() {
            return Err(AppError::BadRequest("At least one word is required".into()));
        }

        let window = parse_int_or(params.window.as_deref(), i64::from(DEFAULT_WINDOW));
        let step = parse_int_or(params.pr.as_deref(), i64::from(DEFAULT_STEP));

        if window < i64::from(MIN_WINDOW) {
            return Err(AppError::BadRequest(format!(
                "Window size must be at least {MIN_WINDOW}"
            )));
        }

        if step < i64::from(MIN_STEP) {
            return Err(AppError::BadRequest(format!(
                "Step size must be at least {MIN_STEP}"
            )));
        }

        Ok(Self {
            urn,
            words,
            window: clamp_u32(window),
            step: clamp_u32(step),
        })
    }
}

/// Split a comma separated word list, trimming and dropping empty entries.
/// Repeated words keep their first position only.
pub fn split_words(raw: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for word in raw.split(',').map(str::trim).filter(|w| !w.is_empty()) {
        if !words.iter().any(|w| w == word) {
            words.push(word.to_string());
        }
    }
    words
}

/// Lenient integer parsing: reads a leading signed run of digits and falls
/// back to `default` when there is none or it evaluates to zero. A run too
/// long for `i64` saturates, so range checks still reject it.
fn parse_int_or(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw.map(str::trim) else {
        return default;
    };

    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let digits = &digits[..end];
    if digits.is_empty() {
        return default;
    }

    // Only overflow can fail here: the run is all ASCII digits.
    match digits.parse::<i64>().unwrap_or(i64::MAX) {
        0 => default,
        value => sign * value,
    }
}

/// Window and step sizes beyond `u32` are clamped rather than rejected.
fn clamp_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
