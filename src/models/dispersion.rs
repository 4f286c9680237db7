use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

const WINDOW_START: &str = "window_start";
const WINDOW_END: &str = "window_end";

/// One chart row: the span of a window and the frequency of each word in it.
///
/// Serializes as a flat object, `window_start` and `window_end` first, then
/// one key per word in request order. Words named `window_start` or
/// `window_end` are not emitted, so the bounds keep their meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct DispersionWindowRow {
    pub window_start: u64,
    pub window_end: u64,
    pub frequencies: Vec<(String, Number)>,
}

impl DispersionWindowRow {
    pub fn new(window_start: u64, window_end: u64) -> Self {
        Self {
            window_start,
            window_end,
            frequencies: Vec::new(),
        }
    }

    /// Record a word's frequency. A word already present keeps its position
    /// and takes the new value.
    pub fn push(&mut self, word: impl Into<String>, frequency: Number) {
        let word = word.into();
        match self.frequencies.iter_mut().find(|(w, _)| *w == word) {
            Some(entry) => entry.1 = frequency,
            None => self.frequencies.push((word, frequency)),
        }
    }

    pub fn frequency(&self, word: &str) -> Option<&Number> {
        self.frequencies
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, f)| f)
    }
}

impl Serialize for DispersionWindowRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let words = self
            .frequencies
            .iter()
            .filter(|(word, _)| word != WINDOW_START && word != WINDOW_END);

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(WINDOW_START, &self.window_start)?;
        map.serialize_entry(WINDOW_END, &self.window_end)?;
        for (word, frequency) in words {
            map.serialize_entry(word, frequency)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DispersionWindowRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut object = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;

        let window_start = take_bound::<D::Error>(&mut object, WINDOW_START)?;
        let window_end = take_bound::<D::Error>(&mut object, WINDOW_END)?;

        let frequencies = object
            .into_iter()
            .map(|(word, value)| match value {
                serde_json::Value::Number(n) => Ok((word, n)),
                other => Err(D::Error::custom(format!(
                    "frequency for '{word}' is not a number: {other}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            window_start,
            window_end,
            frequencies,
        })
    }
}

fn take_bound<E: serde::de::Error>(
    object: &mut serde_json::Map<String, serde_json::Value>,
    key: &'static str,
) -> Result<u64, E> {
    object
        .remove(key)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| E::missing_field(key))
}

/// Request echo attached to every dispersion response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispersionMetadata {
    pub urn: String,
    pub words: Vec<String>,
    pub window: u32,
    pub step: u32,
    /// Always equal to the number of rows.
    pub total_windows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispersionResult {
    pub dispersion: Vec<DispersionWindowRow>,
    pub metadata: DispersionMetadata,
}
