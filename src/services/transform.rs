use serde_json::{Number, Value};

use crate::error::UpstreamError;
use crate::models::dispersion::DispersionWindowRow;

/// Map DHLAB's per-window frequency vectors onto chart rows.
///
/// Window `i` spans `[i * step, (i + 1) * step)`. Entry `j` of each vector is
/// the frequency of `words[j]`; short vectors and non-numeric or negative
/// entries count as zero. Row order is the input order.
pub fn transform_dispersion(
    payload: &Value,
    words: &[String],
    step: u32,
) -> Result<Vec<DispersionWindowRow>, UpstreamError> {
    let Value::Array(windows) = payload else {
        return Err(UpstreamError::Malformed(
            "expected array response from dispersion API".into(),
        ));
    };

    let step = u64::from(step);

    windows
        .iter()
        .enumerate()
        .map(|(index, frequencies)| {
            let Value::Array(frequencies) = frequencies else {
                return Err(UpstreamError::Malformed(format!(
                    "window {index} is not a list of frequencies"
                )));
            };

            let index = index as u64;
            let mut row = DispersionWindowRow::new(index * step, (index + 1) * step);
            for (position, word) in words.iter().enumerate() {
                row.push(word.clone(), frequency(frequencies.get(position)));
            }
            Ok(row)
        })
        .collect()
}

fn frequency(value: Option<&Value>) -> Number {
    match value {
        Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f > 0.0) => n.clone(),
        _ => Number::from(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_rows_follow_step_arithmetic() {
        let rows = transform_dispersion(&json!([[3, 1], [0, 2]]), &words(&["a", "b"]), 100).unwrap();

        assert_eq!(
            serde_json::to_value(&rows).unwrap(),
            json!([
                {"window_start": 0, "window_end": 100, "a": 3, "b": 1},
                {"window_start": 100, "window_end": 200, "a": 0, "b": 2}
            ])
        );
    }

    #[test]
    fn test_missing_entries_default_to_zero() {
        let rows = transform_dispersion(&json!([[5]]), &words(&["a", "b"]), 100).unwrap();
        assert_eq!(rows[0].frequency("a"), Some(&Number::from(5)));
        assert_eq!(rows[0].frequency("b"), Some(&Number::from(0)));
    }

    #[test]
    fn test_null_and_non_numeric_entries_are_zero() {
        let rows =
            transform_dispersion(&json!([[null, "x", -2, 1.5]]), &words(&["a", "b", "c", "d"]), 200)
                .unwrap();
        let row = &rows[0];
        assert_eq!(row.frequency("a"), Some(&Number::from(0)));
        assert_eq!(row.frequency("b"), Some(&Number::from(0)));
        assert_eq!(row.frequency("c"), Some(&Number::from(0)));
        assert_eq!(row.frequency("d").and_then(Number::as_f64), Some(1.5));
    }

    #[test]
    fn test_order_is_preserved_not_sorted() {
        let rows =
            transform_dispersion(&json!([[9], [1], [9], [1]]), &words(&["a"]), 150).unwrap();
        let values: Vec<u64> = rows
            .iter()
            .map(|r| r.frequency("a").and_then(Number::as_u64).unwrap())
            .collect();
        assert_eq!(values, vec![9, 1, 9, 1]);
        assert_eq!(rows[3].window_start, 450);
        assert_eq!(rows[3].window_end, 600);
    }

    #[test]
    fn test_empty_payload_gives_no_rows() {
        let rows = transform_dispersion(&json!([]), &words(&["a"]), 100).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_non_array_payload_is_malformed() {
        for payload in [json!({"detail": "Not found"}), Value::Null, json!([[1], 2])] {
            assert!(matches!(
                transform_dispersion(&payload, &words(&["a"]), 100),
                Err(UpstreamError::Malformed(_))
            ));
        }
    }
}
