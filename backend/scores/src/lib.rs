//! # Scores
//!
//! Data contract shared by the upload proxy and the analyzer.
//!
//! ## Payloads
//!
//! Inference endpoint response on success:
//! ```json
//! { "scores": { "confidence": 87.6, "dominance": 42.1 } }
//! ```
//!
//! On failure the endpoint answers with `{ "detail": ... }`, the proxy with `{ "error": ... }`.
//!
//! ## Notes
//! - Trait keys are not fixed, anything the endpoint returns gets rendered
//! - Key order is the order the endpoint wrote them in
//! - Values are expected in 0-100 but never clamped
use indexmap::IndexMap;
use serde_json::Value;

pub mod remote;
pub mod style;

/// Trait name to score, in response order.
pub type TraitScores = IndexMap<String, f64>;

/// Rounds to the nearest integer, halves go toward positive infinity.
///
/// `-2.5` becomes `-2`, `2.5` becomes `3`. NaN stays NaN.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Builds the displayed score map out of a parsed response body.
///
/// A missing or non-object `scores` field gives an empty map. Values that are not
/// numbers are coerced the way a browser would, so garbage turns into NaN rather
/// than an error.
pub fn format_scores(data: &Value) -> TraitScores {
    let Some(raw) = data.get("scores").and_then(Value::as_object) else {
        return TraitScores::new();
    };

    raw.iter()
        .map(|(name, value)| (name.clone(), round_half_up(to_number(value))))
        .collect()
}

/// Mean of the given scores, rounded. Empty maps score 0.
///
/// Works on whatever map it is handed. The analyzer only ever holds the rounded
/// map from [`format_scores`], so the mean is taken over rounded trait values and
/// then rounded once more.
pub fn overall_score(scores: &TraitScores) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }

    let total: f64 = scores.values().sum();
    round_half_up(total / scores.len() as f64)
}

/// Formats a score the way it is shown next to a bar.
pub fn display_score(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        // -0 after rounding small negatives
        "0".to_string()
    } else {
        format!("{value}")
    }
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Null => 0.0,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(87.6), 88.0);
        assert_eq!(round_half_up(42.1), 42.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert!(round_half_up(f64::NAN).is_nan());
    }

    #[test]
    fn test_format_scores() {
        let data = json!({ "scores": { "confidence": 87.6, "dominance": 42.1 } });
        let scores = format_scores(&data);

        assert_eq!(scores.get("confidence"), Some(&88.0));
        assert_eq!(scores.get("dominance"), Some(&42.0));
        assert_eq!(overall_score(&scores), 65.0);
    }

    #[test]
    fn test_format_keeps_response_order() {
        let data = json!({ "scores": { "style": 1, "attitude": 2, "clarity": 3 } });
        let keys: Vec<_> = format_scores(&data).into_keys().collect();

        assert_eq!(keys, ["style", "attitude", "clarity"]);
    }

    #[test]
    fn test_missing_scores() {
        assert!(format_scores(&json!({ "detail": "bad image" })).is_empty());
        assert!(format_scores(&json!({ "scores": null })).is_empty());
        assert!(format_scores(&json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_non_numeric_scores() {
        let data = json!({ "scores": { "a": "12.4", "b": "abc", "c": [1], "d": true } });
        let scores = format_scores(&data);

        assert_eq!(scores["a"], 12.0);
        assert!(scores["b"].is_nan());
        assert!(scores["c"].is_nan());
        assert_eq!(scores["d"], 1.0);
        assert!(overall_score(&scores).is_nan());
    }

    #[test]
    fn test_overall_empty() {
        assert_eq!(overall_score(&TraitScores::new()), 0.0);
    }

    #[test]
    fn test_overall_uses_rounded_traits() {
        // raw mean would be round(1.45) = 1
        let scores = format_scores(&json!({ "scores": { "a": 2.5, "b": 0.4 } }));

        assert_eq!(overall_score(&scores), 2.0);
    }

    #[test]
    fn test_out_of_range_not_clamped() {
        let scores = format_scores(&json!({ "scores": { "a": 140.2, "b": -10 } }));

        assert_eq!(scores["a"], 140.0);
        assert_eq!(scores["b"], -10.0);
        assert_eq!(overall_score(&scores), 65.0);
    }

    #[test]
    fn test_display_score() {
        assert_eq!(display_score(88.0), "88");
        assert_eq!(display_score(-0.0), "0");
        assert_eq!(display_score(f64::NAN), "NaN");
        assert_eq!(display_score(-12.0), "-12");
    }
}
