use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::Result;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Assessment scores for the six quality dimensions.
///
/// Each score is expected in `[0, 100]`. A missing or `null` score reads as 0.
/// Scores are decoded one field at a time: numeric strings such as `"85"`
/// are accepted, and any other non-number drops only that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ScoreSet {
    #[serde(default, deserialize_with = "lenient_score")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub quality: Option<f64>,

    #[serde(default, deserialize_with = "lenient_score")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub completeness: Option<f64>,

    #[serde(default, deserialize_with = "lenient_score")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub consistency: Option<f64>,

    #[serde(default, deserialize_with = "lenient_score")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub accuracy: Option<f64>,

    #[serde(default, deserialize_with = "lenient_score")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub timeliness: Option<f64>,

    #[serde(default, deserialize_with = "lenient_score")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub business_value: Option<f64>,
}

/// Display order of the score dimensions, paired with their labels
pub const SCORE_DIMENSIONS: [&str; 6] = [
    "Data Quality",
    "Completeness",
    "Consistency",
    "Accuracy",
    "Timeliness",
    "Business Value",
];

fn lenient_score<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let score = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => {
            let parsed = text.trim().parse::<f64>().ok().filter(|v| v.is_finite());
            if parsed.is_none() {
                warn!("Ignoring non-numeric score {:?}", text);
            }
            parsed
        }
        Some(other) => {
            warn!("Ignoring non-numeric score {}", other);
            None
        }
    };
    Ok(score)
}

impl ScoreSet {
    /// Range check of every present score.
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }

    /// Scores in `SCORE_DIMENSIONS` order, with missing values as 0.
    pub fn values(&self) -> [f64; 6] {
        [
            self.quality,
            self.completeness,
            self.consistency,
            self.accuracy,
            self.timeliness,
            self.business_value,
        ]
        .map(|score| score.filter(|v| !v.is_nan()).unwrap_or(0.0))
    }

    /// Like `values`, but pinned into `[0, 100]`.
    pub fn clamped_values(&self) -> [f64; 6] {
        self.values().map(|v| v.clamp(SCORE_MIN, SCORE_MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_missing_scores_default_to_zero() {
        let scores: ScoreSet = serde_json::from_value(json!({
            "quality": 80,
            "accuracy": null,
            "business_value": 55.5
        }))
        .unwrap();

        assert_eq!(scores.values(), [80.0, 0.0, 0.0, 0.0, 0.0, 55.5]);
        assert!(scores.check().is_ok());
    }

    #[test]
    fn test_malformed_score_drops_only_its_field() {
        let scores: ScoreSet = serde_json::from_value(json!({
            "quality": "85",
            "completeness": 90,
            "consistency": "n/a",
            "accuracy": true,
            "timeliness": [1]
        }))
        .unwrap();

        assert_eq!(scores.values(), [85.0, 90.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_scores_fail_validation() {
        let scores = ScoreSet {
            completeness: Some(120.0),
            timeliness: Some(-3.0),
            ..Default::default()
        };

        assert!(matches!(scores.check(), Err(crate::SharedError::Validation(_))));
        assert_eq!(scores.clamped_values(), [0.0, 100.0, 0.0, 0.0, 0.0, 0.0]);
    }
}
