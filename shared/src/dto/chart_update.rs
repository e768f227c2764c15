use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::{Result, SharedError};

/// Wire shape of a chart-data endpoint response. Which fields are present
/// depends on `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartUpdatePayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Number>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

/// A validated chart update. Kinds without a merge rule are kept as
/// `Unsupported` so the caller can report them instead of guessing.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartUpdate {
    Radar {
        values: Vec<Number>,
    },
    Bar {
        categories: Vec<String>,
        values: Vec<Number>,
    },
    Unsupported {
        kind: String,
    },
}

impl ChartUpdate {
    pub fn kind(&self) -> &str {
        match self {
            ChartUpdate::Radar { .. } => "radar",
            ChartUpdate::Bar { .. } => "bar",
            ChartUpdate::Unsupported { kind } => kind,
        }
    }
}

impl TryFrom<ChartUpdatePayload> for ChartUpdate {
    type Error = SharedError;

    fn try_from(payload: ChartUpdatePayload) -> Result<Self> {
        match payload.kind.as_str() {
            "radar" => {
                let values = payload
                    .values
                    .ok_or_else(|| SharedError::MissingField("values".to_string()))?;
                Ok(ChartUpdate::Radar { values })
            }
            "bar" => {
                let categories = payload
                    .categories
                    .ok_or_else(|| SharedError::MissingField("categories".to_string()))?;
                let values = payload
                    .values
                    .ok_or_else(|| SharedError::MissingField("values".to_string()))?;
                if values.len() != categories.len() {
                    return Err(SharedError::LengthMismatch {
                        field: "values".to_string(),
                        expected: categories.len(),
                        actual: values.len(),
                    });
                }
                Ok(ChartUpdate::Bar { categories, values })
            }
            _ => {
                debug!("Chart update of type '{}' has no merge rule", payload.kind);
                Ok(ChartUpdate::Unsupported { kind: payload.kind })
            }
        }
    }
}

impl ChartUpdate {
    /// Parses and validates a raw JSON body.
    pub fn from_json(body: &str) -> Result<Self> {
        let payload: ChartUpdatePayload = serde_json::from_str(body)?;
        Self::try_from(payload)
    }
}
