use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dto::common::ErrorResponse;

/// One preview row, keyed by column name. Cell values may be `null`.
pub type PreviewRow = Map<String, Value>;

/// Response body of `GET /api/dataset/{id}/preview`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewPayload {
    /// Column names in display order
    pub columns: Vec<String>,
    /// The sampled rows
    pub data: Vec<PreviewRow>,
    /// Row count of the whole dataset, not just the sample
    pub total_rows: u64,
}

impl PreviewPayload {
    pub fn shown_rows(&self) -> usize {
        self.data.len()
    }
}

/// The preview endpoint answers with either a table or an error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreviewResponse {
    Failed(ErrorResponse),
    Table(PreviewPayload),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parses_table_payload() {
        let body = json!({
            "columns": ["x", "y"],
            "data": [{"x": 1, "y": null}],
            "total_rows": 5
        });

        let response: PreviewResponse = serde_json::from_value(body).unwrap();
        match response {
            PreviewResponse::Table(payload) => {
                assert_eq!(payload.columns, vec!["x".to_string(), "y".to_string()]);
                assert_eq!(payload.shown_rows(), 1);
                assert_eq!(payload.total_rows, 5);
                assert_eq!(payload.data[0]["y"], Value::Null);
            }
            other => panic!("expected a table, got {:?}", other),
        }
    }

    #[test]
    fn test_parses_error_payload() {
        let response: PreviewResponse =
            serde_json::from_value(json!({"error": "not found"})).unwrap();

        assert_eq!(
            response,
            PreviewResponse::Failed(ErrorResponse { error: "not found".to_string() })
        );
    }

    #[test]
    fn test_rejects_incomplete_table() {
        let result = serde_json::from_value::<PreviewResponse>(json!({"columns": ["x"]}));
        assert!(result.is_err());
    }
}
