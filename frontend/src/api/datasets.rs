use log::debug;
use shared::PreviewResponse;

use crate::api::api_url;
use crate::api::utils::json_get;

pub fn preview_path(dataset_id: &str) -> String {
    format!("/api/dataset/{}/preview", urlencoding::encode(dataset_id))
}

/// Fetches the row sample of a dataset. Error bodies (`{"error": ...}`) are
/// returned as `PreviewResponse::Failed` whatever the status code.
pub async fn get_dataset_preview(dataset_id: &str) -> Result<PreviewResponse, String> {
    debug!("Fetching preview of dataset {}", dataset_id);

    let response = json_get(&api_url(&preview_path(dataset_id)))
        .send()
        .await
        .map_err(|e| format!("Failed to fetch dataset preview: {}", e))?;

    let preview = response
        .json::<PreviewResponse>()
        .await
        .map_err(|e| format!("Failed to parse preview response: {}", e))?;

    if let PreviewResponse::Table(payload) = &preview {
        debug!(
            "Fetched {} of {} rows for dataset {}",
            payload.shown_rows(),
            payload.total_rows,
            dataset_id
        );
    }
    Ok(preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_path() {
        assert_eq!(preview_path("42"), "/api/dataset/42/preview");
        assert_eq!(preview_path("a b/c"), "/api/dataset/a%20b%2Fc/preview");
    }
}
