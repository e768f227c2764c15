use log::debug;
use shared::ChartUpdatePayload;

use crate::api::api_url;
use crate::api::utils::json_get;

/// Fetches a raw chart-data payload. Validation is left to the caller.
pub async fn get_chart_update(url: &str) -> Result<ChartUpdatePayload, String> {
    debug!("Fetching chart data from {}", url);

    let response = json_get(&api_url(url))
        .send()
        .await
        .map_err(|e| format!("Failed to fetch chart data: {}", e))?;

    if !response.ok() {
        return Err(format!(
            "Chart data request returned {} {}",
            response.status(),
            response.status_text()
        ));
    }

    response
        .json::<ChartUpdatePayload>()
        .await
        .map_err(|e| format!("Failed to parse chart data: {}", e))
}
