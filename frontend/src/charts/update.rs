use log::{debug, error, warn};
use serde_json::Value;
use shared::{ChartUpdate, ChartUpdatePayload};

use crate::api::charts::get_chart_update;
use crate::charts::engine::ChartHandle;
use crate::charts::options::ChartOption;
use crate::error::ChartError;

#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    Applied,
    /// The update kind has no merge rule; the option was left as is.
    Ignored(String),
}

/// Writes `update` into `option`.
///
/// Every target is resolved before anything is written, so on error the
/// option is unchanged.
pub fn merge_update(
    option: &mut ChartOption,
    update: &ChartUpdate,
) -> Result<MergeOutcome, ChartError> {
    match update {
        ChartUpdate::Radar { values } => {
            let series = option
                .first_series_mut()
                .ok_or(ChartError::MissingComponent("series"))?;
            series.insert("data".to_string(), Value::from(values.clone()));
            Ok(MergeOutcome::Applied)
        }
        ChartUpdate::Bar { categories, values } => {
            if option.x_axis_mut().is_none() {
                return Err(ChartError::MissingComponent("x axis"));
            }
            if option.first_series_mut().is_none() {
                return Err(ChartError::MissingComponent("series"));
            }
            if let Some(axis) = option.x_axis_mut() {
                axis.insert("data".to_string(), Value::from(categories.clone()));
            }
            if let Some(series) = option.first_series_mut() {
                series.insert("data".to_string(), Value::from(values.clone()));
            }
            Ok(MergeOutcome::Applied)
        }
        ChartUpdate::Unsupported { kind } => Ok(MergeOutcome::Ignored(kind.clone())),
    }
}

/// Reads the chart's current option, merges `update` into it and applies the
/// result. Ignored kinds do not touch the chart.
pub fn apply_chart_update<C: ChartHandle>(
    chart: &C,
    update: &ChartUpdate,
) -> Result<MergeOutcome, ChartError> {
    let mut option = chart.get_option()?;
    let outcome = merge_update(&mut option, update)?;
    match &outcome {
        MergeOutcome::Applied => chart.set_option(&option)?,
        MergeOutcome::Ignored(kind) => warn!("Chart update of type '{}' is not supported, ignored", kind),
    }
    Ok(outcome)
}

/// Validates a wire payload and applies it. A malformed payload is reported
/// as `ChartError::Payload` and leaves the chart untouched.
pub fn apply_chart_payload<C: ChartHandle>(
    chart: &C,
    payload: ChartUpdatePayload,
) -> Result<MergeOutcome, ChartError> {
    let update = ChartUpdate::try_from(payload)?;
    debug!("Applying {} chart update", update.kind());
    apply_chart_update(chart, &update)
}

pub async fn try_load_chart_data<C: ChartHandle>(
    chart: &C,
    url: &str,
) -> Result<MergeOutcome, ChartError> {
    let payload = get_chart_update(url).await.map_err(ChartError::Request)?;
    apply_chart_payload(chart, payload)
}

/// Fetches `url` and merges the payload into `chart`. Failures are logged and
/// the chart keeps its previous option.
pub async fn load_chart_data<C: ChartHandle>(chart: &C, url: &str) {
    match try_load_chart_data(chart, url).await {
        Ok(outcome) => debug!("Chart data from {} merged: {:?}", url, outcome),
        Err(e) => error!("Failed to load chart data from {}: {}", url, e),
    }
}
