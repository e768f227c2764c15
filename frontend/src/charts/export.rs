use log::debug;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use crate::charts::engine::ChartHandle;
use crate::config::Config;
use crate::error::{js_error_message, ChartError};

pub const DEFAULT_EXPORT_NAME: &str = "chart";

pub fn download_file_name(filename: Option<&str>) -> String {
    let stem = filename
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_EXPORT_NAME);
    format!("{}.png", stem)
}

/// Downloads the chart as a PNG at twice the pixel density on a white background.
pub fn export_chart<C: ChartHandle>(chart: &C, filename: Option<&str>) -> Result<(), ChartError> {
    let image = chart.data_url(Config::EXPORT_PIXEL_RATIO, Config::EXPORT_BACKGROUND)?;
    let name = download_file_name(filename);

    let link = gloo_utils::document()
        .create_element("a")
        .map_err(|e| ChartError::Dom(js_error_message(&e)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| ChartError::Dom("created element is not an anchor".to_string()))?;
    link.set_download(&name);
    link.set_href(&image);
    link.click();

    debug!("Exported chart as {}", name);
    Ok(())
}
