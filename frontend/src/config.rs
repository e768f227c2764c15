use log::Level;
use std::str::FromStr;

pub struct Config;

impl Config {
    /// Selector of the containers that are auto-initialized on page load
    pub const CHART_CONTAINER_SELECTOR: &'static str = ".chart-container";
    /// Attribute that names the chart kind of a container
    pub const CHART_TYPE_ATTR: &'static str = "data-chart-type";
    /// Element property under which a mounted chart is registered. A JS
    /// property rather than an attribute, so `cloneNode` copies of a mounted
    /// container start unregistered.
    pub const CHART_ID_PROPERTY: &'static str = "__dqChartId";

    pub const EXPORT_PIXEL_RATIO: f64 = 2.0;
    pub const EXPORT_BACKGROUND: &'static str = "#fff";

    pub fn api_base_url() -> String {
        // The pages are served by the same origin that answers /api/, so
        // relative URLs are the default. A deployment that splits them sets
        // <meta name="api-base-url" content="https://...">.
        meta_content("api-base-url")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_default()
    }

    pub fn log_level() -> Level {
        meta_content("log-level")
            .and_then(|level| Level::from_str(&level).ok())
            .unwrap_or(if cfg!(debug_assertions) { Level::Debug } else { Level::Info })
    }
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    document
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
        .filter(|content| !content.trim().is_empty())
}
