pub mod charts;
pub mod datasets;
pub mod utils;

use crate::config::Config;

pub fn api_url(path: &str) -> String {
    join_url(&Config::api_base_url(), path)
}

/// Joins a base URL (no trailing slash) and a request path. Absolute URLs
/// and an empty base leave `path` as is.
pub fn join_url(base_url: &str, path: &str) -> String {
    if base_url.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
        // Use relative URL
        path.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}
