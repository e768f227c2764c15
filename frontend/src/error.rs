use shared::SharedError;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Chart engine is not loaded")]
    EngineUnavailable,

    #[error("Chart engine call failed: {0}")]
    Engine(String),

    #[error("Option conversion failed: {0}")]
    Conversion(#[from] serde_json::Error),

    #[error("Chart option has no {0}")]
    MissingComponent(&'static str),

    #[error("Invalid chart payload: {0}")]
    Payload(#[from] SharedError),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl From<JsValue> for ChartError {
    fn from(value: JsValue) -> Self {
        ChartError::Engine(js_error_message(&value))
    }
}

/// Best-effort text of a thrown JS value.
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
