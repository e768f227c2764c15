use gloo::events::EventListener;
use log::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

use crate::charts::with_charts;
use crate::config::Config;

pub mod api;
pub mod charts;
pub mod config;
pub mod error;
pub mod exports;
pub mod format;
pub mod preview;
pub mod upload;

// Unit test modules only
#[cfg(test)]
mod tests;

fn on_page_ready() {
    let mounted = with_charts(|charts| charts.init_charts());
    info!("Page ready, {} charts mounted", mounted);
    upload::init_file_upload_preview();
}

pub fn run_app() -> Result<(), JsValue> {
    // Initialize logging
    wasm_logger::init(wasm_logger::Config::new(Config::log_level()));
    info!("Logger initialized");

    // Set up panic hook
    console_error_panic_hook::set_once();

    exports::install()?;
    info!("ChartUtils installed");

    let document = gloo_utils::document();
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| on_page_ready()).forget();
    } else {
        on_page_ready();
    }

    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    run_app().map_err(|e| {
        error!("Failed to start: {}", error::js_error_message(&e));
        e
    })
}
