use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Object, Promise, Reflect};
use log::{error, warn};
use serde::de::DeserializeOwned;
use shared::ScoreSet;
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;
use web_sys::HtmlElement;

use crate::charts::{
    export_chart, get_bar_option, get_line_option, get_pie_option, get_radar_option,
    load_chart_data, with_charts, BarData, ChartOption, EchartsChart, LineData, PieSlice,
    RadarEntry,
};
use crate::format::format_file_size;
use crate::preview::load_dataset_preview;

/// Publishes `window.ChartUtils` and the page-level helpers for template scripts.
pub fn install() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let chart_utils = Object::new();
    set_fn(&chart_utils, "initCharts", Closure::<dyn Fn() -> JsValue>::new(|| {
        JsValue::from(with_charts(|charts| charts.init_charts()) as u32)
    }))?;
    set_fn(&chart_utils, "initChart", Closure::<dyn Fn(JsValue, JsValue) -> JsValue>::new(init_chart))?;
    set_fn(&chart_utils, "getRadarOption", Closure::<dyn Fn(JsValue) -> JsValue>::new(|data| {
        let entries = optional_arg::<Vec<RadarEntry>>(&data);
        option_to_js(get_radar_option(entries.as_deref()))
    }))?;
    set_fn(&chart_utils, "getBarOption", Closure::<dyn Fn(JsValue) -> JsValue>::new(|data| {
        option_to_js(get_bar_option(optional_arg::<BarData>(&data).as_ref()))
    }))?;
    set_fn(&chart_utils, "getPieOption", Closure::<dyn Fn(JsValue) -> JsValue>::new(|data| {
        let slices = optional_arg::<Vec<PieSlice>>(&data);
        option_to_js(get_pie_option(slices.as_deref()))
    }))?;
    set_fn(&chart_utils, "getLineOption", Closure::<dyn Fn(JsValue) -> JsValue>::new(|data| {
        option_to_js(get_line_option(optional_arg::<LineData>(&data).as_ref()))
    }))?;
    set_fn(&chart_utils, "loadChartData", Closure::<dyn Fn(JsValue, JsValue) -> Promise>::new(load_chart_data_js))?;
    set_fn(&chart_utils, "exportChart", Closure::<dyn Fn(JsValue, JsValue)>::new(export_chart_js))?;
    set_fn(&chart_utils, "disposeChart", Closure::<dyn Fn(JsValue) -> bool>::new(|container: JsValue| {
        container
            .dyn_into::<HtmlElement>()
            .map(|container| with_charts(|charts| charts.dispose_chart(&container)))
            .unwrap_or(false)
    }))?;
    Reflect::set(&window, &"ChartUtils".into(), &chart_utils)?;

    set_fn(&window, "createScoreChart", Closure::<dyn Fn(String, JsValue)>::new(create_score_chart))?;
    set_fn(&window, "createGaugeChart", Closure::<dyn Fn(String, JsValue, JsValue)>::new(create_gauge_chart))?;
    set_fn(&window, "formatFileSize", Closure::<dyn Fn(f64) -> String>::new(|bytes: f64| {
        format_file_size(if bytes.is_finite() && bytes > 0.0 { bytes as u64 } else { 0 })
    }))?;
    set_fn(&window, "loadDatasetPreview", Closure::<dyn Fn(JsValue, String) -> Promise>::new(
        |dataset_id: JsValue, container_id: String| {
            let dataset_id = dataset_id
                .as_string()
                .or_else(|| dataset_id.as_f64().map(|id| id.to_string()))
                .unwrap_or_default();
            future_to_promise(async move {
                load_dataset_preview(&dataset_id, &container_id).await;
                Ok(JsValue::UNDEFINED)
            })
        },
    ))?;

    Ok(())
}

fn set_fn<T: ?Sized + WasmClosure>(target: &JsValue, name: &str, closure: Closure<T>) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(name), &closure.into_js_value())?;
    Ok(())
}

/// Decodes an optional JS argument; absent or malformed input reads as `None`.
fn optional_arg<T: DeserializeOwned>(value: &JsValue) -> Option<T> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    match value.into_serde::<T>() {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!("Ignoring malformed argument, using defaults: {}", e);
            None
        }
    }
}

fn option_to_js(option: ChartOption) -> JsValue {
    JsValue::from_serde(&option).unwrap_or_else(|e| {
        error!("Failed to convert chart option: {}", e);
        JsValue::UNDEFINED
    })
}

fn init_chart(container: JsValue, chart_type: JsValue) -> JsValue {
    let Ok(container) = container.dyn_into::<HtmlElement>() else {
        warn!("initChart called without a container element");
        return JsValue::UNDEFINED;
    };
    let tag = chart_type.as_string().unwrap_or_default();
    match with_charts(|charts| charts.init_chart(&container, &tag)) {
        Ok(Some(chart)) => chart.as_js().clone(),
        Ok(None) => JsValue::UNDEFINED,
        Err(e) => {
            error!("Failed to initialize {} chart: {}", tag, e);
            JsValue::UNDEFINED
        }
    }
}

fn load_chart_data_js(chart: JsValue, url: JsValue) -> Promise {
    future_to_promise(async move {
        match (EchartsChart::from_js(chart), url.as_string()) {
            (Some(chart), Some(url)) => load_chart_data(&chart, &url).await,
            _ => error!("loadChartData needs a chart instance and a URL"),
        }
        Ok(JsValue::UNDEFINED)
    })
}

fn export_chart_js(chart: JsValue, filename: JsValue) {
    let Some(chart) = EchartsChart::from_js(chart) else {
        error!("exportChart needs a chart instance");
        return;
    };
    if let Err(e) = export_chart(&chart, filename.as_string().as_deref()) {
        error!("Failed to export chart: {}", e);
    }
}

fn create_score_chart(element_id: String, scores: JsValue) {
    let scores = optional_arg::<ScoreSet>(&scores).unwrap_or_default();
    if let Err(e) = with_charts(|charts| charts.create_score_chart(&element_id, &scores)) {
        error!("Failed to create score chart in #{}: {}", element_id, e);
    }
}

fn create_gauge_chart(element_id: String, value: JsValue, title: JsValue) {
    let title = title.as_string().unwrap_or_default();
    if let Err(e) = with_charts(|charts| charts.create_gauge_chart(&element_id, value.as_f64(), &title)) {
        error!("Failed to create gauge chart in #{}: {}", element_id, e);
    }
}
