use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::charts::options::ChartOption;
use crate::error::ChartError;

/// A live chart bound to one container.
pub trait ChartHandle {
    fn set_option(&self, option: &ChartOption) -> Result<(), ChartError>;
    fn get_option(&self) -> Result<ChartOption, ChartError>;
    fn resize(&self);
    fn dispose(&self);
    /// Renders the chart as a PNG data URL.
    fn data_url(&self, pixel_ratio: f64, background: &str) -> Result<String, ChartError>;
}

/// Creates chart instances. Implemented by the ECharts binding and by test doubles.
pub trait ChartEngine {
    type Chart: ChartHandle + Clone + 'static;

    fn is_available(&self) -> bool {
        true
    }

    fn init(&self, container: &HtmlElement) -> Result<Self::Chart, ChartError>;
}

#[wasm_bindgen]
extern "C" {
    /// An `echarts.ECharts` instance.
    #[wasm_bindgen(typescript_type = "ECharts")]
    #[derive(Debug, Clone)]
    pub type EchartsInstance;

    #[wasm_bindgen(catch, js_namespace = echarts, js_name = init)]
    fn echarts_init(container: &HtmlElement) -> Result<EchartsInstance, JsValue>;

    #[wasm_bindgen(catch, method, js_name = setOption)]
    fn js_set_option(this: &EchartsInstance, option: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, method, js_name = getOption)]
    fn js_get_option(this: &EchartsInstance) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = resize)]
    fn js_resize(this: &EchartsInstance);

    #[wasm_bindgen(method, js_name = dispose)]
    fn js_dispose(this: &EchartsInstance);

    #[wasm_bindgen(catch, method, js_name = getDataURL)]
    fn js_get_data_url(this: &EchartsInstance, opts: &JsValue) -> Result<String, JsValue>;
}

#[derive(Debug, Clone)]
pub struct EchartsChart {
    inner: EchartsInstance,
}

impl EchartsChart {
    /// Wraps an instance handed in from page scripts.
    pub fn from_js(value: JsValue) -> Option<Self> {
        let looks_like_chart = value.is_object()
            && Reflect::get(&value, &JsValue::from_str("setOption"))
                .map(|f| f.is_function())
                .unwrap_or(false);
        looks_like_chart.then(|| Self { inner: value.unchecked_into() })
    }

    pub fn as_js(&self) -> &JsValue {
        self.inner.as_ref()
    }
}

impl ChartHandle for EchartsChart {
    fn set_option(&self, option: &ChartOption) -> Result<(), ChartError> {
        let js_option = JsValue::from_serde(option)?;
        self.inner.js_set_option(&js_option)?;
        Ok(())
    }

    fn get_option(&self) -> Result<ChartOption, ChartError> {
        let js_option = self.inner.js_get_option()?;
        Ok(js_option.into_serde::<ChartOption>()?)
    }

    fn resize(&self) {
        self.inner.js_resize();
    }

    fn dispose(&self) {
        self.inner.js_dispose();
    }

    fn data_url(&self, pixel_ratio: f64, background: &str) -> Result<String, ChartError> {
        let opts = Object::new();
        Reflect::set(&opts, &"pixelRatio".into(), &JsValue::from_f64(pixel_ratio))?;
        Reflect::set(&opts, &"backgroundColor".into(), &JsValue::from_str(background))?;
        Ok(self.inner.js_get_data_url(&opts)?)
    }
}

/// The page-global `echarts` library.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchartsEngine;

impl ChartEngine for EchartsEngine {
    type Chart = EchartsChart;

    fn is_available(&self) -> bool {
        web_sys::window()
            .map(|window| Reflect::has(&window, &JsValue::from_str("echarts")).unwrap_or(false))
            .unwrap_or(false)
    }

    fn init(&self, container: &HtmlElement) -> Result<Self::Chart, ChartError> {
        if !self.is_available() {
            return Err(ChartError::EngineUnavailable);
        }
        let inner = echarts_init(container)?;
        Ok(EchartsChart { inner })
    }
}
