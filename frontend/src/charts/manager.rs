use gloo::events::EventListener;
use log::{debug, error, warn};
use shared::ScoreSet;
use std::cell::RefCell;
use std::collections::HashMap;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::charts::engine::{ChartEngine, ChartHandle, EchartsEngine};
use crate::charts::options::{get_gauge_option, get_score_option, ChartKind, ChartOption};
use crate::config::Config;
use crate::error::ChartError;

struct MountedChart<C: ChartHandle> {
    chart: C,
    // Dropping the listener unregisters it.
    _on_resize: Option<EventListener>,
}

impl<C: ChartHandle> Drop for MountedChart<C> {
    fn drop(&mut self) {
        self.chart.dispose();
    }
}

/// Owns every chart mounted on the page, keyed by an id stored on the
/// container element itself, together with its viewport resize listener.
pub struct ChartManager<E: ChartEngine> {
    engine: E,
    mounted: HashMap<String, MountedChart<E::Chart>>,
}

impl<E: ChartEngine> ChartManager<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            mounted: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    /// Mounts a default chart on every `.chart-container[data-chart-type]`.
    /// Returns the number of charts mounted.
    pub fn init_charts(&mut self) -> usize {
        if !self.engine.is_available() {
            error!("ECharts is not loaded, check the script include");
            return 0;
        }

        let document = gloo_utils::document();
        let containers = match document.query_selector_all(Config::CHART_CONTAINER_SELECTOR) {
            Ok(containers) => containers,
            Err(e) => {
                error!("Failed to query chart containers: {:?}", e);
                return 0;
            }
        };

        let mut count = 0;
        for index in 0..containers.length() {
            let Some(container) = containers
                .item(index)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let Some(tag) = container.get_attribute(Config::CHART_TYPE_ATTR) else {
                continue;
            };
            match self.init_chart(&container, &tag) {
                Ok(Some(_)) => count += 1,
                Ok(None) => {}
                Err(e) => error!("Failed to initialize {} chart: {}", tag, e),
            }
        }
        debug!("Initialized {} charts", count);
        count
    }

    /// Mounts the default chart for `tag`. Unknown tags are logged and skipped.
    pub fn init_chart(
        &mut self,
        container: &HtmlElement,
        tag: &str,
    ) -> Result<Option<E::Chart>, ChartError> {
        let kind = match tag.parse::<ChartKind>() {
            Ok(kind) => kind,
            Err(e) => {
                warn!("{}", e);
                return Ok(None);
            }
        };
        self.mount(container, &kind.default_option()).map(Some)
    }

    /// Radar of an assessment's six dimension scores in the element with `element_id`.
    pub fn create_score_chart(
        &mut self,
        element_id: &str,
        scores: &ScoreSet,
    ) -> Result<Option<E::Chart>, ChartError> {
        let Some(container) = find_element(element_id) else {
            return Ok(None);
        };
        if let Err(e) = scores.check() {
            warn!("Scores for #{} are out of range and will be clamped: {}", element_id, e);
        }
        self.mount(&container, &get_score_option(scores)).map(Some)
    }

    pub fn create_gauge_chart(
        &mut self,
        element_id: &str,
        value: Option<f64>,
        title: &str,
    ) -> Result<Option<E::Chart>, ChartError> {
        let Some(container) = find_element(element_id) else {
            return Ok(None);
        };
        self.mount(&container, &get_gauge_option(value, title)).map(Some)
    }

    /// Creates an instance on `container`, applies `option` and keeps it sized
    /// to the viewport until the container is disposed. A container that
    /// already holds a chart is torn down first.
    pub fn mount(
        &mut self,
        container: &HtmlElement,
        option: &ChartOption,
    ) -> Result<E::Chart, ChartError> {
        let id = chart_id(container)?;
        if self.mounted.remove(&id).is_some() {
            debug!("Replacing chart {}", id);
        }

        let chart = self.engine.init(container)?;
        if let Err(e) = chart.set_option(option) {
            chart.dispose();
            return Err(e);
        }

        let on_resize = web_sys::window().map(|window| {
            let chart = chart.clone();
            EventListener::new(&window, "resize", move |_| chart.resize())
        });

        debug!("Mounted chart {}", id);
        self.mounted.insert(
            id,
            MountedChart {
                chart: chart.clone(),
                _on_resize: on_resize,
            },
        );
        Ok(chart)
    }

    /// Unregisters the resize listener and disposes the chart on `container`.
    /// Returns false if nothing was mounted there.
    pub fn dispose_chart(&mut self, container: &HtmlElement) -> bool {
        let Some(id) = mounted_id(container) else {
            return false;
        };
        let removed = self.mounted.remove(&id).is_some();
        if removed {
            debug!("Disposed chart {}", id);
        }
        removed
    }

    pub fn dispose_all(&mut self) {
        self.mounted.clear();
    }
}

fn mounted_id(container: &HtmlElement) -> Option<String> {
    js_sys::Reflect::get(container, &JsValue::from_str(Config::CHART_ID_PROPERTY))
        .ok()
        .and_then(|id| id.as_string())
}

fn chart_id(container: &HtmlElement) -> Result<String, ChartError> {
    if let Some(id) = mounted_id(container) {
        return Ok(id);
    }
    let id = uuid::Uuid::new_v4().to_string();
    js_sys::Reflect::set(
        container,
        &JsValue::from_str(Config::CHART_ID_PROPERTY),
        &JsValue::from_str(&id),
    )
    .map_err(|e| ChartError::Dom(crate::error::js_error_message(&e)))?;
    Ok(id)
}

fn find_element(element_id: &str) -> Option<HtmlElement> {
    gloo_utils::document()
        .get_element_by_id(element_id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

thread_local! {
    static CHARTS: RefCell<ChartManager<EchartsEngine>> =
        RefCell::new(ChartManager::new(EchartsEngine));
}

/// Runs `f` against the page's chart manager.
pub fn with_charts<R>(f: impl FnOnce(&mut ChartManager<EchartsEngine>) -> R) -> R {
    CHARTS.with(|charts| f(&mut charts.borrow_mut()))
}
