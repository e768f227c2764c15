use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use shared::{ScoreSet, SCORE_DIMENSIONS};
use std::fmt;
use std::str::FromStr;

/// Declarative option object handed to the chart engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartOption(Value);

impl ChartOption {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn first_series_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.0
            .get_mut("series")
            .and_then(first_component_mut)
    }

    /// The x axis is an object in built options and an array of objects in
    /// options read back from the engine.
    pub fn x_axis_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.0.get_mut("xAxis").and_then(first_component_mut)
    }

    /// `type` tags of every series, in order.
    pub fn series_types(&self) -> Vec<&str> {
        match self.0.get("series") {
            Some(Value::Array(series)) => series
                .iter()
                .filter_map(|s| s.get("type").and_then(Value::as_str))
                .collect(),
            Some(Value::Object(series)) => series
                .get("type")
                .and_then(Value::as_str)
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn first_component_mut(value: &mut Value) -> Option<&mut Map<String, Value>> {
    match value {
        Value::Array(items) => items.first_mut().and_then(Value::as_object_mut),
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Chart kinds that a container can request through `data-chart-type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Radar,
    Bar,
    Pie,
    Line,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Radar => "radar",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
        }
    }

    pub fn default_option(&self) -> ChartOption {
        match self {
            ChartKind::Radar => get_radar_option(None),
            ChartKind::Bar => get_bar_option(None),
            ChartKind::Pie => get_pie_option(None),
            ChartKind::Line => get_line_option(None),
        }
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "radar" => Ok(ChartKind::Radar),
            "bar" => Ok(ChartKind::Bar),
            "pie" => Ok(ChartKind::Pie),
            "line" => Ok(ChartKind::Line),
            other => Err(format!("Unknown chart type: {}", other)),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarEntry {
    pub value: Vec<f64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarData {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub value: f64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineData {
    pub legend: Vec<String>,
    pub categories: Vec<String>,
    pub series: Vec<LineSeries>,
}

pub const QUALITY_DIMENSIONS: [&str; 5] =
    ["Completeness", "Accuracy", "Consistency", "Timeliness", "Usability"];

const RADAR_INDICATOR_COUNT: usize = QUALITY_DIMENSIONS.len();

pub const EXCELLENT_COLOR: &str = "#1cc88a";
pub const GOOD_COLOR: &str = "#36b9cc";
pub const FAIR_COLOR: &str = "#f6c23e";
pub const POOR_COLOR: &str = "#e74a3b";
pub const SCORE_ACCENT_COLOR: &str = "#4e73df";

/// Lower bounds (inclusive) of the scored colour tiers, best first.
/// Anything below the last bound is `POOR_COLOR`.
pub const SCORE_TIERS: [(f64, &str); 3] =
    [(90.0, EXCELLENT_COLOR), (80.0, GOOD_COLOR), (70.0, FAIR_COLOR)];

pub fn score_color(value: f64) -> &'static str {
    SCORE_TIERS
        .iter()
        .find(|(floor, _)| value >= *floor)
        .map(|(_, color)| *color)
        .unwrap_or(POOR_COLOR)
}

// Same tiers as `score_color`, expressed so the engine recolours bars whenever
// their data changes.
fn score_visual_map() -> Value {
    let mut pieces = Vec::with_capacity(SCORE_TIERS.len() + 1);
    let mut ceiling: Option<f64> = None;
    for (floor, color) in SCORE_TIERS {
        let mut piece = json!({ "gte": floor, "color": color });
        if let Some(lt) = ceiling {
            piece["lt"] = json!(lt);
        }
        pieces.push(piece);
        ceiling = Some(floor);
    }
    // `ceiling` holds the lowest tier floor once the loop is done
    pieces.push(json!({ "lt": ceiling.unwrap_or(0.0), "color": POOR_COLOR }));

    json!({
        "type": "piecewise",
        "show": false,
        "seriesIndex": 0,
        "dimension": 1,
        "pieces": pieces
    })
}

pub fn get_radar_option(data: Option<&[RadarEntry]>) -> ChartOption {
    let entries = match data {
        Some(entries) if entries.iter().all(|e| e.value.len() == RADAR_INDICATOR_COUNT) => {
            json!(entries)
        }
        Some(_) => {
            debug!("Radar data has entries without {} values, using sample data", RADAR_INDICATOR_COUNT);
            default_radar_data()
        }
        None => default_radar_data(),
    };

    let indicator: Vec<Value> = QUALITY_DIMENSIONS
        .iter()
        .map(|name| json!({ "name": name, "max": 100 }))
        .collect();

    ChartOption::new(json!({
        "title": { "text": "Data Quality Assessment", "left": "center" },
        "tooltip": { "trigger": "item" },
        "legend": { "data": ["Current Assessment"], "bottom": 10 },
        "radar": { "indicator": indicator },
        "series": [{
            "name": "Data Quality",
            "type": "radar",
            "data": entries
        }]
    }))
}

fn default_radar_data() -> Value {
    json!([{ "value": [85, 90, 78, 92, 88], "name": "Current Assessment" }])
}

pub fn get_bar_option(data: Option<&BarData>) -> ChartOption {
    let (categories, values) = match data {
        Some(bar) if bar.categories.len() == bar.values.len() => {
            (json!(bar.categories), json!(bar.values))
        }
        Some(bar) => {
            debug!(
                "Bar data has {} categories but {} values, using sample data",
                bar.categories.len(),
                bar.values.len()
            );
            default_bar_data()
        }
        None => default_bar_data(),
    };

    ChartOption::new(json!({
        "title": { "text": "Indicator Scores", "left": "center" },
        "tooltip": { "trigger": "axis", "axisPointer": { "type": "shadow" } },
        "grid": { "left": "3%", "right": "4%", "bottom": "3%", "containLabel": true },
        "visualMap": score_visual_map(),
        "xAxis": { "type": "category", "data": categories },
        "yAxis": { "type": "value", "max": 100 },
        "series": [{
            "name": "Score",
            "type": "bar",
            "data": values,
            "label": { "show": true, "position": "top", "formatter": "{c}" }
        }]
    }))
}

fn default_bar_data() -> (Value, Value) {
    (json!(QUALITY_DIMENSIONS), json!([85, 90, 78, 92, 88]))
}

pub fn get_pie_option(data: Option<&[PieSlice]>) -> ChartOption {
    let slices = match data {
        Some(slices) => json!(slices),
        None => json!([
            { "value": 35, "name": "Excellent (90-100)" },
            { "value": 40, "name": "Good (80-89)" },
            { "value": 20, "name": "Fair (70-79)" },
            { "value": 5, "name": "Needs Improvement (<70)" }
        ]),
    };

    ChartOption::new(json!({
        "title": { "text": "Quality Grade Distribution", "left": "center" },
        "tooltip": { "trigger": "item", "formatter": "{a} <br/>{b}: {c} ({d}%)" },
        "legend": { "orient": "vertical", "left": "left" },
        "series": [{
            "name": "Quality Grade",
            "type": "pie",
            "radius": ["40%", "70%"],
            "avoidLabelOverlap": false,
            "itemStyle": { "borderRadius": 10, "borderColor": "#fff", "borderWidth": 2 },
            "label": { "show": false, "position": "center" },
            "emphasis": {
                "label": { "show": true, "fontSize": "18", "fontWeight": "bold" }
            },
            "labelLine": { "show": false },
            "data": slices
        }]
    }))
}

pub fn get_line_option(data: Option<&LineData>) -> ChartOption {
    let valid = data.filter(|line| {
        let ok = line
            .series
            .iter()
            .all(|s| s.data.len() == line.categories.len());
        if !ok {
            debug!("Line series lengths differ from {} categories, using sample data", line.categories.len());
        }
        ok
    });

    let (legend, categories, series) = match valid {
        Some(line) => (
            json!(line.legend),
            json!(line.categories),
            line.series
                .iter()
                .map(|s| line_series(&s.name, json!(s.data)))
                .collect::<Vec<_>>(),
        ),
        None => default_line_data(),
    };

    ChartOption::new(json!({
        "title": { "text": "Assessment History", "left": "center" },
        "tooltip": { "trigger": "axis" },
        "legend": { "data": legend, "bottom": 10 },
        "grid": { "left": "3%", "right": "4%", "bottom": "15%", "containLabel": true },
        "xAxis": { "type": "category", "boundaryGap": false, "data": categories },
        "yAxis": { "type": "value", "max": 100 },
        "series": Value::Array(series)
    }))
}

fn line_series(name: &str, data: Value) -> Value {
    json!({ "name": name, "type": "line", "smooth": true, "data": data })
}

fn default_line_data() -> (Value, Value, Vec<Value>) {
    (
        json!(["Completeness", "Accuracy", "Consistency"]),
        json!(["Run 1", "Run 2", "Run 3", "Run 4", "Current"]),
        vec![
            line_series("Completeness", json!([78, 82, 85, 83, 85])),
            line_series("Accuracy", json!([85, 88, 90, 87, 90])),
            line_series("Consistency", json!([72, 75, 78, 76, 78])),
        ],
    )
}

/// Six-dimension radar of one assessment's scores.
pub fn get_score_option(scores: &ScoreSet) -> ChartOption {
    let indicator: Vec<Value> = SCORE_DIMENSIONS
        .iter()
        .map(|name| json!({ "name": name, "max": 100 }))
        .collect();

    ChartOption::new(json!({
        "radar": { "indicator": indicator },
        "series": [{
            "type": "radar",
            "data": [{
                "value": scores.clamped_values(),
                "name": "Score",
                "areaStyle": { "color": "rgba(78, 115, 223, 0.3)" },
                "lineStyle": { "color": SCORE_ACCENT_COLOR, "width": 2 },
                "itemStyle": { "color": SCORE_ACCENT_COLOR }
            }]
        }]
    }))
}

/// Progress gauge banded red, yellow and green.
pub fn get_gauge_option(value: Option<f64>, title: &str) -> ChartOption {
    let value = value.filter(|v| !v.is_nan()).unwrap_or(0.0);

    ChartOption::new(json!({
        "title": { "text": title, "left": "center" },
        "series": [{
            "type": "gauge",
            "progress": { "show": true, "width": 18 },
            "axisLine": {
                "lineStyle": {
                    "width": 18,
                    "color": [[0.4, POOR_COLOR], [0.7, FAIR_COLOR], [1, EXCELLENT_COLOR]]
                }
            },
            "axisTick": { "show": false },
            "splitLine": { "show": false },
            "axisLabel": { "show": false },
            "anchor": { "show": false },
            "pointer": { "show": false },
            "detail": {
                "valueAnimation": true,
                "fontSize": 30,
                "offsetCenter": [0, "70%"],
                "formatter": "{value}",
                "color": "inherit"
            },
            "data": [{ "value": value }]
        }]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(95.0, EXCELLENT_COLOR)]
    #[case(90.0, EXCELLENT_COLOR)]
    #[case(89.99, GOOD_COLOR)]
    #[case(85.0, GOOD_COLOR)]
    #[case(80.0, GOOD_COLOR)]
    #[case(75.0, FAIR_COLOR)]
    #[case(70.0, FAIR_COLOR)]
    #[case(69.5, POOR_COLOR)]
    #[case(50.0, POOR_COLOR)]
    fn test_score_color_tiers(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(score_color(value), expected);
    }

    #[test]
    fn test_visual_map_matches_score_tiers() {
        let option = get_bar_option(None);
        let pieces = option.as_value()["visualMap"]["pieces"].as_array().unwrap().clone();

        assert_eq!(
            pieces,
            vec![
                json!({ "gte": 90.0, "color": EXCELLENT_COLOR }),
                json!({ "gte": 80.0, "lt": 90.0, "color": GOOD_COLOR }),
                json!({ "gte": 70.0, "lt": 80.0, "color": FAIR_COLOR }),
                json!({ "lt": 70.0, "color": POOR_COLOR }),
            ]
        );
        assert_eq!(option.as_value()["visualMap"]["show"], json!(false));
    }

    #[test]
    fn test_radar_defaults() {
        let option = get_radar_option(None);
        let value = option.as_value();

        assert_eq!(value["radar"]["indicator"].as_array().unwrap().len(), 5);
        for indicator in value["radar"]["indicator"].as_array().unwrap() {
            assert_eq!(indicator["max"], json!(100));
        }
        assert_eq!(value["series"][0]["type"], json!("radar"));
        assert_eq!(
            value["series"][0]["data"],
            json!([{ "value": [85, 90, 78, 92, 88], "name": "Current Assessment" }])
        );
    }

    #[test]
    fn test_radar_with_data() {
        let entries = vec![RadarEntry { value: vec![1.0, 2.0, 3.0, 4.0, 5.0], name: "Run".to_string() }];
        let option = get_radar_option(Some(&entries));

        assert_eq!(
            option.as_value()["series"][0]["data"],
            json!([{ "value": [1.0, 2.0, 3.0, 4.0, 5.0], "name": "Run" }])
        );
    }

    #[test]
    fn test_radar_with_short_entry_falls_back() {
        let entries = vec![RadarEntry { value: vec![1.0, 2.0], name: "Short".to_string() }];
        assert_eq!(get_radar_option(Some(&entries)), get_radar_option(None));
    }

    #[test]
    fn test_bar_defaults() {
        let option = get_bar_option(None);
        let value = option.as_value();

        assert_eq!(value["xAxis"]["type"], json!("category"));
        assert_eq!(value["xAxis"]["data"], json!(QUALITY_DIMENSIONS));
        assert_eq!(value["series"][0]["data"], json!([85, 90, 78, 92, 88]));
        assert_eq!(value["series"][0]["label"]["position"], json!("top"));
        assert_eq!(value["series"][0]["label"]["formatter"], json!("{c}"));
        assert_eq!(value["yAxis"]["max"], json!(100));
    }

    #[test]
    fn test_bar_with_data() {
        let data = BarData {
            categories: vec!["a".to_string(), "b".to_string()],
            values: vec![10.0, 20.0],
        };
        let option = get_bar_option(Some(&data));

        assert_eq!(option.as_value()["xAxis"]["data"], json!(["a", "b"]));
        assert_eq!(option.as_value()["series"][0]["data"], json!([10.0, 20.0]));
    }

    #[test]
    fn test_bar_with_mismatched_lengths_falls_back() {
        let data = BarData { categories: vec!["a".to_string()], values: vec![1.0, 2.0] };
        assert_eq!(get_bar_option(Some(&data)), get_bar_option(None));
    }

    #[test]
    fn test_pie_defaults() {
        let option = get_pie_option(None);
        let series = &option.as_value()["series"][0];

        assert_eq!(series["type"], json!("pie"));
        assert_eq!(series["radius"], json!(["40%", "70%"]));
        assert_eq!(series["emphasis"]["label"]["show"], json!(true));
        let total: f64 = series["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|slice| slice["value"].as_f64().unwrap())
            .sum();
        assert_eq!(total, 100.0);
        assert_eq!(series["data"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_pie_with_data() {
        let slices = vec![PieSlice { value: 60.0, name: "Int".to_string() }];
        let option = get_pie_option(Some(&slices));
        assert_eq!(option.as_value()["series"][0]["data"], json!([{ "value": 60.0, "name": "Int" }]));
    }

    #[test]
    fn test_line_defaults() {
        let option = get_line_option(None);
        let value = option.as_value();

        assert_eq!(option.series_types(), vec!["line", "line", "line"]);
        assert_eq!(value["legend"]["data"], json!(["Completeness", "Accuracy", "Consistency"]));
        let categories = value["xAxis"]["data"].as_array().unwrap().len();
        for series in value["series"].as_array().unwrap() {
            assert_eq!(series["smooth"], json!(true));
            assert_eq!(series["data"].as_array().unwrap().len(), categories);
        }
    }

    #[test]
    fn test_line_with_data() {
        let data = LineData {
            legend: vec!["Score".to_string()],
            categories: vec!["Jan".to_string(), "Feb".to_string()],
            series: vec![LineSeries { name: "Score".to_string(), data: vec![70.0, 75.0] }],
        };
        let option = get_line_option(Some(&data));

        assert_eq!(
            option.as_value()["series"],
            json!([{ "name": "Score", "type": "line", "smooth": true, "data": [70.0, 75.0] }])
        );
        assert_eq!(option.as_value()["xAxis"]["data"], json!(["Jan", "Feb"]));
    }

    #[test]
    fn test_line_with_ragged_series_falls_back() {
        let data = LineData {
            legend: vec!["Score".to_string()],
            categories: vec!["Jan".to_string()],
            series: vec![LineSeries { name: "Score".to_string(), data: vec![70.0, 75.0] }],
        };
        assert_eq!(get_line_option(Some(&data)), get_line_option(None));
    }

    #[test]
    fn test_score_option_uses_six_dimensions() {
        let scores = ScoreSet { quality: Some(88.0), business_value: Some(140.0), ..Default::default() };
        let option = get_score_option(&scores);

        assert_eq!(option.as_value()["radar"]["indicator"].as_array().unwrap().len(), 6);
        assert_eq!(
            option.as_value()["series"][0]["data"][0]["value"],
            json!([88.0, 0.0, 0.0, 0.0, 0.0, 100.0])
        );
    }

    #[test]
    fn test_gauge_option() {
        let option = get_gauge_option(Some(72.5), "Overall Value");
        assert_eq!(option.as_value()["title"]["text"], json!("Overall Value"));
        assert_eq!(option.as_value()["series"][0]["data"], json!([{ "value": 72.5 }]));
        assert_eq!(option.series_types(), vec!["gauge"]);

        let empty = get_gauge_option(None, "Overall Value");
        assert_eq!(empty.as_value()["series"][0]["data"], json!([{ "value": 0.0 }]));
    }

    #[test]
    fn test_chart_kind_parsing() {
        assert_eq!("radar".parse::<ChartKind>(), Ok(ChartKind::Radar));
        assert_eq!("line".parse::<ChartKind>(), Ok(ChartKind::Line));
        assert!("gauge".parse::<ChartKind>().is_err());
        assert_eq!(ChartKind::Pie.default_option(), get_pie_option(None));
    }

    #[test]
    fn test_accessors_handle_engine_shaped_options() {
        let mut option = ChartOption::new(json!({
            "xAxis": [{ "type": "category", "data": ["x"] }],
            "series": [{ "type": "bar", "data": [1] }]
        }));

        assert_eq!(option.x_axis_mut().unwrap()["data"], json!(["x"]));
        assert_eq!(option.first_series_mut().unwrap()["data"], json!([1]));

        let mut empty = ChartOption::new(json!({ "series": [] }));
        assert!(empty.first_series_mut().is_none());
        assert!(empty.x_axis_mut().is_none());
    }
}
