pub mod engine;
pub mod export;
pub mod manager;
pub mod options;
pub mod update;

pub use engine::{ChartEngine, ChartHandle, EchartsChart, EchartsEngine};
pub use export::export_chart;
pub use manager::{with_charts, ChartManager};
pub use options::{
    get_bar_option, get_gauge_option, get_line_option, get_pie_option, get_radar_option,
    get_score_option, score_color, BarData, ChartKind, ChartOption, LineData, LineSeries,
    PieSlice, RadarEntry,
};
pub use update::{
    apply_chart_payload, apply_chart_update, load_chart_data, merge_update, MergeOutcome,
};
