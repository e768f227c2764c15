pub mod models {
    pub mod scores;
}

pub mod dto {
    pub mod common;
    pub mod preview;
    pub mod chart_update;
}

pub mod error;

// Re-export commonly used items
pub use error::{SharedError, Result};

// Re-export models
pub use models::scores::{ScoreSet, SCORE_DIMENSIONS, SCORE_MAX, SCORE_MIN};

// Re-export DTOs
pub use dto::{
    common::ErrorResponse,
    preview::{PreviewPayload, PreviewResponse, PreviewRow},
    chart_update::{ChartUpdate, ChartUpdatePayload},
};
