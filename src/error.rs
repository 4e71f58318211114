//! Error types for the edges of the crate (config files, layout images)
//!
//! The simulation itself never fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArcadeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("layout mask must be {expected_w}x{expected_h} pixels, got {actual_w}x{actual_h}")]
    LayoutSize {
        expected_w: usize,
        expected_h: usize,
        actual_w: usize,
        actual_h: usize,
    },
}

pub type Result<T> = std::result::Result<T, ArcadeError>;
