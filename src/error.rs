//! Crowd errors
//!
//! Everything here is recoverable: the crowd is decoration, so callers log
//! the error and leave the canvas blank.

use thiserror::Error;

/// Crowd canvas errors
#[derive(Debug, Error)]
pub enum CrowdError {
    #[error("Invalid sprite grid: {rows}x{cols}")]
    InvalidGrid { rows: u32, cols: u32 },

    #[error("Sprite sheet not decoded (size {width}x{height})")]
    ImageNotDecoded { width: f32, height: f32 },

    #[error("Invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("Settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Browser unavailable: {0}")]
    Platform(String),
}
