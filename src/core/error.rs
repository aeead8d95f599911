//! Error types for the paint engine

use thiserror::Error;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    /// `paint`, `paintRectangle` or `end` issued outside an active session
    #[error("No active paint session for `{op}`; call start first")]
    NoActiveSession { op: &'static str },

    #[error("Invalid dimensions {0:?}: every axis must be positive")]
    InvalidDimensions([u32; 3]),

    #[error("Volume of {0:?} voxels does not fit in memory")]
    VolumeTooLarge([u32; 3]),

    #[error("Paint worker is no longer running")]
    WorkerClosed,

    #[error("Unexpected response to `{0}`")]
    UnexpectedResponse(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
