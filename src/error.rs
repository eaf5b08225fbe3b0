//! Error types for startup and configuration

use thiserror::Error;

/// Failures while fetching or decoding sprite sheets
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to fetch {path}: {reason}")]
    FetchFailed { path: String, reason: String },

    #[error("Unexpected HTTP status {status} for {path}")]
    BadStatus { path: String, status: u16 },

    #[error("Failed to decode {path}: {source}")]
    DecodeFailed {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Asset not loaded: {0}")]
    NotLoaded(String),
}

/// Failures while reading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("Invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Failures while setting up the GPU renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Surface reports no supported formats")]
    NoSurfaceFormat,

    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Failures while bringing the game up in the browser
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Missing page element: {0}")]
    MissingElement(&'static str),

    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("No suitable GPU adapter: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
