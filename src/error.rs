//! Error types for the fallible edges of the game
//!
//! The simulation itself never fails; these cover loading configuration,
//! setting up the GPU and spending eggs.

use thiserror::Error;

/// Failure to read a level or settings document
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),
}

/// Failure to bring up the WebGPU surface
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter: {0}")]
    Adapter(String),

    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface has no supported formats")]
    NoSurfaceFormat,
}

/// Rejected progression change
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
    #[error("unknown character {0:?}")]
    UnknownCharacter(String),

    #[error("character {0:?} is already unlocked")]
    AlreadyOwned(String),

    #[error("character {0:?} is locked")]
    Locked(String),

    #[error("need {price} eggs, have {available}")]
    InsufficientEggs { price: u32, available: u32 },

    #[error("level {0} is locked")]
    LevelLocked(u32),
}
