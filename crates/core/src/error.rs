use thiserror::Error;

/// Programmer errors the simulation refuses to run with.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PhysicsError {
    #[error("dimensions must be positive and finite, got {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("elapsed time must be positive, got {0}")]
    NonPositiveDuration(f32),

    #[error("elapsed time must be finite, got {0}")]
    NonFiniteDuration(f32),

    #[error("parameter `{name}` out of range: {value}")]
    InvalidParam { name: &'static str, value: f32 },
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("malformed scene document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Physics(#[from] PhysicsError),
}
