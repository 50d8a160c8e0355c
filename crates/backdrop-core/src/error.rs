use thiserror::Error;

/// Failures surfaced by the engine. All of them are recoverable by rendering
/// nothing; none should ever reach page content.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotionError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("raster buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("invalid value {value:?} for `{key}`")]
    InvalidConfig { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, MotionError>;
