use std::path::PathBuf;

use thiserror::Error;

use crate::processing::engine::ElementWidth;

/// Errors raised by the transform pipeline.
///
/// Every variant is fail-fast: transform inputs are deterministic, so nothing
/// here is retried by the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// No kernel is registered for this exact length/width pair.
    #[error("no {width} transform kernel registered for length {length}")]
    UnsupportedTransformSize { width: ElementWidth, length: usize },

    /// A marshal copy would run past the end of a buffer.
    #[error("marshal range out of bounds: offset {offset} + length {length} exceeds capacity {capacity}")]
    MarshalRange {
        offset: usize,
        length: usize,
        capacity: usize,
    },

    /// An external image could not be decoded.
    #[error("could not decode {path:?}: {message}")]
    ResourceDecode { path: PathBuf, message: String },

    #[error("real plane has {real} samples but imaginary plane has {imaginary}")]
    PlaneLengthMismatch { real: usize, imaginary: usize },

    #[error("expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Pixel byte count does not match `width * height * 4`.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    PlaneSizeMismatch { expected: usize, actual: usize },

    #[error("engine buffer needs at least 2 planes, got {planes}")]
    BufferLayout { planes: usize },

    #[error("self-test failed at bin {bin}: expected magnitude {expected:.4}, got {actual:.4}")]
    SelfTestFailed {
        bin: usize,
        expected: f64,
        actual: f64,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    /// Decode failures come from untrusted input and are shown to the user
    /// as text instead of aborting the host.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, PipelineError::ResourceDecode { .. })
    }
}
