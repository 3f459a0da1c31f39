//! Fast Fourier transforms over sample buffers and canvas pixels, with the
//! plotting, distortion and image plumbing the demo hosts need.

pub mod data;
pub mod error;
pub mod export;
pub mod logging;
pub mod processing;
pub mod rendering;
pub mod settings;

pub use error::{PipelineError, Result};
pub use settings::Settings;
