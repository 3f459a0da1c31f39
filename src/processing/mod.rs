pub mod distortion;
pub mod engine;
pub mod magnitude;
pub mod pipeline;
pub mod rate_limiter;
pub mod scene;
pub mod self_test;
pub mod signal_gen;
pub mod sizing;

pub use distortion::{DistortionFilter, DistortionOutcome, calc_weird};
pub use engine::{ElementWidth, KernelRegistry, TransformEngine};
pub use pipeline::{SpectrumPipeline, SpectrumPipelineF32};
pub use rate_limiter::RateLimiter;
pub use scene::{SignalScene, SignalSceneOutput, render_image_spectrum, render_signal_scene};
pub use self_test::{SelfTestReport, run_self_test};
pub use signal_gen::{SignalKind, synthesize};
