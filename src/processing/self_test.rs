use tracing::info;

use super::engine::TransformEngine;
use super::pipeline::SpectrumPipeline;
use super::signal_gen::{SignalKind, synthesize};
use crate::error::{PipelineError, Result};

const LENGTH: usize = 16;
const TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct SelfTestReport {
    pub length: usize,
    /// Bins expected to hold the tone: one cycle per buffer and its mirror.
    pub peak_bins: [usize; 2],
    pub peak_magnitude: f64,
    /// Largest magnitude outside the peak bins.
    pub max_leakage: f64,
}

/// Push a 16-sample sine through the 16-point kernel and check the spectrum.
///
/// Hosts call this once at startup.
pub fn run_self_test(engine: &TransformEngine) -> Result<SelfTestReport> {
    let mut pipeline = SpectrumPipeline::<f64>::new(engine.clone(), LENGTH)?;
    let mags = pipeline.magnitude_spectrum(&synthesize(LENGTH, &SignalKind::Sine))?;

    let expected = LENGTH as f64 / 2.0;
    let peak_bins = [1, LENGTH - 1];
    let mut max_leakage = 0.0f64;

    for (bin, magnitude) in mags.iter().enumerate() {
        if peak_bins.contains(&bin) {
            if (magnitude - expected).abs() > TOLERANCE {
                return Err(PipelineError::SelfTestFailed {
                    bin,
                    expected,
                    actual: magnitude,
                });
            }
        } else if magnitude > TOLERANCE {
            return Err(PipelineError::SelfTestFailed {
                bin,
                expected: 0.0,
                actual: magnitude,
            });
        } else {
            max_leakage = max_leakage.max(magnitude);
        }
    }

    let report = SelfTestReport {
        length: LENGTH,
        peak_bins,
        peak_magnitude: mags.values()[1],
        max_leakage,
    };
    info!(
        peak = report.peak_magnitude,
        leakage = report.max_leakage,
        "transform self-test passed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::engine::{ElementWidth, KernelRegistry};

    #[test]
    fn passes_on_standard_engine() {
        let report = run_self_test(&TransformEngine::default()).unwrap();
        assert_eq!(report.peak_bins, [1, 15]);
        assert!((report.peak_magnitude - 8.0).abs() < 1e-9);
        assert!(report.max_leakage < 1e-9);
    }

    #[test]
    fn fails_when_the_sixteen_point_kernel_is_missing() {
        let mut registry = KernelRegistry::empty();
        registry.register(ElementWidth::Double, 64).unwrap();

        let err = run_self_test(&TransformEngine::new(registry)).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedTransformSize { length: 16, .. }));
    }
}
