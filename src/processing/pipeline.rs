use tracing::{debug, info};

use super::engine::{
    Precision, STANDARD_PLANES, TransformEngine, TransformHandle, pack_into, unpack_from,
};
use crate::data::{MagnitudeSeries, PixelPlane, SampleBuffer};
use crate::error::{PipelineError, Result};

/// Pack → transform → unpack → reduce over one engine buffer.
///
/// The pipeline owns exactly one buffer/handle pair, sized for the current
/// working length. Every call takes `&mut self`, so there is only ever one
/// writer. [`SpectrumPipeline::reconfigure`] throws the pair away and builds
/// a new one; nothing is resized in place.
#[derive(Debug)]
pub struct SpectrumPipeline<T: Precision = f64> {
    engine: TransformEngine,
    handle: TransformHandle<T>,
}

/// Single-precision pipeline.
pub type SpectrumPipelineF32 = SpectrumPipeline<f32>;

impl<T: Precision> SpectrumPipeline<T> {
    pub fn new(engine: TransformEngine, length: usize) -> Result<Self> {
        let handle = build_handle(&engine, length)?;
        info!(length, width = %T::WIDTH, "spectrum pipeline ready");
        Ok(Self { engine, handle })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handle.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handle.is_empty()
    }

    /// Rebuild for a new working length. A no-op when the length is
    /// unchanged. On failure the current pair is kept.
    pub fn reconfigure(&mut self, length: usize) -> Result<()> {
        if length == self.len() {
            return Ok(());
        }
        let handle = build_handle(&self.engine, length)?;
        info!(from = self.len(), to = length, "spectrum pipeline resized");
        self.handle = handle;
        Ok(())
    }

    /// Unnormalised forward transform of `samples`, which must hold exactly
    /// `len()` samples per plane.
    pub fn forward(&mut self, samples: &SampleBuffer) -> Result<SampleBuffer> {
        let n = self.len();
        if samples.len() != n {
            return Err(PipelineError::LengthMismatch {
                expected: n,
                actual: samples.len(),
            });
        }

        let buffer = self.handle.buffer_mut();
        pack_into(samples.real(), buffer, n, 0)?;
        pack_into(samples.imaginary(), buffer, n, n)?;

        self.handle.transform();

        let mut out = SampleBuffer::zeroed(n);
        let (real, imag) = out.planes_mut();
        unpack_from(self.handle.buffer(), real, n, 0)?;
        unpack_from(self.handle.buffer(), imag, n, n)?;
        debug!(length = n, "forward transform");
        Ok(out)
    }

    pub fn magnitude_spectrum(&mut self, samples: &SampleBuffer) -> Result<MagnitudeSeries> {
        let spectrum = self.forward(samples)?;
        Ok(MagnitudeSeries::from_samples(&spectrum))
    }

    /// Inverse transform built from the forward kernel:
    /// `x = conj(F(conj(X))) / N`.
    pub fn inverse(&mut self, spectrum: &SampleBuffer) -> Result<SampleBuffer> {
        let n = self.len();
        let forward = self.forward(&spectrum.conjugated())?;
        Ok(forward.conjugated().scaled(1.0 / n as f64))
    }

    /// Magnitude spectrum of a pixel plane whose pixel count is `len()`.
    pub fn transform_pixels(&mut self, plane: &PixelPlane) -> Result<MagnitudeSeries> {
        if plane.pixel_count() != self.len() {
            return Err(PipelineError::PlaneSizeMismatch {
                expected: self.len() * PixelPlane::CHANNELS,
                actual: plane.data().len(),
            });
        }
        self.magnitude_spectrum(&plane.to_samples())
    }
}

fn build_handle<T: Precision>(engine: &TransformEngine, length: usize) -> Result<TransformHandle<T>> {
    let buffer = engine.allocate::<T>(length, STANDARD_PLANES);
    Ok(engine.bind(buffer)?.init())
}
