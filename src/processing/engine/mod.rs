pub mod buffer;
pub mod marshal;
pub mod registry;

use std::fmt;
use std::sync::Arc;

use rustfft::Fft;
use rustfft::num_complex::Complex;
use tracing::debug;

use crate::error::{PipelineError, Result};

pub use buffer::{ElementWidth, EngineBuffer, Precision, STANDARD_PLANES};
pub use marshal::{pack_into, unpack_from};
pub use registry::{Kernel, KernelRegistry};

/// Allocates engine buffers and binds them to registered kernels.
///
/// Cloning is cheap; clones share the same registry.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    registry: Arc<KernelRegistry>,
}

impl TransformEngine {
    pub fn new(registry: KernelRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &KernelRegistry {
        &self.registry
    }

    /// Zero-filled buffer of `length * planes` elements.
    pub fn allocate<T: Precision>(&self, length: usize, planes: usize) -> EngineBuffer<T> {
        EngineBuffer::zeroed(length, planes)
    }

    /// Select the kernel for `(T::WIDTH, buffer.len())` and take ownership of
    /// the buffer. The result must be initialised before it can transform.
    pub fn bind<T: Precision>(&self, buffer: EngineBuffer<T>) -> Result<BoundKernel<T>> {
        if buffer.planes() < STANDARD_PLANES {
            return Err(PipelineError::BufferLayout {
                planes: buffer.planes(),
            });
        }
        let kernel = self.registry.lookup(T::WIDTH, buffer.len())?;
        Ok(BoundKernel { kernel, buffer })
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new(KernelRegistry::standard())
    }
}

/// A buffer bound to a kernel whose twiddle factors are not computed yet.
#[derive(Debug)]
pub struct BoundKernel<T: Precision> {
    kernel: Kernel,
    buffer: EngineBuffer<T>,
}

impl<T: Precision> BoundKernel<T> {
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// Precompute twiddle factors. Consumes the bound kernel, so a handle is
    /// initialised exactly once.
    pub fn init(self) -> TransformHandle<T> {
        let fft = self.kernel.plan::<T>();
        let zero = Complex::new(T::from_sample(0.0), T::from_sample(0.0));
        let scratch = vec![zero; fft.get_inplace_scratch_len()];
        let work = vec![zero; self.kernel.length()];
        debug!(
            length = self.kernel.length(),
            width = %self.kernel.width(),
            "transform kernel initialised"
        );

        TransformHandle {
            kernel: self.kernel,
            buffer: self.buffer,
            fft,
            work,
            scratch,
        }
    }
}

/// An initialised kernel with exclusive ownership of its engine buffer.
pub struct TransformHandle<T: Precision> {
    kernel: Kernel,
    buffer: EngineBuffer<T>,
    fft: Arc<dyn Fft<T>>,
    work: Vec<Complex<T>>,
    scratch: Vec<Complex<T>>,
}

impl<T: Precision> TransformHandle<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.kernel.length()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kernel.length() == 0
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    pub fn buffer(&self) -> &EngineBuffer<T> {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut EngineBuffer<T> {
        &mut self.buffer
    }

    /// Unnormalised forward transform, in place over the real and imaginary
    /// planes of the bound buffer.
    pub fn transform(&mut self) {
        let (real, imag) = self.buffer.complex_planes_mut();
        for ((slot, &re), &im) in self.work.iter_mut().zip(real.iter()).zip(imag.iter()) {
            *slot = Complex::new(re, im);
        }

        self.fft.process_with_scratch(&mut self.work, &mut self.scratch);

        for ((value, re), im) in self.work.iter().zip(real.iter_mut()).zip(imag.iter_mut()) {
            *re = value.re;
            *im = value.im;
        }
    }
}

impl<T: Precision> fmt::Debug for TransformHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformHandle")
            .field("kernel", &self.kernel)
            .field("planes", &self.buffer.planes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn bind_16() -> TransformHandle<f64> {
        let engine = TransformEngine::default();
        let buffer = engine.allocate::<f64>(16, STANDARD_PLANES);
        engine.bind(buffer).unwrap().init()
    }

    #[test]
    fn impulse_transforms_to_flat_spectrum() {
        let mut handle = bind_16();
        pack_into(&[1.0], handle.buffer_mut(), 1, 0).unwrap();
        handle.transform();

        for (&re, &im) in handle.buffer().real_plane().iter().zip(handle.buffer().imaginary_plane()) {
            assert!((re - 1.0).abs() < 1e-12);
            assert!(im.abs() < 1e-12);
        }
    }

    #[test]
    fn sine_lands_in_first_and_last_bin() {
        let mut handle = bind_16();
        let real: Vec<f64> = (0..16).map(|i| (PI / 8.0 * i as f64).sin()).collect();
        pack_into(&real, handle.buffer_mut(), 16, 0).unwrap();
        handle.transform();

        let buffer = handle.buffer();
        // sin = (e^{iθ} - e^{-iθ}) / 2i → X[1] = -8i, X[15] = +8i
        assert!((buffer.imaginary_plane()[1] + 8.0).abs() < 1e-9);
        assert!((buffer.imaginary_plane()[15] - 8.0).abs() < 1e-9);
        assert!(buffer.real_plane()[1].abs() < 1e-9);
    }

    #[test]
    fn transform_is_deterministic_and_leaves_extra_planes_alone() {
        let engine = TransformEngine::default();
        let mut buffer = engine.allocate::<f64>(16, 3);
        buffer.as_mut_slice()[40] = 42.0;
        let mut handle = engine.bind(buffer).unwrap().init();

        let real: Vec<f64> = (0..16).map(|i| (i as f64).cos() * 3.0).collect();
        pack_into(&real, handle.buffer_mut(), 16, 0).unwrap();
        let before = handle.buffer().clone();
        handle.transform();
        let first = handle.buffer().clone();

        *handle.buffer_mut() = before;
        handle.transform();
        assert_eq!(handle.buffer(), &first);
        assert_eq!(handle.buffer().as_slice()[40], 42.0);
    }

    #[test]
    fn bind_rejects_unregistered_length() {
        let engine = TransformEngine::default();
        let err = engine.bind(engine.allocate::<f32>(48, STANDARD_PLANES)).unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnsupportedTransformSize {
                width: ElementWidth::Single,
                length: 48
            }
        );
    }

    #[test]
    fn bind_respects_a_narrow_registry() {
        let mut registry = KernelRegistry::empty();
        registry.register(ElementWidth::Double, 64).unwrap();
        let engine = TransformEngine::new(registry);

        assert!(engine.bind(engine.allocate::<f64>(64, 2)).is_ok());
        assert!(engine.bind(engine.allocate::<f32>(64, 2)).is_err());
        assert!(engine.bind(engine.allocate::<f64>(16, 2)).is_err());
    }

    #[test]
    fn bind_rejects_single_plane_buffers() {
        let engine = TransformEngine::default();
        let err = engine.bind(engine.allocate::<f64>(16, 1)).unwrap_err();
        assert_eq!(err, PipelineError::BufferLayout { planes: 1 });
    }

    #[test]
    fn single_precision_kernel_runs() {
        let engine = TransformEngine::default();
        let mut handle = engine.bind(engine.allocate::<f32>(64, 2)).unwrap().init();
        let ones = vec![1.0; 64];
        pack_into(&ones, handle.buffer_mut(), 64, 0).unwrap();
        handle.transform();

        assert!((handle.buffer().real_plane()[0] - 64.0).abs() < 1e-3);
        assert!(handle.buffer().real_plane()[1..].iter().all(|v| v.abs() < 1e-3));
        assert_eq!(handle.len(), 64);
        assert_eq!(handle.kernel().width(), ElementWidth::Single);
    }
}
