use std::collections::BTreeSet;
use std::sync::Arc;

use rustfft::{Fft, FftPlanner};

use super::buffer::{ElementWidth, Precision};
use crate::error::{PipelineError, Result};

/// Smallest registered kernel, 2^4.
pub const MIN_KERNEL_LOG2: u32 = 4;
/// Largest registered kernel, 2^20.
pub const MAX_KERNEL_LOG2: u32 = 20;

/// A forward-transform kernel for one exact `(width, length)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Kernel {
    width: ElementWidth,
    length: usize,
}

impl Kernel {
    pub fn width(&self) -> ElementWidth {
        self.width
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Plan the transform; this is where the twiddle factors get computed.
    pub(crate) fn plan<T: Precision>(&self) -> Arc<dyn Fft<T>> {
        debug_assert_eq!(T::WIDTH, self.width);
        let mut planner = FftPlanner::<T>::new();
        planner.plan_fft_forward(self.length)
    }
}

/// Explicit table of the kernels the engine may bind.
#[derive(Debug, Clone, Default)]
pub struct KernelRegistry {
    kernels: BTreeSet<Kernel>,
}

impl KernelRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every power of two from 2^4 to 2^20, in both precisions.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for width in [ElementWidth::Single, ElementWidth::Double] {
            for log2 in MIN_KERNEL_LOG2..=MAX_KERNEL_LOG2 {
                registry.kernels.insert(Kernel {
                    width,
                    length: 1 << log2,
                });
            }
        }
        registry
    }

    /// Register one kernel. Only power-of-two lengths are accepted.
    pub fn register(&mut self, width: ElementWidth, length: usize) -> Result<Kernel> {
        if !length.is_power_of_two() || length < 2 {
            return Err(PipelineError::UnsupportedTransformSize { width, length });
        }
        let kernel = Kernel { width, length };
        self.kernels.insert(kernel);
        Ok(kernel)
    }

    pub fn lookup(&self, width: ElementWidth, length: usize) -> Result<Kernel> {
        let key = Kernel { width, length };
        if self.kernels.contains(&key) {
            Ok(key)
        } else {
            Err(PipelineError::UnsupportedTransformSize { width, length })
        }
    }

    pub fn contains(&self, width: ElementWidth, length: usize) -> bool {
        self.lookup(width, length).is_ok()
    }

    /// Registered lengths for one precision, ascending.
    pub fn lengths(&self, width: ElementWidth) -> Vec<usize> {
        self.kernels
            .iter()
            .filter(|k| k.width == width)
            .map(|k| k.length)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}
