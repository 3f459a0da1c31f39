use crate::error::{PipelineError, Result};

/// Real and imaginary sample planes of equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleBuffer {
    real: Vec<f64>,
    imaginary: Vec<f64>,
}

impl SampleBuffer {
    pub fn zeroed(length: usize) -> Self {
        Self {
            real: vec![0.0; length],
            imaginary: vec![0.0; length],
        }
    }

    /// Purely real input; the imaginary plane is all zero.
    pub fn from_real(real: Vec<f64>) -> Self {
        let imaginary = vec![0.0; real.len()];
        Self { real, imaginary }
    }

    pub fn from_parts(real: Vec<f64>, imaginary: Vec<f64>) -> Result<Self> {
        if real.len() != imaginary.len() {
            return Err(PipelineError::PlaneLengthMismatch {
                real: real.len(),
                imaginary: imaginary.len(),
            });
        }
        Ok(Self { real, imaginary })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.real.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    pub fn real(&self) -> &[f64] {
        &self.real
    }

    pub fn imaginary(&self) -> &[f64] {
        &self.imaginary
    }

    /// Both planes mutably. Slices keep the lengths fixed.
    pub fn planes_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.real, &mut self.imaginary)
    }

    /// Negated imaginary plane.
    pub fn conjugated(&self) -> Self {
        Self {
            real: self.real.clone(),
            imaginary: self.imaginary.iter().map(|v| -v).collect(),
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            real: self.real.iter().map(|v| v * factor).collect(),
            imaginary: self.imaginary.iter().map(|v| v * factor).collect(),
        }
    }
}
