use std::fmt;

use rustfft::FftNum;

/// Number of planes the pipeline allocates: real then imaginary.
pub const STANDARD_PLANES: usize = 2;

/// Element precision of an engine buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementWidth {
    Single,
    Double,
}

impl ElementWidth {
    pub fn bytes(self) -> usize {
        match self {
            ElementWidth::Single => 4,
            ElementWidth::Double => 8,
        }
    }

    pub fn from_bytes(bytes: usize) -> Option<Self> {
        match bytes {
            4 => Some(ElementWidth::Single),
            8 => Some(ElementWidth::Double),
            _ => None,
        }
    }
}

impl fmt::Display for ElementWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementWidth::Single => write!(f, "f32"),
            ElementWidth::Double => write!(f, "f64"),
        }
    }
}

/// Floating point types the engine can hold.
pub trait Precision: FftNum + bytemuck::Pod {
    const WIDTH: ElementWidth;

    fn from_sample(value: f64) -> Self;
    fn to_sample(self) -> f64;
}

impl Precision for f32 {
    const WIDTH: ElementWidth = ElementWidth::Single;

    #[inline]
    fn from_sample(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_sample(self) -> f64 {
        self as f64
    }
}

impl Precision for f64 {
    const WIDTH: ElementWidth = ElementWidth::Double;

    #[inline]
    fn from_sample(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_sample(self) -> f64 {
        self
    }
}

/// Contiguous plane-partitioned storage shared between caller and kernel.
///
/// Plane `p` occupies elements `[p * length, (p + 1) * length)`, so the real
/// plane starts at offset 0 and the imaginary plane at offset `length`.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineBuffer<T: Precision> {
    data: Vec<T>,
    length: usize,
    planes: usize,
}

impl<T: Precision> EngineBuffer<T> {
    pub(crate) fn zeroed(length: usize, planes: usize) -> Self {
        Self {
            data: vec![T::from_sample(0.0); length * planes],
            length,
            planes,
        }
    }

    /// Samples per plane.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn planes(&self) -> usize {
        self.planes
    }

    /// Total element count across all planes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn element_width(&self) -> ElementWidth {
        T::WIDTH
    }

    pub fn byte_len(&self) -> usize {
        self.data.len() * T::WIDTH.bytes()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn real_plane(&self) -> &[T] {
        &self.data[..self.length]
    }

    pub fn imaginary_plane(&self) -> &[T] {
        &self.data[self.length..2 * self.length]
    }

    /// Mutable real and imaginary planes at once.
    pub fn complex_planes_mut(&mut self) -> (&mut [T], &mut [T]) {
        let (real, rest) = self.data.split_at_mut(self.length);
        (real, &mut rest[..self.length])
    }
}
