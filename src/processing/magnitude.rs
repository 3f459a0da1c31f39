use crate::data::MagnitudeSeries;

/// Elementwise `sqrt(re² + im²)` over two equal-length planes.
///
/// NaN and infinity pass straight through. Prefer
/// [`MagnitudeSeries::from_samples`] when the planes already live in a
/// [`crate::data::SampleBuffer`].
///
/// # Panics
///
/// Panics if `real` and `imaginary` differ in length.
pub fn magnitude(real: &[f64], imaginary: &[f64]) -> MagnitudeSeries {
    MagnitudeSeries::from_planes(real, imaginary)
}
