use super::SampleBuffer;

/// Elementwise modulus of a complex sample buffer.
///
/// Built once from its source planes and never edited afterwards; a new
/// transform produces a new series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MagnitudeSeries {
    values: Vec<f64>,
}

impl MagnitudeSeries {
    /// `sqrt(re^2 + im^2)` for every index. NaN and infinities pass through.
    ///
    /// # Panics
    ///
    /// Panics if the planes differ in length.
    pub fn from_planes(real: &[f64], imaginary: &[f64]) -> Self {
        assert_eq!(
            real.len(),
            imaginary.len(),
            "real and imaginary planes must have equal length"
        );
        let values = real
            .iter()
            .zip(imaginary)
            .map(|(&re, &im)| (re * re + im * im).sqrt())
            .collect();
        Self { values }
    }

    pub fn from_samples(samples: &SampleBuffer) -> Self {
        Self::from_planes(samples.real(), samples.imaginary())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn peak(&self) -> f64 {
        self.values.iter().copied().fold(0.0f64, f64::max)
    }

    /// Index of the largest magnitude; the first one wins on ties.
    pub fn peak_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.values.iter().enumerate() {
            match best {
                Some((_, b)) if v <= b => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_and_index() {
        let series = MagnitudeSeries::from_planes(&[3.0, 0.0, -6.0, 6.0], &[4.0, 1.0, 8.0, 0.0]);
        assert_eq!(series.values(), &[5.0, 1.0, 10.0, 6.0]);
        assert_eq!(series.peak(), 10.0);
        assert_eq!(series.peak_index(), Some(2));
        assert_eq!(MagnitudeSeries::default().peak_index(), None);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn mismatched_planes_panic() {
        MagnitudeSeries::from_planes(&[1.0, 2.0], &[1.0]);
    }
}
