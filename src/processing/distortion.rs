use std::f64::consts::PI;
use std::time::{Duration, Instant};

use tracing::trace;

use super::rate_limiter::RateLimiter;
use crate::data::PixelPlane;
use crate::error::{PipelineError, Result};

/// Default throttle window for pointer-driven distortion.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(50);

const FACTOR: f64 = PI / 64.0;

/// Paint the red and green channels with a sin²/cos² interference pattern
/// centred on the focus point. Blue and alpha are left as they were.
///
/// The horizontal term is measured from `focus_y` and the vertical term from
/// `focus_x`; the axes are crossed.
pub fn calc_weird(
    pixels: &mut [u8],
    width: usize,
    height: usize,
    focus_x: f64,
    focus_y: f64,
) -> Result<()> {
    let expected = width * height * PixelPlane::CHANNELS;
    if pixels.len() != expected {
        return Err(PipelineError::PlaneSizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    if expected == 0 {
        return Ok(());
    }

    let columns: Vec<u8> = (0..width)
        .map(|x| {
            let s = (FACTOR * (x as f64 - focus_y)).sin();
            to_clamped_byte(s * s)
        })
        .collect();

    for (y, row) in pixels.chunks_exact_mut(width * PixelPlane::CHANNELS).enumerate() {
        let c = (FACTOR * (y as f64 - focus_x)).cos();
        let green = to_clamped_byte(c * c);
        for (px, &red) in row.chunks_exact_mut(PixelPlane::CHANNELS).zip(&columns) {
            px[0] = red;
            px[1] = green;
        }
    }
    Ok(())
}

/// Same conversion as a clamped byte array: round half to even, then clamp.
#[inline]
fn to_clamped_byte(unit: f64) -> u8 {
    (unit * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistortionOutcome {
    Applied,
    /// Dropped because another pass ran inside the current window.
    Throttled,
}

/// [`calc_weird`] behind a [`RateLimiter`].
#[derive(Debug, Clone)]
pub struct DistortionFilter {
    limiter: RateLimiter,
    passes: u64,
}

impl DistortionFilter {
    pub fn new(window: Duration) -> Self {
        Self {
            limiter: RateLimiter::new(window),
            passes: 0,
        }
    }

    /// Run one pass at `now` if the window allows it; otherwise drop it.
    pub fn apply(
        &mut self,
        now: Instant,
        plane: &mut PixelPlane,
        focus_x: f64,
        focus_y: f64,
    ) -> Result<DistortionOutcome> {
        if !self.limiter.try_acquire(now) {
            return Ok(DistortionOutcome::Throttled);
        }

        let started = Instant::now();
        let (width, height) = (plane.width(), plane.height());
        calc_weird(plane.data_mut(), width, height, focus_x, focus_y)?;
        self.passes += 1;
        trace!(elapsed = ?started.elapsed(), width, height, "distortion pass");
        Ok(DistortionOutcome::Applied)
    }

    /// Executed passes so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn window(&self) -> Duration {
        self.limiter.window()
    }
}

impl Default for DistortionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Rgba;

    fn textured(width: usize, height: usize) -> PixelPlane {
        let mut plane = PixelPlane::new(width, height);
        for (i, b) in plane.data_mut().iter_mut().enumerate() {
            *b = (i * 7 % 251) as u8;
        }
        plane
    }

    #[test]
    fn deterministic_and_preserves_blue_alpha() {
        let mut a = textured(33, 17);
        let mut b = a.clone();
        let original = a.clone();

        calc_weird(a.data_mut(), 33, 17, 12.0, 5.5).unwrap();
        calc_weird(b.data_mut(), 33, 17, 12.0, 5.5).unwrap();
        assert_eq!(a, b);

        for (after, before) in a.data().chunks(4).zip(original.data().chunks(4)) {
            assert_eq!(after[2], before[2]);
            assert_eq!(after[3], before[3]);
        }
    }

    #[test]
    fn axes_are_crossed() {
        let mut plane = PixelPlane::filled(128, 128, Rgba::BLACK);
        // Horizontal term is zero where x == focus_y; vertical term is one
        // where y == focus_x.
        calc_weird(plane.data_mut(), 128, 128, 20.0, 40.0).unwrap();

        assert_eq!(plane.pixel(40, 3).unwrap().r, 0);
        assert_eq!(plane.pixel(3, 20).unwrap().g, 255);
        // 32 columns away the sine term peaks.
        assert_eq!(plane.pixel(72, 0).unwrap().r, 255);
        // 32 rows away the cosine term vanishes.
        assert_eq!(plane.pixel(0, 52).unwrap().g, 0);
    }

    #[test]
    fn intermediate_values_round_to_nearest() {
        assert_eq!(to_clamped_byte(0.5), 128);
        assert_eq!(to_clamped_byte(0.25), 64);
        assert_eq!(to_clamped_byte(1.0), 255);
        assert_eq!(to_clamped_byte(0.0), 0);
    }

    #[test]
    fn wrong_buffer_size_is_rejected() {
        let mut data = vec![0u8; 4 * 4 * 4 - 1];
        let err = calc_weird(&mut data, 4, 4, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, PipelineError::PlaneSizeMismatch { expected: 64, .. }));
    }

    #[test]
    fn burst_of_events_runs_one_pass() {
        let mut filter = DistortionFilter::default();
        let mut plane = textured(16, 16);
        let t0 = Instant::now();

        let outcomes: Vec<_> = (0..10)
            .map(|i| {
                filter
                    .apply(t0 + Duration::from_millis(i * 4), &mut plane, i as f64, 0.0)
                    .unwrap()
            })
            .collect();

        assert_eq!(outcomes[0], DistortionOutcome::Applied);
        assert!(outcomes[1..].iter().all(|o| *o == DistortionOutcome::Throttled));
        assert_eq!(filter.passes(), 1);

        // Only the first event's focus was painted.
        let mut expected = textured(16, 16);
        calc_weird(expected.data_mut(), 16, 16, 0.0, 0.0).unwrap();
        assert_eq!(plane, expected);
    }

    #[test]
    fn next_window_runs_again() {
        let mut filter = DistortionFilter::new(Duration::from_millis(50));
        let mut plane = textured(8, 8);
        let t0 = Instant::now();

        assert_eq!(filter.apply(t0, &mut plane, 0.0, 0.0).unwrap(), DistortionOutcome::Applied);
        assert_eq!(
            filter.apply(t0 + Duration::from_millis(50), &mut plane, 1.0, 1.0).unwrap(),
            DistortionOutcome::Applied
        );
        assert_eq!(filter.passes(), 2);
    }
}
