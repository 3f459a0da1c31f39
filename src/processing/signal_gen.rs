use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::SampleBuffer;

/// Deterministic test waveforms. Frequencies are in cycles per buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalKind {
    /// `sin(π/8 · i)` with a zero imaginary plane.
    Sine,
    /// `sin(π/8 · i)` real, `cos(π/8 · i + π/2)` imaginary.
    Quadrature,
    Tone { cycles: f64 },
    /// Linear sweep from `start_cycles` to `end_cycles`.
    Chirp { start_cycles: f64, end_cycles: f64 },
    /// Equal-weight sum of tones, scaled to stay within [-1, 1].
    Multitone(Vec<f64>),
    /// Uniform noise in [-1, 1), reproducible from the seed.
    Noise { seed: u64 },
}

const DEMO_STEP: f64 = PI / 8.0;

pub fn synthesize(length: usize, kind: &SignalKind) -> SampleBuffer {
    let n = length as f64;
    match kind {
        SignalKind::Sine => {
            SampleBuffer::from_real((0..length).map(|i| (DEMO_STEP * i as f64).sin()).collect())
        }
        SignalKind::Quadrature => {
            let mut samples = SampleBuffer::zeroed(length);
            let (real, imag) = samples.planes_mut();
            for i in 0..length {
                let phase = DEMO_STEP * i as f64;
                real[i] = phase.sin();
                imag[i] = (phase + PI / 2.0).cos();
            }
            samples
        }
        SignalKind::Tone { cycles } => SampleBuffer::from_real(
            (0..length)
                .map(|i| (2.0 * PI * cycles * i as f64 / n).sin())
                .collect(),
        ),
        SignalKind::Chirp {
            start_cycles,
            end_cycles,
        } => {
            let sweep = end_cycles - start_cycles;
            SampleBuffer::from_real(
                (0..length)
                    .map(|i| {
                        let t = i as f64 / n;
                        (2.0 * PI * (start_cycles * t + 0.5 * sweep * t * t)).sin()
                    })
                    .collect(),
            )
        }
        SignalKind::Multitone(tones) => {
            if tones.is_empty() {
                return SampleBuffer::zeroed(length);
            }
            let weight = 1.0 / tones.len() as f64;
            SampleBuffer::from_real(
                (0..length)
                    .map(|i| {
                        tones
                            .iter()
                            .map(|c| (2.0 * PI * c * i as f64 / n).sin() * weight)
                            .sum()
                    })
                    .collect(),
            )
        }
        SignalKind::Noise { seed } => {
            let mut rng = StdRng::seed_from_u64(*seed);
            SampleBuffer::from_real((0..length).map(|_| rng.random_range(-1.0..1.0)).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_matches_formula() {
        let s = synthesize(16, &SignalKind::Sine);
        for (i, &v) in s.real().iter().enumerate() {
            assert_eq!(v, (PI / 8.0 * i as f64).sin());
        }
        assert!(s.imaginary().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn quadrature_imaginary_is_negated_sine() {
        let s = synthesize(64, &SignalKind::Quadrature);
        for (&re, &im) in s.real().iter().zip(s.imaginary()) {
            assert!((re + im).abs() < 1e-12);
        }
    }

    #[test]
    fn tone_repeats_every_period() {
        let s = synthesize(64, &SignalKind::Tone { cycles: 4.0 });
        for i in 0..48 {
            assert!((s.real()[i] - s.real()[i + 16]).abs() < 1e-9);
        }
    }

    #[test]
    fn chirp_and_multitone_stay_in_range() {
        let chirp = synthesize(
            256,
            &SignalKind::Chirp {
                start_cycles: 2.0,
                end_cycles: 40.0,
            },
        );
        let multi = synthesize(256, &SignalKind::Multitone(vec![3.0, 7.0, 11.0]));
        for s in [&chirp, &multi] {
            assert_eq!(s.len(), 256);
            assert!(s.real().iter().all(|v| v.abs() <= 1.0 + 1e-12));
        }
        assert_eq!(chirp.real()[0], 0.0);
        assert_eq!(synthesize(8, &SignalKind::Multitone(vec![])), SampleBuffer::zeroed(8));
    }

    #[test]
    fn noise_is_reproducible_per_seed() {
        let a = synthesize(128, &SignalKind::Noise { seed: 7 });
        let b = synthesize(128, &SignalKind::Noise { seed: 7 });
        let c = synthesize(128, &SignalKind::Noise { seed: 8 });

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.real().iter().all(|v| (-1.0..1.0).contains(v)));
    }
}
