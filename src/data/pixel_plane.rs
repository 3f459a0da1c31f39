use super::{MagnitudeSeries, SampleBuffer};
use crate::error::{PipelineError, Result};

/// One RGBA8 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 0xFF);
    pub const WHITE: Rgba = Rgba::new(0xFF, 0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack a little-endian channel word: R in the low byte, A in the high.
    pub fn split(packed: u32) -> Self {
        Self {
            r: (packed & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: ((packed >> 16) & 0xFF) as u8,
            a: ((packed >> 24) & 0xFF) as u8,
        }
    }

    pub fn pack(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    /// Opaque color from a `0xRRGGBB` value, as stored in settings.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 0xFF,
        }
    }

    pub fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// `width * height` RGBA8 pixels, row-major, channel order R,G,B,A.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelPlane {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelPlane {
    pub const CHANNELS: usize = 4;

    /// Fully transparent black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * Self::CHANNELS],
        }
    }

    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        let mut plane = Self::new(width, height);
        plane.fill(color);
        plane
    }

    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width * height * Self::CHANNELS;
        if data.len() != expected {
            return Err(PipelineError::PlaneSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn fill(&mut self, color: Rgba) {
        for px in self.data.chunks_exact_mut(Self::CHANNELS) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * Self::CHANNELS;
        let px = &self.data[idx..idx + Self::CHANNELS];
        Some(Rgba::new(px[0], px[1], px[2], px[3]))
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * Self::CHANNELS;
        self.data[idx..idx + Self::CHANNELS].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    /// One real sample per pixel: the four channel bytes packed into a word.
    pub fn to_samples(&self) -> SampleBuffer {
        let real = self
            .data
            .chunks_exact(Self::CHANNELS)
            .map(|px| u32::from_le_bytes([px[0], px[1], px[2], px[3]]) as f64)
            .collect();
        SampleBuffer::from_real(real)
    }

    /// Inverse of [`PixelPlane::to_samples`]. Values are rounded and clamped
    /// to the `u32` range before being split back into channels.
    pub fn from_packed_samples(width: usize, height: usize, samples: &[f64]) -> Result<Self> {
        let count = width * height;
        if samples.len() != count {
            return Err(PipelineError::LengthMismatch {
                expected: count,
                actual: samples.len(),
            });
        }
        let mut data = Vec::with_capacity(count * Self::CHANNELS);
        for &s in samples {
            let word = s.round().clamp(0.0, u32::MAX as f64) as u32;
            data.extend_from_slice(&word.to_le_bytes());
        }
        Self::from_raw(width, height, data)
    }

    /// Greyscale view of a magnitude spectrum, log-normalised to its peak.
    pub fn from_magnitudes(width: usize, height: usize, series: &MagnitudeSeries) -> Result<Self> {
        let count = width * height;
        if series.len() != count {
            return Err(PipelineError::LengthMismatch {
                expected: count,
                actual: series.len(),
            });
        }

        let peak = series.peak();
        let mut plane = Self::filled(width, height, Rgba::BLACK);
        if !(peak.is_finite() && peak > 0.0) {
            return Ok(plane);
        }

        let norm = peak.ln_1p();
        for (px, magnitude) in plane.data.chunks_exact_mut(Self::CHANNELS).zip(series.iter()) {
            let level = (magnitude.max(0.0).ln_1p() / norm * 255.0).round().clamp(0.0, 255.0) as u8;
            px[0] = level;
            px[1] = level;
            px[2] = level;
        }
        Ok(plane)
    }
}
