use tracing::debug;

use super::engine::Precision;
use super::pipeline::SpectrumPipeline;
use super::signal_gen::{SignalKind, synthesize};
use crate::data::{MagnitudeSeries, PixelPlane, Rgba, SampleBuffer};
use crate::error::Result;
use crate::rendering::{StrokeSurface, magnitude_path};
use crate::settings::Settings;

/// Parameters of the signal demo: where and how big to plot, and in which
/// colours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalScene {
    pub offset: f64,
    pub scale: f64,
    pub length: usize,
    pub background: Rgba,
    pub stroke: Rgba,
}

impl Default for SignalScene {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for SignalScene {
    fn from(settings: &Settings) -> Self {
        Self {
            offset: settings.plot_offset,
            scale: settings.plot_scale,
            length: settings.demo_length,
            background: settings.background(),
            stroke: settings.stroke(),
        }
    }
}

/// What the signal scene plotted.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSceneOutput {
    pub signal: SampleBuffer,
    pub spectrum: SampleBuffer,
}

impl SignalSceneOutput {
    pub fn spectrum_magnitudes(&self) -> MagnitudeSeries {
        MagnitudeSeries::from_samples(&self.spectrum)
    }
}

/// Clear the surface, plot the quadrature signal's magnitude, transform it
/// and plot the spectrum's magnitude on top.
///
/// The pipeline is resized to the scene length first.
pub fn render_signal_scene<S, T>(
    surface: &mut S,
    pipeline: &mut SpectrumPipeline<T>,
    scene: &SignalScene,
) -> Result<SignalSceneOutput>
where
    S: StrokeSurface + ?Sized,
    T: Precision,
{
    pipeline.reconfigure(scene.length)?;

    surface.clear(scene.background);

    let signal = synthesize(scene.length, &SignalKind::Quadrature);
    magnitude_path(scene.offset, scene.scale, &MagnitudeSeries::from_samples(&signal))
        .stroke(surface, scene.stroke);

    let spectrum = pipeline.forward(&signal)?;
    let magnitudes = MagnitudeSeries::from_samples(&spectrum);
    magnitude_path(scene.offset, scene.scale, &magnitudes).stroke(surface, scene.stroke);

    debug!(length = scene.length, peak = magnitudes.peak(), "signal scene drawn");
    Ok(SignalSceneOutput { signal, spectrum })
}

/// Transform a square plane and return its magnitude spectrum as a greyscale
/// plane of the same size. The pipeline is resized to the pixel count.
pub fn render_image_spectrum<T: Precision>(
    pipeline: &mut SpectrumPipeline<T>,
    plane: &PixelPlane,
) -> Result<PixelPlane> {
    pipeline.reconfigure(plane.pixel_count())?;
    let magnitudes = pipeline.transform_pixels(plane)?;
    PixelPlane::from_magnitudes(plane.width(), plane.height(), &magnitudes)
}
