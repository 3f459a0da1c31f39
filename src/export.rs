use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;
use tracing::info;

use crate::data::{MagnitudeSeries, PixelPlane, SampleBuffer};

/// Write a spectrum as CSV.
///
/// Row 1 is metadata (`length`, peak bin, peak magnitude); row 2 the column
/// labels; one row per bin after that.
pub fn export_magnitudes_csv<P: AsRef<Path>>(spectrum: &SampleBuffer, path: P) -> Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("Failed to create CSV file: {:?}", path.as_ref()))?;

    let mut writer = csv::WriterBuilder::new()
        .flexible(true) // metadata row is shorter than the data rows
        .from_writer(file);

    let magnitudes = MagnitudeSeries::from_samples(spectrum);
    let peak_index = magnitudes.peak_index().unwrap_or(0);

    writer
        .write_record(&[
            spectrum.len().to_string(),
            peak_index.to_string(),
            format!("{:.6}", magnitudes.peak()),
        ])
        .context("Failed to write CSV metadata")?;

    writer
        .write_record(["index", "real", "imaginary", "magnitude"])
        .context("Failed to write CSV header")?;

    for (i, ((re, im), mag)) in spectrum
        .real()
        .iter()
        .zip(spectrum.imaginary())
        .zip(magnitudes.iter())
        .enumerate()
    {
        writer
            .write_record(&[
                i.to_string(),
                format!("{:.6}", re),
                format!("{:.6}", im),
                format!("{:.6}", mag),
            ])
            .context("Failed to write CSV record")?;
    }

    writer.flush().context("Failed to flush CSV writer")?;
    info!(path = ?path.as_ref(), bins = spectrum.len(), "spectrum exported");
    Ok(())
}

/// Write a plane as an RGBA PNG.
pub fn save_png<P: AsRef<Path>>(plane: &PixelPlane, path: P) -> Result<()> {
    let image = RgbaImage::from_raw(
        plane.width() as u32,
        plane.height() as u32,
        plane.data().to_vec(),
    )
    .context("Pixel plane does not match its dimensions")?;
    image
        .save(&path)
        .with_context(|| format!("Failed to write PNG: {:?}", path.as_ref()))?;
    Ok(())
}
