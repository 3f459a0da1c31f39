use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueHint};
use tracing::info;

use fft_canvas::data::image_loader::{load_native, load_pixel_plane};
use fft_canvas::export::{export_magnitudes_csv, save_png};
use fft_canvas::logging::init_tracing;
use fft_canvas::processing::engine::Precision;
use fft_canvas::processing::sizing::fit_side_by_side;
use fft_canvas::processing::{
    DistortionFilter, ElementWidth, SignalScene, SpectrumPipeline, TransformEngine,
    render_image_spectrum, render_signal_scene, run_self_test,
};
use fft_canvas::rendering::PixelCanvas;
use fft_canvas::{PipelineError, Settings};

#[derive(Parser)]
#[command(author, version, about = "Spectral transforms for signal plots and image pixels")]
struct Cli {
    /// Settings file (defaults to settings.ini in the working directory)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    settings: Option<PathBuf>,

    /// Override the configured precision
    #[arg(long, global = true, value_parser = ["f32", "f64"])]
    precision: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the transform self-test and print the report
    SelfTest,

    /// Plot the quadrature demo signal and its spectrum
    Signal {
        #[arg(long, value_hint = ValueHint::FilePath)]
        out: PathBuf,
        /// Also dump the spectrum as CSV
        #[arg(long, value_hint = ValueHint::FilePath)]
        csv: Option<PathBuf>,
        /// Canvas side in pixels
        #[arg(long, default_value_t = 512)]
        size: usize,
    },

    /// Transform an image and write its magnitude spectrum as greyscale
    Image {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        #[arg(long, value_hint = ValueHint::FilePath)]
        out: PathBuf,
        /// Working side; defaults to the side the GUI would pick
        #[arg(long)]
        side: Option<u32>,
    },

    /// Apply one distortion pass centred on a focus point
    Weird {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        #[arg(long, value_hint = ValueHint::FilePath)]
        out: PathBuf,
        #[arg(long, default_value_t = 0.0)]
        focus_x: f64,
        #[arg(long, default_value_t = 0.0)]
        focus_y: f64,
    },
}

fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Bad input files are reported as plain text, not as a failure chain.
            match err.downcast_ref::<PipelineError>() {
                Some(pipeline_err) if pipeline_err.is_user_facing() => {
                    eprintln!("{pipeline_err}");
                    ExitCode::from(2)
                }
                _ => {
                    eprintln!("Error: {err:#}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::load_or_create(),
    };
    if let Some(p) = cli.precision.as_deref() {
        settings.precision = if p == "f32" {
            ElementWidth::Single
        } else {
            ElementWidth::Double
        };
    }

    let engine = TransformEngine::default();
    let report = run_self_test(&engine).context("Transform self-test failed")?;

    match cli.command {
        Command::SelfTest => {
            println!(
                "ok: {} points, bins {:?} = {:.6}, max leakage {:.3e}",
                report.length, report.peak_bins, report.peak_magnitude, report.max_leakage
            );
            Ok(())
        }
        Command::Signal { out, csv, size } => match settings.precision {
            ElementWidth::Single => signal::<f32>(&engine, &settings, &out, csv.as_deref(), size),
            ElementWidth::Double => signal::<f64>(&engine, &settings, &out, csv.as_deref(), size),
        },
        Command::Image { input, out, side } => {
            let side = side.unwrap_or_else(|| {
                fit_side_by_side(settings.window_width.max(0) as usize, settings.image_margin) as u32
            });
            match settings.precision {
                ElementWidth::Single => image_spectrum::<f32>(&engine, &input, &out, side),
                ElementWidth::Double => image_spectrum::<f64>(&engine, &input, &out, side),
            }
        }
        Command::Weird {
            input,
            out,
            focus_x,
            focus_y,
        } => weird(&settings, &input, &out, focus_x, focus_y),
    }
}

fn signal<T: Precision>(
    engine: &TransformEngine,
    settings: &Settings,
    out: &Path,
    csv: Option<&Path>,
    size: usize,
) -> Result<()> {
    if size == 0 {
        bail!("--size must be positive");
    }
    let scene = SignalScene::from(settings);
    let mut pipeline = SpectrumPipeline::<T>::new(engine.clone(), scene.length)
        .with_context(|| format!("demo_length {} is not a supported transform size", scene.length))?;

    let mut canvas = PixelCanvas::new(size, size);
    let output = render_signal_scene(&mut canvas, &mut pipeline, &scene)?;
    save_png(canvas.plane(), out)?;
    info!(path = ?out, "signal plot written");

    if let Some(csv) = csv {
        export_magnitudes_csv(&output.spectrum, csv)?;
    }
    Ok(())
}

fn image_spectrum<T: Precision>(
    engine: &TransformEngine,
    input: &Path,
    out: &Path,
    side: u32,
) -> Result<()> {
    let plane = load_pixel_plane(input, side)?;
    let pixels = plane.pixel_count();
    let mut pipeline = SpectrumPipeline::<T>::new(engine.clone(), pixels)
        .with_context(|| format!("{side}x{side} pixels is not a supported transform size"))?;

    let started = Instant::now();
    let spectrum = render_image_spectrum(&mut pipeline, &plane)?;
    info!(side, elapsed = ?started.elapsed(), "image spectrum computed");
    save_png(&spectrum, out)
}

fn weird(settings: &Settings, input: &Path, out: &Path, focus_x: f64, focus_y: f64) -> Result<()> {
    let mut plane = load_native(input)?;
    let mut filter = DistortionFilter::new(settings.throttle_window());
    filter.apply(Instant::now(), &mut plane, focus_x, focus_y)?;
    save_png(&plane, out)
}
