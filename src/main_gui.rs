mod ui;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result};
use fltk::{
    app, button::Button, button::ToggleButton, dialog, draw, enums::Align, enums::ColorDepth,
    enums::Event, enums::Font, frame::Frame, group::Flex, image::RgbImage, prelude::*,
    window::Window,
};
use tracing::{info, warn};

use fft_canvas::data::PixelPlane;
use fft_canvas::data::image_loader::load_pixel_plane;
use fft_canvas::logging::init_tracing;
use fft_canvas::processing::engine::Precision;
use fft_canvas::processing::sizing::{fit_side_by_side, fit_square};
use fft_canvas::processing::{
    DistortionFilter, DistortionOutcome, ElementWidth, SignalScene, SpectrumPipeline,
    TransformEngine, render_image_spectrum, render_signal_scene, run_self_test,
};
use fft_canvas::rendering::PixelCanvas;
use fft_canvas::Settings;

use ui::theme;

const BUTTON_ROW: i32 = 30;
const STATUS_ROW: i32 = 24;

struct GuiState<T: Precision> {
    settings: Settings,
    scene: SignalScene,
    signal_pipeline: SpectrumPipeline<T>,
    canvas: Option<PixelCanvas>,
    distortion: DistortionFilter,
    weird: bool,

    image_pipeline: SpectrumPipeline<T>,
    image: Option<PixelPlane>,
    spectrum: Option<PixelPlane>,
    show_spectrum: bool,
    image_message: Option<String>,
    // Last chosen file and the side it was decoded at, for refitting.
    image_path: Option<PathBuf>,
    image_side: u32,
}

impl<T: Precision> GuiState<T> {
    fn new(settings: Settings, engine: &TransformEngine) -> Result<Self> {
        let scene = SignalScene::from(&settings);
        let signal_pipeline = SpectrumPipeline::new(engine.clone(), scene.length)
            .with_context(|| format!("demo_length {} is not a supported transform size", scene.length))?;
        let image_pipeline = SpectrumPipeline::new(engine.clone(), scene.length)?;

        Ok(Self {
            distortion: DistortionFilter::new(settings.throttle_window()),
            weird: settings.weird_enabled,
            settings,
            scene,
            signal_pipeline,
            canvas: None,
            image_pipeline,
            image: None,
            spectrum: None,
            show_spectrum: false,
            image_message: None,
            image_path: None,
            image_side: 0,
        })
    }

    /// Fresh square canvas with the signal scene drawn on it.
    fn rebuild_canvas(&mut self, side: usize) -> fft_canvas::Result<()> {
        let mut canvas = PixelCanvas::new(side, side);
        render_signal_scene(&mut canvas, &mut self.signal_pipeline, &self.scene)?;
        self.canvas = Some(canvas);
        Ok(())
    }

    /// Side of the image panel for a window `window_width` pixels wide.
    fn panel_side(&self, window_width: i32) -> u32 {
        fit_side_by_side(window_width.max(0) as usize, self.settings.image_margin) as u32
    }

    /// Decode the last chosen file again when the panel side has changed.
    /// Returns whether a reload happened.
    fn refit_image(&mut self, window_width: i32) -> bool {
        let side = self.panel_side(window_width);
        if side == self.image_side {
            return false;
        }
        let Some(path) = self.image_path.clone() else {
            return false;
        };
        self.load_image(&path, side);
        true
    }

    fn load_image(&mut self, path: &Path, side: u32) {
        self.image_path = Some(path.to_path_buf());
        self.image_side = side;

        let plane = match load_pixel_plane(path, side) {
            Ok(plane) => plane,
            Err(e) => {
                // Shown in the panel; the user picks another file.
                self.image = None;
                self.spectrum = None;
                self.image_message = Some(e.to_string());
                return;
            }
        };

        match render_image_spectrum(&mut self.image_pipeline, &plane) {
            Ok(spectrum) => {
                self.spectrum = Some(spectrum);
                self.image_message = None;
            }
            Err(e) => {
                warn!(error = %e, "image spectrum failed");
                self.spectrum = None;
                self.image_message = Some(format!("Spectrum unavailable: {e}"));
            }
        }
        info!(?path, side, "image loaded");
        self.image = Some(plane);
    }
}

fn blit(plane: &PixelPlane, x: i32, y: i32) {
    match RgbImage::new(plane.data(), plane.width() as i32, plane.height() as i32, ColorDepth::Rgba8) {
        Ok(mut img) => img.draw(x, y, plane.width() as i32, plane.height() as i32),
        Err(e) => warn!("Failed to create canvas image: {e:?}"),
    }
}

fn placeholder(text: &str, color: u32, x: i32, y: i32, w: i32, h: i32) {
    draw::set_draw_color(theme::color(theme::BG_DARK));
    draw::draw_rectf(x, y, w, h);
    draw::set_draw_color(theme::color(color));
    draw::set_font(Font::Helvetica, 14);
    draw::draw_text2(text, x, y, w, h, Align::Center | Align::Wrap);
}

fn main() {
    init_tracing();

    let settings = Settings::load_or_create();
    let engine = TransformEngine::default();
    if let Err(e) = run_self_test(&engine) {
        eprintln!("Transform self-test failed: {e}");
        std::process::exit(1);
    }

    let result = match settings.precision {
        ElementWidth::Single => run::<f32>(settings, &engine),
        ElementWidth::Double => run::<f64>(settings, &engine),
    };
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run<T: Precision>(settings: Settings, engine: &TransformEngine) -> Result<()> {
    let app = app::App::default();
    theme::apply_dark_theme();
    app::set_visual(fltk::enums::Mode::Rgb8).ok();

    let (win_w, win_h) = (settings.window_width, settings.window_height);
    let state = Rc::new(RefCell::new(GuiState::<T>::new(settings, engine)?));

    let mut win = Window::new(50, 50, win_w, win_h, "fft-canvas");
    win.make_resizable(true);
    win.set_color(theme::color(theme::BG_DARK));

    let mut root = Flex::default().with_size(win_w, win_h).column();

    let mut buttons = Flex::default().row();
    let mut btn_weird = ToggleButton::default().with_label("get weird");
    let mut btn_load = Button::default().with_label("Load image");
    let mut btn_view = ToggleButton::default().with_label("Show spectrum");
    buttons.end();
    root.fixed(&buttons, BUTTON_ROW);

    let mut panels = Flex::default().row();
    let mut canvas_frame = Frame::default();
    let mut image_frame = Frame::default();
    panels.end();

    let mut status_bar = Frame::default().with_label("Move the mouse over the plot");
    status_bar.set_align(Align::Left | Align::Inside);
    status_bar.set_label_color(theme::color(theme::TEXT_PRIMARY));
    root.fixed(&status_bar, STATUS_ROW);
    root.end();

    win.end();
    win.show();

    {
        let st = state.borrow();
        btn_weird.set_value(st.weird);
        if st.weird {
            btn_weird.set_label("enough");
        }
    }

    // ── Signal canvas: re-fit and redraw on every resize ──
    {
        let state = state.clone();
        let mut status_bar = status_bar.clone();
        canvas_frame.draw(move |w| {
            if !w.visible_r() || w.w() <= 0 || w.h() <= 0 {
                return;
            }
            let Ok(mut st) = state.try_borrow_mut() else { return; };

            let side = fit_square(w.w() as usize, w.h() as usize);
            if st.canvas.as_ref().map(PixelCanvas::width) != Some(side) {
                if let Err(e) = st.rebuild_canvas(side) {
                    status_bar.set_label(&format!("Plot failed: {e}"));
                }
            }

            draw::set_draw_color(theme::color(theme::BG_DARK));
            draw::draw_rectf(w.x(), w.y(), w.w(), w.h());
            draw::push_clip(w.x(), w.y(), w.w(), w.h());
            if let Some(canvas) = &st.canvas {
                blit(canvas.plane(), w.x(), w.y());
            }
            draw::pop_clip();
        });
    }

    // ── Pointer-driven distortion, throttled ──
    {
        let state = state.clone();
        canvas_frame.handle(move |w, ev| match ev {
            Event::Enter => true,
            Event::Move | Event::Drag => {
                let mut guard = state.borrow_mut();
                let st = &mut *guard;
                if !st.weird {
                    return false;
                }
                let Some(canvas) = st.canvas.as_mut() else { return false; };

                let fx = (app::event_x() - w.x()) as f64;
                let fy = (app::event_y() - w.y()) as f64;
                match st.distortion.apply(Instant::now(), canvas.plane_mut(), fx, fy) {
                    Ok(DistortionOutcome::Applied) => w.redraw(),
                    Ok(DistortionOutcome::Throttled) => {}
                    Err(e) => warn!(error = %e, "distortion pass failed"),
                }
                true
            }
            _ => false,
        });
    }

    // ── get weird / enough ──
    {
        let state = state.clone();
        let mut canvas_frame = canvas_frame.clone();
        btn_weird.set_callback(move |b| {
            let mut st = state.borrow_mut();
            st.weird = b.value();
            b.set_label(if st.weird { "enough" } else { "get weird" });
            if !st.weird {
                // Back to the clean plot.
                st.canvas = None;
            }
            canvas_frame.redraw();
        });
    }

    // ── Image panel ──
    {
        let state = state.clone();
        let win = win.clone();
        image_frame.draw(move |w| {
            if !w.visible_r() || w.w() <= 0 || w.h() <= 0 {
                return;
            }
            let Ok(mut st) = state.try_borrow_mut() else { return; };
            st.refit_image(win.w());

            let shown = if st.show_spectrum { st.spectrum.as_ref() } else { st.image.as_ref() };
            match (shown, &st.image_message) {
                (_, Some(msg)) => placeholder(msg, theme::ACCENT_RED, w.x(), w.y(), w.w(), w.h()),
                (Some(plane), None) => {
                    draw::set_draw_color(theme::color(theme::BG_DARK));
                    draw::draw_rectf(w.x(), w.y(), w.w(), w.h());
                    draw::push_clip(w.x(), w.y(), w.w(), w.h());
                    blit(plane, w.x(), w.y());
                    draw::pop_clip();
                }
                (None, None) => placeholder(
                    "Load an image to see its spectrum",
                    theme::TEXT_DISABLED,
                    w.x(),
                    w.y(),
                    w.w(),
                    w.h(),
                ),
            }
        });
    }

    {
        let state = state.clone();
        let mut image_frame = image_frame.clone();
        let mut status_bar = status_bar.clone();
        let win = win.clone();
        btn_load.set_callback(move |_| {
            let mut chooser = dialog::NativeFileChooser::new(dialog::NativeFileChooserType::BrowseFile);
            chooser.set_filter("Images\t*.{png,jpg,jpeg,gif,bmp}");
            chooser.show();

            let filename = chooser.filename();
            if filename.as_os_str().is_empty() {
                return;
            }

            status_bar.set_label("Loading image...");
            app::awake();

            let mut st = state.borrow_mut();
            let side = st.panel_side(win.w());
            st.load_image(&filename, side);
            match &st.image_message {
                Some(msg) => status_bar.set_label(msg),
                None => status_bar.set_label(&format!("{side}x{side} image loaded")),
            }
            image_frame.redraw();
        });
    }

    {
        let state = state.clone();
        let mut image_frame = image_frame.clone();
        btn_view.set_callback(move |b| {
            state.borrow_mut().show_spectrum = b.value();
            b.set_label(if b.value() { "Show image" } else { "Show spectrum" });
            image_frame.redraw();
        });
    }

    app.run().context("FLTK event loop failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fft_canvas::data::Rgba;
    use fft_canvas::export::save_png;

    fn state_with_image() -> (GuiState<f64>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.png");
        save_png(&PixelPlane::filled(40, 40, Rgba::new(200, 10, 10, 255)), &path).unwrap();

        let mut st = GuiState::<f64>::new(Settings::default(), &TransformEngine::default()).unwrap();
        st.load_image(&path, 64);
        (st, dir)
    }

    #[test]
    fn image_follows_window_width() {
        let (mut st, _dir) = state_with_image();
        assert_eq!(st.image.as_ref().map(PixelPlane::width), Some(64));

        assert!(st.refit_image(1200));
        assert_eq!(st.image.as_ref().map(PixelPlane::width), Some(256));
        assert_eq!(st.spectrum.as_ref().map(PixelPlane::width), Some(256));

        assert!(!st.refit_image(1200));

        assert!(st.refit_image(800));
        assert_eq!(st.image.as_ref().map(PixelPlane::width), Some(128));
        assert!(st.image_message.is_none());
    }

    #[test]
    fn nothing_to_refit_before_a_file_is_chosen() {
        let mut st = GuiState::<f64>::new(Settings::default(), &TransformEngine::default()).unwrap();
        assert!(!st.refit_image(1200));
        assert!(st.image.is_none());
    }
}
