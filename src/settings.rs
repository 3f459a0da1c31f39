use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::data::Rgba;
use crate::processing::engine::ElementWidth;

/// Application settings, loaded from `settings.ini` or defaults.
/// Every field here is saveable/loadable.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    // ── Plot ──
    pub plot_offset: f64,
    pub plot_scale: f64,
    pub demo_length: usize,

    // ── Transform ──
    pub precision: ElementWidth,

    // ── Distortion ──
    pub throttle_ms: u64,
    pub weird_enabled: bool,

    // ── Layout ──
    /// Subtracted from half the window width when sizing the image panel.
    pub image_margin: usize,
    pub window_width: i32,
    pub window_height: i32,

    // ── Colors (hex) ──
    pub color_background: u32,
    pub color_stroke: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Plot
            plot_offset: 10.0,
            plot_scale: 5.0,
            demo_length: 64,

            // Transform
            precision: ElementWidth::Double,

            // Distortion
            throttle_ms: 50,
            weird_enabled: false,

            // Layout
            image_margin: 200,
            window_width: 1200,
            window_height: 800,

            // Colors
            color_background: 0x000000,
            color_stroke: 0xffffff,
        }
    }
}

impl Settings {
    pub const FILE_NAME: &'static str = "settings.ini";

    /// Load `settings.ini` from the working directory, or create it with
    /// defaults if it doesn't exist.
    pub fn load_or_create() -> Self {
        let path = Path::new(Self::FILE_NAME);
        if path.exists() {
            return Self::load_from(path);
        }
        let settings = Self::default();
        settings.save();
        info!(path = Self::FILE_NAME, "wrote default settings");
        settings
    }

    /// Load from `path`, falling back to defaults for the whole file when it
    /// can't be read and for any key that is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => {
                let mut settings = Self::default();
                settings.parse_ini(&content);
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read settings, using defaults");
                Self::default()
            }
        }
    }

    /// Save to `settings.ini` in the working directory.
    pub fn save(&self) {
        if let Err(e) = self.save_to(Path::new(Self::FILE_NAME)) {
            warn!(path = Self::FILE_NAME, error = %e, "could not save settings");
        }
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_ini())
    }

    pub fn throttle_window(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn background(&self) -> Rgba {
        Rgba::from_hex(self.color_background)
    }

    pub fn stroke(&self) -> Rgba {
        Rgba::from_hex(self.color_stroke)
    }

    pub fn to_ini(&self) -> String {
        let mut s = String::new();
        s.push_str("# fft-canvas settings\n");
        s.push_str("# Edit values below. Delete this file to reset to defaults.\n\n");

        s.push_str("[Plot]\n");
        s.push_str(&format!("plot_offset = {}\n", self.plot_offset));
        s.push_str(&format!("plot_scale = {}\n", self.plot_scale));
        s.push_str("# demo_length must be a power of two between 16 and 1048576\n");
        s.push_str(&format!("demo_length = {}\n", self.demo_length));
        s.push('\n');

        s.push_str("[Transform]\n");
        s.push_str("# precision: f32 or f64\n");
        s.push_str(&format!("precision = {}\n", self.precision));
        s.push('\n');

        s.push_str("[Distortion]\n");
        s.push_str(&format!("throttle_ms = {}\n", self.throttle_ms));
        s.push_str(&format!("weird_enabled = {}\n", self.weird_enabled));
        s.push('\n');

        s.push_str("[Layout]\n");
        s.push_str(&format!("image_margin = {}\n", self.image_margin));
        s.push_str(&format!("window_width = {}\n", self.window_width));
        s.push_str(&format!("window_height = {}\n", self.window_height));
        s.push('\n');

        s.push_str("[Colors]\n");
        s.push_str(&format!("color_background = 0x{:06x}\n", self.color_background));
        s.push_str(&format!("color_stroke = 0x{:06x}\n", self.color_stroke));

        s
    }

    pub fn parse_ini(&mut self, content: &str) {
        let map = parse_ini_to_map(content);

        parse_into(&map, "plot_offset", &mut self.plot_offset);
        parse_into(&map, "plot_scale", &mut self.plot_scale);
        parse_into(&map, "demo_length", &mut self.demo_length);

        if let Some(v) = map.get("precision") {
            match v.as_str() {
                "f32" => self.precision = ElementWidth::Single,
                "f64" => self.precision = ElementWidth::Double,
                other => warn!(value = other, "unknown precision, keeping {}", self.precision),
            }
        }

        parse_into(&map, "throttle_ms", &mut self.throttle_ms);
        if let Some(v) = map.get("weird_enabled") {
            self.weird_enabled = v == "true";
        }

        parse_into(&map, "image_margin", &mut self.image_margin);
        parse_into(&map, "window_width", &mut self.window_width);
        parse_into(&map, "window_height", &mut self.window_height);

        for (key, slot) in [
            ("color_background", &mut self.color_background),
            ("color_stroke", &mut self.color_stroke),
        ] {
            if let Some(v) = map.get(key) {
                match parse_hex(v) {
                    Some(hex) => *slot = hex,
                    None => warn!(key, value = %v, "malformed hex color, keeping default"),
                }
            }
        }
    }
}

fn parse_into<T: std::str::FromStr>(map: &HashMap<String, String>, key: &str, slot: &mut T) {
    if let Some(v) = map.get(key) {
        match v.parse() {
            Ok(n) => *slot = n,
            Err(_) => warn!(key, value = %v, "malformed setting, keeping default"),
        }
    }
}

/// Parse INI content into a flat key-value map (section headers are ignored,
/// keys are globally unique in our format).
fn parse_ini_to_map(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            map.insert(key.trim().to_string(), val.trim().to_string());
        }
    }
    map
}

/// Parse a hex string like "0x1e1e2e" or "1e1e2e" into u32.
fn parse_hex(s: &str) -> Option<u32> {
    let s = s.trim().trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(s, 16).ok()
}
