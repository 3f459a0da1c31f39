use fltk::{app, enums::Color};

// Dark palette for the window chrome. The canvas itself follows settings.
pub const BG_DARK: u32 = 0x1e1e2e; // window background
pub const BG_PANEL: u32 = 0x2a2a3a; // button row / status bar
pub const BG_WIDGET: u32 = 0x363646;
pub const TEXT_PRIMARY: u32 = 0xcdd6f4;
pub const TEXT_DISABLED: u32 = 0x6c7086; // placeholder text
pub const ACCENT_BLUE: u32 = 0x89b4fa;
pub const ACCENT_RED: u32 = 0xf38ba8; // decode errors

fn rgb(hex: u32) -> (u8, u8, u8) {
    (((hex >> 16) & 0xFF) as u8, ((hex >> 8) & 0xFF) as u8, (hex & 0xFF) as u8)
}

pub fn apply_dark_theme() {
    let (r, g, b) = rgb(BG_PANEL);
    app::set_background_color(r, g, b);
    let (r, g, b) = rgb(BG_WIDGET);
    app::set_background2_color(r, g, b);
    let (r, g, b) = rgb(TEXT_PRIMARY);
    app::set_foreground_color(r, g, b);
    let (r, g, b) = rgb(ACCENT_BLUE);
    app::set_selection_color(r, g, b);
    let (r, g, b) = rgb(TEXT_DISABLED);
    app::set_inactive_color(r, g, b);

    app::set_scheme(app::Scheme::Gtk);
}

pub fn color(hex: u32) -> Color {
    Color::from_hex(hex)
}
