pub mod canvas;
pub mod path;

pub use canvas::PixelCanvas;
pub use path::{Point, RenderPath, StrokeCommand, StrokeSurface, build_path, magnitude_path};
