pub mod image_loader;
pub mod pixel_plane;
pub mod sample_buffer;
pub mod spectrum;

pub use pixel_plane::{PixelPlane, Rgba};
pub use sample_buffer::SampleBuffer;
pub use spectrum::MagnitudeSeries;
