use std::path::{Path, PathBuf};

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::{debug, warn};

use super::PixelPlane;
use crate::error::{PipelineError, Result};

/// Decode an image file and resample it to a `side x side` RGBA8 plane.
///
/// Decode failures come back as [`PipelineError::ResourceDecode`]; callers show
/// the message and carry on, nothing is retried.
pub fn load_pixel_plane<P: AsRef<Path>>(path: P, side: u32) -> Result<PixelPlane> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|e| decode_error(path.to_path_buf(), e))?;
    debug!(?path, width = decoded.width(), height = decoded.height(), "decoded image");
    into_square_plane(decoded, side)
}

/// Same as [`load_pixel_plane`] for bytes already in memory.
pub fn decode_pixel_plane(bytes: &[u8], side: u32) -> Result<PixelPlane> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| decode_error(PathBuf::from("<memory>"), e))?;
    into_square_plane(decoded, side)
}

/// Decode without resampling.
pub fn load_native<P: AsRef<Path>>(path: P) -> Result<PixelPlane> {
    let path = path.as_ref();
    let rgba = image::open(path)
        .map_err(|e| decode_error(path.to_path_buf(), e))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelPlane::from_raw(width as usize, height as usize, rgba.into_raw())
}

fn into_square_plane(decoded: DynamicImage, side: u32) -> Result<PixelPlane> {
    // TODO: keep aspect ratio and letterbox instead of stretching
    let rgba = decoded.resize_exact(side, side, FilterType::Triangle).to_rgba8();
    PixelPlane::from_raw(side as usize, side as usize, rgba.into_raw())
}

fn decode_error(path: PathBuf, err: image::ImageError) -> PipelineError {
    warn!(?path, "image decode failed: {err}");
    PipelineError::ResourceDecode {
        path,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Rgba;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn decodes_and_resamples_to_square() {
        let img = RgbaImage::from_pixel(5, 3, image::Rgba([10, 20, 30, 255]));
        let plane = decode_pixel_plane(&png_bytes(&img), 8).unwrap();

        assert_eq!(plane.width(), 8);
        assert_eq!(plane.height(), 8);
        assert_eq!(plane.pixel(7, 7), Some(Rgba::new(10, 20, 30, 255)));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_pixel_plane(b"definitely not an image", 8).unwrap_err();
        assert!(matches!(err, PipelineError::ResourceDecode { .. }));
        assert!(err.is_user_facing());
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = load_pixel_plane("/nonexistent/frame.png", 8).unwrap_err();
        match err {
            PipelineError::ResourceDecode { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/frame.png"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn native_load_keeps_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strip.png");
        RgbaImage::from_pixel(4, 2, image::Rgba([1, 2, 3, 4]))
            .save(&path)
            .unwrap();

        let plane = load_native(&path).unwrap();
        assert_eq!((plane.width(), plane.height()), (4, 2));
        assert_eq!(plane.pixel(3, 1), Some(Rgba::new(1, 2, 3, 4)));
    }
}
