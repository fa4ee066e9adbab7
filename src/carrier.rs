//! Carrier image loading
//!
//! Validates the carrier path and decodes it into an 8-bit RGB grid.

use crate::core::{DecodeError, Result};
use crate::mask::RegionMask;
use image::{ImageReader, RgbImage};
use std::path::Path;

const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Immutable RGB pixel grid of a carrier image
#[derive(Debug, Clone)]
pub struct CoverImage {
    pixels: RgbImage,
}

impl CoverImage {
    /// Validates and decodes a PNG/JPEG carrier, converting to RGB if needed.
    /// The decoder is picked from the file contents, not the extension.
    pub fn open(path: &Path) -> Result<Self> {
        validate_carrier_path(path)?;

        let pixels = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()?
            .to_rgb8();
        let cover = Self { pixels };

        if cover.width() != cover.height() {
            tracing::warn!(
                "Carrier {} is not square ({}x{}), it may not be a valid carrier",
                path.display(),
                cover.width(),
                cover.height()
            );
        }

        Ok(cover)
    }

    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn mask(&self) -> RegionMask {
        RegionMask::new(self.width(), self.height())
    }

    /// Raw channel bytes, row-major with R,G,B interleaved
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

/// Checks existence, file type and extension of a carrier path
pub fn validate_carrier_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DecodeError::FileNotFound(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(DecodeError::NotAFile(path.to_path_buf()));
    }

    let supported = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(e))
        })
        .unwrap_or(false);

    if !supported {
        return Err(DecodeError::UnsupportedFormat(format!(
            "carrier must be PNG/JPG: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file() {
        let err = validate_carrier_path(Path::new("/nonexistent/duck.png")).unwrap_err();
        assert!(matches!(err, DecodeError::FileNotFound(_)));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = validate_carrier_path(dir.path()).unwrap_err();
        assert!(matches!(err, DecodeError::NotAFile(_)));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let upper = dir.path().join("DUCK.JPEG");
        std::fs::write(&upper, b"x").unwrap();
        assert!(validate_carrier_path(&upper).is_ok());

        let gif = dir.path().join("duck.gif");
        std::fs::write(&gif, b"x").unwrap();
        let err = validate_carrier_path(&gif).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_open_converts_to_rgb() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gray.png");
        image::GrayImage::from_pixel(8, 8, image::Luma([200]))
            .save(&path)
            .unwrap();

        let cover = CoverImage::open(&path).unwrap();
        assert_eq!((cover.width(), cover.height()), (8, 8));
        assert_eq!(cover.as_raw().len(), 8 * 8 * 3);
        assert!(cover.as_raw().iter().all(|&v| v == 200));
    }

    #[test]
    fn test_png_bytes_under_jpg_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("duck.jpg");
        RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3]))
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();

        let cover = CoverImage::open(&path).unwrap();
        assert_eq!(&cover.as_raw()[..3], &[1, 2, 3]);
    }

    #[test]
    fn test_garbage_png_is_image_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png at all").unwrap();
        let err = CoverImage::open(&path).unwrap_err();
        assert!(matches!(err, DecodeError::Image(_)));
    }
}
