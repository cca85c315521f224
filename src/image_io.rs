//! Image file boundary.
//!
//! Loads any format the `image` crate can decode into a [`PixelBuffer`] and
//! writes buffers back out. Only lossless formats (PNG, BMP) keep a
//! watermark intact; the extension of the output path picks the format.

use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;
use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Errors that can occur while reading or writing image files.
#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("Image load error: {0}")]
    LoadError(String),

    #[error("Image save error: {0}")]
    SaveError(String),

    #[error("Unsupported output format '{0}' (use .png or .bmp)")]
    LossyFormat(String),
}

/// Loads an image file as RGBA8.
pub fn load<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, ImageIoError> {
    let image = image::open(path).map_err(|e| ImageIoError::LoadError(e.to_string()))?;
    Ok(PixelBuffer::from_dynamic(image))
}

/// Decodes an in-memory image as RGBA8.
pub fn from_bytes(bytes: &[u8]) -> Result<PixelBuffer, ImageIoError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| ImageIoError::LoadError(e.to_string()))?;
    Ok(PixelBuffer::from_dynamic(image))
}

/// Saves `buffer` to `path`, refusing formats that would destroy the LSBs.
pub fn save<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<(), ImageIoError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).map_err(|e| ImageIoError::SaveError(e.to_string()))?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Bmp) {
        return Err(ImageIoError::LossyFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_string(),
        ));
    }

    buffer
        .clone()
        .into_image()
        .save_with_format(path, format)
        .map_err(|e| ImageIoError::SaveError(e.to_string()))
}

/// Encodes `buffer` as PNG bytes.
pub fn to_png_bytes(buffer: &PixelBuffer) -> Result<Vec<u8>, ImageIoError> {
    let mut bytes = Vec::new();
    buffer
        .clone()
        .into_image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ImageIoError::SaveError(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{embed, extract, Strength};

    fn sample() -> PixelBuffer {
        PixelBuffer::from_fn(40, 30, |x, y| {
            [
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
                255,
            ]
        })
        .unwrap()
    }

    #[test]
    fn test_png_roundtrip_keeps_watermark() {
        let mut buf = sample();
        embed(&mut buf, b"Test PNG roundtrip", Strength::Medium).unwrap();

        let png = to_png_bytes(&buf).unwrap();
        let decoded = from_bytes(&png).unwrap();
        assert_eq!(decoded, buf);
        assert_eq!(
            extract(&decoded, Strength::Medium).unwrap().message,
            "Test PNG roundtrip"
        );
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marked.png");
        let buf = sample();

        save(&buf, &path).unwrap();
        assert_eq!(load(&path).unwrap(), buf);
    }

    #[test]
    fn test_save_rejects_lossy_format() {
        let dir = tempfile::tempdir().unwrap();
        let result = save(&sample(), dir.path().join("marked.jpg"));
        assert!(matches!(result, Err(ImageIoError::LossyFormat(_))));
    }

    #[test]
    fn test_load_garbage() {
        assert!(matches!(
            from_bytes(b"not an image"),
            Err(ImageIoError::LoadError(_))
        ));
    }
}
