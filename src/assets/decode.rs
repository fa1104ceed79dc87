use std::sync::Arc;

use crate::foundation::error::{MemeError, MemeResult};

#[derive(Clone, Debug)]
/// Decoded raster image in straight (non-premultiplied) RGBA8.
pub struct DecodedImage {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Pixel data.
    pub rgba: Arc<image::RgbaImage>,
}

impl DecodedImage {
    /// Wrap an already-decoded RGBA buffer.
    pub fn from_rgba(rgba: image::RgbaImage) -> MemeResult<Self> {
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(MemeError::decode("image has zero width or height"));
        }
        Ok(Self {
            width,
            height,
            rgba: Arc::new(rgba),
        })
    }
}

/// Decode encoded image bytes (PNG, JPEG, GIF, WebP, BMP) into RGBA8.
///
/// Corrupt or unsupported data is reported as [`MemeError::Decode`]; it never yields a blank
/// image.
pub fn decode_image(bytes: &[u8]) -> MemeResult<DecodedImage> {
    if bytes.is_empty() {
        return Err(MemeError::decode("no image bytes"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| MemeError::decode(format!("decode image from memory: {e}")))?;
    DecodedImage::from_rgba(dyn_img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
