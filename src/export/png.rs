use std::io::Cursor;

use crate::{
    foundation::error::{MemeError, MemeResult},
    render::surface::RasterSurface,
};

/// File name suggested for exported images.
pub const EXPORT_FILE_NAME: &str = "meme.png";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Encoded export ready to be handed to whatever writes it out.
pub struct ExportedImage {
    /// PNG-encoded bytes.
    pub bytes: Vec<u8>,
    /// Suggested file name.
    pub file_name: String,
}

/// Encode the surface as an RGBA PNG at its full resolution.
pub fn export_png(surface: &RasterSurface) -> MemeResult<ExportedImage> {
    let mut bytes = Vec::with_capacity(surface.as_raw().len() / 2);
    surface
        .as_image()
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| MemeError::export(format!("encode png: {e}")))?;
    tracing::debug!(
        width = surface.width(),
        height = surface.height(),
        bytes = bytes.len(),
        "exported png"
    );
    Ok(ExportedImage {
        bytes,
        file_name: EXPORT_FILE_NAME.to_string(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
