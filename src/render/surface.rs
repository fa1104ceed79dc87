use crate::foundation::{
    core::{Rgb8, SurfaceSize},
    math::Fnv1a64,
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Opaque RGBA8 raster the compositor paints into.
///
/// Every pixel has alpha 255 once step 1 of a render has run, so the buffer is valid both as
/// straight and as premultiplied RGBA.
pub struct RasterSurface {
    size: SurfaceSize,
    pixels: image::RgbaImage,
}

impl RasterSurface {
    /// Surface of `size` filled with an opaque `color`.
    pub fn filled(size: SurfaceSize, color: Rgb8) -> Self {
        let px = image::Rgba([color.r, color.g, color.b, 255]);
        Self {
            size,
            pixels: image::RgbaImage::from_pixel(size.width, size.height, px),
        }
    }

    /// Surface dimensions.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Pixel at `(x, y)` as `[r, g, b, a]`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }

    /// Row-major RGBA8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Borrow as an `image` buffer.
    pub fn as_image(&self) -> &image::RgbaImage {
        &self.pixels
    }

    /// Consume into the backing `image` buffer.
    pub fn into_image(self) -> image::RgbaImage {
        self.pixels
    }

    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Stable 64-bit digest of dimensions and pixels.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.size.width);
        h.write_u32(self.size.height);
        h.write_bytes(self.as_raw());
        h.finish()
    }
}
