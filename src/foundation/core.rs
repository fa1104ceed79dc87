use std::{fmt, str::FromStr};

use crate::foundation::error::{MemeError, MemeResult};

pub use kurbo::Vec2;

/// Side length of the square logical frame every stored position and size lives in.
pub const LOGICAL_EXTENT: f64 = 400.0;

/// Surfaces larger than this on either axis are downscaled uniformly.
pub const MAX_SURFACE_DIM: u32 = 1200;

/// Point in the fixed 400x400 logical frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicalPoint {
    /// Horizontal logical coordinate.
    pub x: f64,
    /// Vertical logical coordinate.
    pub y: f64,
}

impl LogicalPoint {
    /// Construct a logical point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Point in surface pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhysicalPoint {
    /// Horizontal pixel coordinate (sub-pixel precision).
    pub x: f64,
    /// Vertical pixel coordinate (sub-pixel precision).
    pub y: f64,
}

impl PhysicalPoint {
    /// Construct a physical point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the output surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::PLACEHOLDER
    }
}

impl SurfaceSize {
    /// Surface used while no image is loaded.
    pub const PLACEHOLDER: Self = Self {
        width: 400,
        height: 400,
    };

    /// Construct a surface size; both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> MemeResult<Self> {
        if width == 0 || height == 0 {
            return Err(MemeError::validation("surface dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Derive the surface for an image of `natural_w x natural_h`.
    ///
    /// If either side exceeds `max_dim`, both are multiplied by the same ratio
    /// `min(max_dim / w, max_dim / h)`; results are rounded to whole pixels.
    pub fn fit(natural_w: u32, natural_h: u32, max_dim: u32) -> Self {
        let w = natural_w.max(1);
        let h = natural_h.max(1);
        let max_dim = max_dim.max(1);
        if w <= max_dim && h <= max_dim {
            return Self {
                width: w,
                height: h,
            };
        }

        let ratio = (f64::from(max_dim) / f64::from(w)).min(f64::from(max_dim) / f64::from(h));
        let scaled = |v: u32| ((f64::from(v) * ratio).round() as u32).clamp(1, max_dim);
        Self {
            width: scaled(w),
            height: scaled(h),
        }
    }

    /// Number of pixels on the surface.
    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Opaque 8-bit sRGB color, written as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Construct a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb8 {
    type Err = MemeError;

    fn from_str(s: &str) -> MemeResult<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> MemeResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| MemeError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        match hex.len() {
            6 if hex.bytes().all(|b| b.is_ascii_hexdigit()) => Ok(Self::new(
                hex_byte(&hex[0..2])?,
                hex_byte(&hex[2..4])?,
                hex_byte(&hex[4..6])?,
            )),
            3 if hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                let expand = |i: usize| hex_byte(&hex[i..i + 1].repeat(2));
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(MemeError::validation(format!(
                "color \"{s}\" must be #rrggbb or #rgb"
            ))),
        }
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
