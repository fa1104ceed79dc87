//! Conversion between the 400x400 logical frame and surface pixels.
//!
//! Positions scale independently per axis, so a point keeps its relative place on any aspect
//! ratio. Scalars (font size, glyph size, blur sigma) scale by the smaller of the two axis factors
//! so they stay aspect-correct.

use crate::foundation::core::{LOGICAL_EXTENT, LogicalPoint, PhysicalPoint, SurfaceSize, Vec2};

/// Per-axis factors from logical units to surface pixels.
pub fn scale_factors(surface: SurfaceSize) -> Vec2 {
    Vec2::new(
        f64::from(surface.width) / LOGICAL_EXTENT,
        f64::from(surface.height) / LOGICAL_EXTENT,
    )
}

/// Uniform factor used for sizes: the minimum of the two axis factors.
pub fn scalar_factor(surface: SurfaceSize) -> f64 {
    let f = scale_factors(surface);
    f.x.min(f.y)
}

/// Scale a logical scalar (e.g. font size) to surface pixels.
pub fn scale_scalar(value: f64, surface: SurfaceSize) -> f64 {
    value * scalar_factor(surface)
}

/// Map a logical point to surface pixels.
pub fn to_surface(p: LogicalPoint, surface: SurfaceSize) -> PhysicalPoint {
    let f = scale_factors(surface);
    PhysicalPoint::new(p.x * f.x, p.y * f.y)
}

/// Map a surface-pixel point back into the logical frame. Exact inverse of [`to_surface`].
pub fn to_logical(p: PhysicalPoint, surface: SurfaceSize) -> LogicalPoint {
    let f = scale_factors(surface);
    LogicalPoint::new(p.x / f.x, p.y / f.y)
}

#[cfg(test)]
#[path = "../../tests/unit/coords/normalizer.rs"]
mod tests;
