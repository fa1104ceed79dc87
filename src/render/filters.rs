//! Global filters, following the CSS filter-function definitions.
//!
//! Intensity is a percentage. Grayscale, sepia and invert clamp the amount to 100%; brightness
//! and contrast are neutral at 100% and may exceed it. Blur maps intensity to a gaussian sigma.

use rayon::prelude::*;

use crate::{
    coords::normalizer,
    foundation::{error::MemeResult, math::clamp_channel},
    render::{blur, surface::RasterSurface},
    scene::model::FilterKind,
};

type Matrix3 = [[f64; 3]; 3];

#[derive(Clone, Copy, Debug, PartialEq)]
enum PixelOp {
    Matrix(Matrix3),
    Invert(f64),
    Linear { slope: f64, intercept: f64 },
}

/// Apply `kind` at `intensity_pct` to the whole surface in place.
///
/// `blur_sigma_per_100` is the blur sigma, in logical units, at 100% intensity.
pub fn apply_filter(
    surface: &mut RasterSurface,
    kind: FilterKind,
    intensity_pct: u32,
    blur_sigma_per_100: f64,
) -> MemeResult<()> {
    let amount = f64::from(intensity_pct) / 100.0;
    let op = match kind {
        FilterKind::None => return Ok(()),
        FilterKind::Blur => return apply_blur(surface, amount * blur_sigma_per_100),
        FilterKind::Grayscale => PixelOp::Matrix(grayscale_matrix(amount.min(1.0))),
        FilterKind::Sepia => PixelOp::Matrix(sepia_matrix(amount.min(1.0))),
        FilterKind::Invert => PixelOp::Invert(amount.min(1.0)),
        FilterKind::Brightness => PixelOp::Linear {
            slope: amount,
            intercept: 0.0,
        },
        FilterKind::Contrast => PixelOp::Linear {
            slope: amount,
            intercept: 127.5 * (1.0 - amount),
        },
    };

    surface
        .raw_mut()
        .par_chunks_exact_mut(4)
        .for_each(|px| apply_op(op, px));
    Ok(())
}

fn apply_op(op: PixelOp, px: &mut [u8]) {
    let rgb = [f64::from(px[0]), f64::from(px[1]), f64::from(px[2])];
    match op {
        PixelOp::Matrix(m) => {
            for (row, out) in m.iter().zip(px.iter_mut()) {
                *out = clamp_channel(row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]);
            }
        }
        PixelOp::Invert(a) => {
            for (c, out) in rgb.iter().zip(px.iter_mut()) {
                *out = clamp_channel(c * (1.0 - a) + (255.0 - c) * a);
            }
        }
        PixelOp::Linear { slope, intercept } => {
            for (c, out) in rgb.iter().zip(px.iter_mut()) {
                *out = clamp_channel(c * slope + intercept);
            }
        }
    }
}

fn grayscale_matrix(a: f64) -> Matrix3 {
    let s = 1.0 - a;
    [
        [0.2126 + 0.7874 * s, 0.7152 - 0.7152 * s, 0.0722 - 0.0722 * s],
        [0.2126 - 0.2126 * s, 0.7152 + 0.2848 * s, 0.0722 - 0.0722 * s],
        [0.2126 - 0.2126 * s, 0.7152 - 0.7152 * s, 0.0722 + 0.9278 * s],
    ]
}

fn sepia_matrix(a: f64) -> Matrix3 {
    let s = 1.0 - a;
    [
        [0.393 + 0.607 * s, 0.769 - 0.769 * s, 0.189 - 0.189 * s],
        [0.349 - 0.349 * s, 0.686 + 0.314 * s, 0.168 - 0.168 * s],
        [0.272 - 0.272 * s, 0.534 - 0.534 * s, 0.131 + 0.869 * s],
    ]
}

fn apply_blur(surface: &mut RasterSurface, sigma_logical: f64) -> MemeResult<()> {
    let sigma = normalizer::scale_scalar(sigma_logical, surface.size()) as f32;
    let radius = blur::radius_for_sigma(sigma);
    if radius == 0 {
        return Ok(());
    }
    tracing::debug!(sigma, radius, "blur filter");
    let (w, h) = (surface.width(), surface.height());
    let out = blur::blur_rgba8_premul(surface.as_raw(), w, h, radius, sigma)?;
    surface.raw_mut().copy_from_slice(&out);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/filters.rs"]
mod tests;
