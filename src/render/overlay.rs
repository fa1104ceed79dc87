//! Caption and emoji layout in surface pixels, and its rasterization.
//!
//! The plan is pure geometry; rasterization goes through a generated SVG document rendered by
//! resvg so captions get a real outline stroke.

use std::{fmt::Write as _, sync::Arc};

use anyhow::Context;

use crate::{
    assets::fonts,
    coords::normalizer,
    foundation::{
        core::{LogicalPoint, Rgb8, SurfaceSize},
        error::{MemeError, MemeResult},
    },
    scene::model::{FontFamily, SceneState},
};

/// Divisor applied to the scaled font size to get the caption outline width.
pub const STROKE_DIVISOR: f64 = 15.0;

#[derive(Clone, Debug, PartialEq)]
/// One caption, positioned in surface pixels.
pub struct TextDraw {
    /// Caption text.
    pub text: String,
    /// Horizontal center.
    pub x: f64,
    /// Baseline.
    pub y: f64,
    /// Font size in pixels.
    pub font_size: f64,
    /// Outline width in pixels.
    pub stroke_width: f64,
    /// Typeface.
    pub family: FontFamily,
    /// Fill color.
    pub fill: Rgb8,
    /// Outline color.
    pub stroke: Rgb8,
}

#[derive(Clone, Debug, PartialEq)]
/// One emoji marker, positioned in surface pixels.
pub struct GlyphDraw {
    /// Glyph text.
    pub glyph: String,
    /// Horizontal center.
    pub x: f64,
    /// Baseline.
    pub y: f64,
    /// Glyph size in pixels.
    pub font_size: f64,
    /// Fill used by monochrome fallback glyphs.
    pub fill: Rgb8,
}

#[derive(Clone, Debug, PartialEq)]
/// Everything painted after the filter, in paint order: captions first, then markers.
pub struct OverlayPlan {
    /// Target surface.
    pub surface: SurfaceSize,
    /// Captions (top, then bottom); empty captions are omitted.
    pub texts: Vec<TextDraw>,
    /// Markers in insertion order.
    pub glyphs: Vec<GlyphDraw>,
}

impl OverlayPlan {
    /// Lay out `state` on `surface`.
    pub fn build(state: &SceneState, surface: SurfaceSize) -> Self {
        let font_size = normalizer::scale_scalar(f64::from(state.font_size), surface);
        let center_x = f64::from(surface.width) / 2.0;

        let texts = [
            (&state.top_text, state.top_text_y),
            (&state.bottom_text, state.bottom_text_y),
        ]
        .into_iter()
        .filter(|(text, _)| !text.is_empty())
        .map(|(text, y)| {
            let baseline = normalizer::to_surface(LogicalPoint::new(0.0, f64::from(y)), surface).y;
            TextDraw {
                text: text.clone(),
                x: center_x,
                y: baseline,
                font_size,
                stroke_width: font_size / STROKE_DIVISOR,
                family: state.font_family,
                fill: state.text_color,
                stroke: Rgb8::BLACK,
            }
        })
        .collect();

        let glyphs = state
            .emoji_markers
            .iter()
            .filter(|m| !m.glyph.is_empty())
            .map(|m| {
                let p = normalizer::to_surface(m.position(), surface);
                GlyphDraw {
                    glyph: m.glyph.clone(),
                    x: p.x,
                    y: p.y,
                    font_size,
                    fill: state.text_color,
                }
            })
            .collect();

        Self {
            surface,
            texts,
            glyphs,
        }
    }

    /// True when nothing would be painted.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.glyphs.is_empty()
    }

    /// SVG document painting this plan on a transparent canvas.
    ///
    /// Each caption is emitted twice, outline first and fill second, so the fill covers the
    /// inner half of the stroke.
    pub fn to_svg(&self, emoji_families: &[String]) -> String {
        let (w, h) = (self.surface.width, self.surface.height);
        let mut svg = String::with_capacity(256 + 256 * (self.texts.len() + self.glyphs.len()));
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );

        for t in &self.texts {
            let family = format!("'{}', {}", t.family.name(), t.family.generic_fallback());
            let text = escape_text(&t.text);
            let _ = write!(
                svg,
                r#"<text x="{x:.4}" y="{y:.4}" font-family="{family}" font-size="{size:.4}" text-anchor="middle" xml:space="preserve" fill="none" stroke="{stroke}" stroke-width="{sw:.4}" stroke-linejoin="miter">{text}</text>"#,
                x = t.x,
                y = t.y,
                size = t.font_size,
                stroke = t.stroke.to_hex(),
                sw = t.stroke_width,
            );
            let _ = write!(
                svg,
                r#"<text x="{x:.4}" y="{y:.4}" font-family="{family}" font-size="{size:.4}" text-anchor="middle" xml:space="preserve" fill="{fill}">{text}</text>"#,
                x = t.x,
                y = t.y,
                size = t.font_size,
                fill = t.fill.to_hex(),
            );
        }

        let emoji_family = emoji_families
            .iter()
            .map(|f| format!("'{}'", escape_attr(f)))
            .chain(std::iter::once("sans-serif".to_string()))
            .collect::<Vec<_>>()
            .join(", ");
        for g in &self.glyphs {
            let _ = write!(
                svg,
                r#"<text x="{x:.4}" y="{y:.4}" font-family="{emoji_family}" font-size="{size:.4}" text-anchor="middle" fill="{fill}">{glyph}</text>"#,
                x = g.x,
                y = g.y,
                size = g.font_size,
                fill = g.fill.to_hex(),
                glyph = escape_text(&g.glyph),
            );
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Rasterize `plan` into a premultiplied RGBA8 buffer the size of its surface.
pub fn rasterize(
    plan: &OverlayPlan,
    fontdb: &Arc<usvg::fontdb::Database>,
    emoji_families: &[String],
) -> MemeResult<Vec<u8>> {
    rasterize_svg(&plan.to_svg(emoji_families), plan.surface, fontdb)
}

/// Render an SVG document onto a transparent `surface`-sized premultiplied buffer.
///
/// Bitmap glyphs (CBDT/sbix color emoji) reach resvg as image nodes, so raster image support
/// must be compiled in for them to paint.
pub(crate) fn rasterize_svg(
    svg: &str,
    surface: SurfaceSize,
    fontdb: &Arc<usvg::fontdb::Database>,
) -> MemeResult<Vec<u8>> {
    let opts = usvg::Options {
        fontdb: Arc::clone(fontdb),
        font_resolver: fonts::make_font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse overlay svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(surface.width, surface.height)
        .ok_or_else(|| MemeError::render("failed to allocate overlay pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap.take())
}

/// Escape text content; line breaks and tabs paint as spaces, other controls are dropped.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' | '\r' | '\t' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    escape_text(s)
        .replace('"', "&quot;")
        .replace('\'', "")
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
