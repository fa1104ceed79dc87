use std::sync::Arc;

use crate::{
    assets::{fonts, store::ImageStore},
    config::CompositorOpts,
    foundation::{
        core::{Rgb8, SurfaceSize},
        error::{MemeError, MemeResult},
    },
    render::{composite, filters, overlay, surface::RasterSurface},
    scene::model::SceneState,
};

/// Paints scene snapshots onto raster surfaces.
///
/// Paint order is fixed: white base, stretched image, filter, captions, emoji markers. Output
/// depends only on the snapshot, the referenced image pixels and the font database, so
/// rendering the same inputs twice yields identical bytes.
pub struct Compositor {
    opts: CompositorOpts,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("opts", &self.opts)
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

impl Compositor {
    /// Build a compositor, loading fonts as configured.
    pub fn new(opts: CompositorOpts) -> Self {
        let fontdb = fonts::build_fontdb(opts.load_system_fonts, opts.font_dirs.as_slice());
        Self { opts, fontdb }
    }

    /// Build a compositor around an existing font database.
    pub fn with_fontdb(opts: CompositorOpts, fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { opts, fontdb }
    }

    /// Active options.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Render `state` onto a fresh surface of `surface` size.
    #[tracing::instrument(skip(self, state, images), fields(w = surface.width, h = surface.height))]
    pub fn render(
        &self,
        state: &SceneState,
        images: &ImageStore,
        surface: SurfaceSize,
    ) -> MemeResult<RasterSurface> {
        let mut out = RasterSurface::filled(surface, Rgb8::WHITE);

        if let Some(handle) = state.image {
            let image = images.get(handle).ok_or_else(|| {
                MemeError::render(format!("unknown image handle {}", handle.as_u64()))
            })?;
            draw_stretched(&mut out, &image.rgba)?;
        }

        filters::apply_filter(
            &mut out,
            state.filter_kind,
            state.filter_intensity,
            self.opts.blur_sigma_per_100,
        )?;

        let plan = overlay::OverlayPlan::build(state, surface);
        if !plan.is_empty() {
            let layer = overlay::rasterize(&plan, &self.fontdb, &self.opts.emoji_font_families)?;
            composite::over_in_place(out.raw_mut(), &layer)?;
        }

        Ok(out)
    }
}

/// Stretch `image` to exactly cover `out` (aspect ratio is not preserved) and blend it over the
/// current contents.
fn draw_stretched(out: &mut RasterSurface, image: &image::RgbaImage) -> MemeResult<()> {
    let (w, h) = (out.width(), out.height());
    if image.dimensions() == (w, h) {
        return composite::straight_over_in_place(out.raw_mut(), image.as_raw());
    }
    let scaled = image::imageops::resize(image, w, h, image::imageops::FilterType::CatmullRom);
    composite::straight_over_in_place(out.raw_mut(), scaled.as_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
