//! memeforge is a deterministic image-annotation engine.
//!
//! A scene is a base image, two styled captions, draggable emoji markers and one global filter.
//! The crate composites such a scene onto a raster surface and keeps a linear, snapshot-based
//! undo history of every edit.
//!
//! # Pipeline overview
//!
//! 1. **Load**: encoded bytes are decoded off-thread into a [`DecodedImage`] held by the
//!    [`ImageStore`]; the surface size follows the image (longest side capped at 1200 px).
//! 2. **Edit**: widget setters and pointer gestures on the [`Editor`] produce a new
//!    [`SceneState`], recorded once per edit in the [`History`].
//! 3. **Render**: the [`Compositor`] paints white base, stretched image, filter, captions and
//!    emoji markers in that fixed order onto a [`RasterSurface`].
//! 4. **Export**: [`export_png`] encodes the surface as `meme.png`.
//!
//! All positions and sizes live in a 400x400 logical frame and are only scaled to physical
//! pixels at render time (see [`to_surface`] and [`scale_scalar`]).
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same snapshot, image and fonts always give the same pixels.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod coords;
mod editor;
mod export;
mod foundation;
mod history;
mod interaction;
mod render;
mod scene;

pub use assets::decode::{DecodedImage, decode_image};
pub use assets::fonts::build_fontdb;
pub use assets::store::ImageStore;
pub use config::{CompositorOpts, EditorOpts};
pub use coords::normalizer::{scalar_factor, scale_factors, scale_scalar, to_logical, to_surface};
pub use editor::loader::LoadTicket;
pub use editor::session::{Editor, LoadStatus};
pub use export::png::{EXPORT_FILE_NAME, ExportedImage, export_png};
pub use foundation::core::{
    LOGICAL_EXTENT, LogicalPoint, MAX_SURFACE_DIM, PhysicalPoint, Rgb8, SurfaceSize, Vec2,
};
pub use foundation::error::{MemeError, MemeResult};
pub use history::manager::History;
pub use interaction::controller::{DragState, HIT_HALF_EXTENT, InteractionController, hit_test};
pub use render::compositor::Compositor;
pub use render::filters::apply_filter;
pub use render::overlay::{GlyphDraw, OverlayPlan, STROKE_DIVISOR, TextDraw};
pub use render::surface::RasterSurface;
pub use scene::model::{
    EMOJI_PALETTE, EmojiMarker, FILTER_INTENSITY_RANGE, FONT_SIZE_RANGE, FilterKind, FontFamily,
    ImageHandle, SceneState, TEXT_Y_RANGE, clamp_filter_intensity, clamp_font_size,
    clamp_logical_point, clamp_text_y,
};
