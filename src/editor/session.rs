use std::collections::HashSet;

use rand::Rng;

use crate::{
    assets::{decode::DecodedImage, store::ImageStore},
    config::EditorOpts,
    coords::normalizer,
    editor::loader::{ImageLoader, LoadTicket},
    export::png::{ExportedImage, export_png},
    foundation::{
        core::{LOGICAL_EXTENT, LogicalPoint, PhysicalPoint, Rgb8, SurfaceSize},
        error::{MemeError, MemeResult},
    },
    history::manager::History,
    interaction::controller::InteractionController,
    render::{compositor::Compositor, surface::RasterSurface},
    scene::model::{
        EmojiMarker, FilterKind, FontFamily, ImageHandle, SceneState, clamp_filter_intensity,
        clamp_font_size, clamp_text_y,
    },
};

#[derive(Debug)]
/// Result of draining finished image loads.
pub enum LoadStatus {
    /// No load has been started, or the latest one was already reported.
    Idle,
    /// The latest load is still decoding.
    Pending,
    /// The latest load finished and is now the scene image.
    Loaded(ImageHandle),
    /// The latest load could not be decoded; the scene is unchanged.
    Failed(MemeError),
}

/// One editing session: live scene, undo history, pointer gestures and the rendered surface.
///
/// Every mutation follows the same pipeline: update the live scene, record one snapshot, then
/// re-render. Renders requested while an image is decoding are held back and run once the
/// decode settles.
#[derive(Debug)]
pub struct Editor {
    opts: EditorOpts,
    compositor: Compositor,
    images: ImageStore,
    history: History,
    scene: SceneState,
    surface_size: SurfaceSize,
    interaction: InteractionController,
    drag_origin: Option<LogicalPoint>,
    loader: ImageLoader,
    render_pending: bool,
    surface: RasterSurface,
}

impl Editor {
    /// Session with the default scene rendered on the blank placeholder.
    pub fn new(opts: EditorOpts) -> MemeResult<Self> {
        opts.validate()?;
        let compositor = Compositor::new(opts.compositor.clone());
        Self::with_compositor(opts, compositor)
    }

    /// Session using a prebuilt compositor (for sharing a font database).
    pub fn with_compositor(opts: EditorOpts, compositor: Compositor) -> MemeResult<Self> {
        opts.validate()?;
        let scene = SceneState::default();
        let surface_size = SurfaceSize::PLACEHOLDER;
        let surface = compositor.render(&scene, &ImageStore::new(), surface_size)?;
        Ok(Self {
            opts,
            compositor,
            images: ImageStore::new(),
            history: History::new(scene.clone()),
            scene,
            surface_size,
            interaction: InteractionController::new(),
            drag_origin: None,
            loader: ImageLoader::new(),
            render_pending: false,
            surface,
        })
    }

    /// Live scene. During a drag this already reflects the marker's current position.
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Undo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Size of the output surface for the current image.
    pub fn surface_size(&self) -> SurfaceSize {
        self.surface_size
    }

    /// Most recently rendered surface.
    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Decoded images referenced by this session.
    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Session options.
    pub fn opts(&self) -> &EditorOpts {
        &self.opts
    }

    /// Gesture controller state.
    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    /// True while an image decode is in flight.
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// True when a render was requested but is waiting for a decode.
    pub fn render_pending(&self) -> bool {
        self.render_pending
    }

    /// Start decoding `bytes` off-thread. Any earlier unfinished load is superseded.
    pub fn load_image(&mut self, bytes: Vec<u8>) -> MemeResult<LoadTicket> {
        self.loader.start(bytes)
    }

    /// Apply finished loads without blocking.
    pub fn poll_loads(&mut self) -> LoadStatus {
        let mut status = LoadStatus::Idle;
        while let Some(outcome) = self.loader.try_next() {
            if let Some(result) = self.loader.accept(outcome) {
                status = self.settle_load(result);
            }
        }
        if matches!(status, LoadStatus::Idle) && self.loader.is_loading() {
            LoadStatus::Pending
        } else {
            status
        }
    }

    /// Block until the latest load settles. Returns `Ok(None)` when nothing is in flight.
    pub fn wait_for_load(&mut self) -> MemeResult<Option<ImageHandle>> {
        let Some(result) = self.loader.wait_latest() else {
            return Ok(None);
        };
        match self.settle_load(result) {
            LoadStatus::Loaded(handle) => Ok(Some(handle)),
            LoadStatus::Failed(err) => Err(err),
            LoadStatus::Idle | LoadStatus::Pending => Ok(None),
        }
    }

    /// Decode `bytes` and make it the scene image before returning.
    pub fn load_image_blocking(&mut self, bytes: Vec<u8>) -> MemeResult<ImageHandle> {
        self.load_image(bytes)?;
        self.wait_for_load()?
            .ok_or_else(|| MemeError::decode("image load did not complete"))
    }

    #[tracing::instrument(skip(self, result))]
    fn settle_load(&mut self, result: MemeResult<DecodedImage>) -> LoadStatus {
        let status = match result {
            Ok(image) => {
                let (w, h) = (image.width, image.height);
                let handle = self.images.insert(image);
                self.finish_drag();
                self.scene.image = Some(handle);
                self.surface_size = self
                    .images
                    .surface_size_for(Some(handle), self.opts.max_surface_dim);
                tracing::info!(
                    natural_w = w,
                    natural_h = h,
                    surface_w = self.surface_size.width,
                    surface_h = self.surface_size.height,
                    "image loaded"
                );
                self.record_snapshot();
                self.render_pending = true;
                LoadStatus::Loaded(handle)
            }
            Err(err) => {
                tracing::warn!(error = %err, "image load failed; keeping current scene");
                LoadStatus::Failed(err)
            }
        };
        if self.render_pending && !self.loader.is_loading() {
            self.render_now();
        }
        status
    }

    /// Set the top caption.
    pub fn set_top_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        self.mutate(|s| s.top_text = text)
    }

    /// Set the bottom caption.
    pub fn set_bottom_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        self.mutate(|s| s.bottom_text = text)
    }

    /// Set the font size, clamped to `10..=100`.
    pub fn set_font_size(&mut self, size: i64) -> bool {
        self.mutate(|s| s.font_size = clamp_font_size(size))
    }

    /// Set the caption fill color.
    pub fn set_text_color(&mut self, color: Rgb8) -> bool {
        self.mutate(|s| s.text_color = color)
    }

    /// Set the caption typeface.
    pub fn set_font_family(&mut self, family: FontFamily) -> bool {
        self.mutate(|s| s.font_family = family)
    }

    /// Set the top caption baseline, clamped to `0..=400`.
    pub fn set_top_text_y(&mut self, y: i64) -> bool {
        self.mutate(|s| s.top_text_y = clamp_text_y(y))
    }

    /// Set the bottom caption baseline, clamped to `0..=400`.
    pub fn set_bottom_text_y(&mut self, y: i64) -> bool {
        self.mutate(|s| s.bottom_text_y = clamp_text_y(y))
    }

    /// Select the global filter.
    pub fn set_filter_kind(&mut self, kind: FilterKind) -> bool {
        self.mutate(|s| s.filter_kind = kind)
    }

    /// Set the filter intensity percentage, clamped to `0..=200`.
    pub fn set_filter_intensity(&mut self, pct: i64) -> bool {
        self.mutate(|s| s.filter_intensity = clamp_filter_intensity(pct))
    }

    /// Replace every editable field with `scene`'s (sanitized) values as one step. The current
    /// image is kept.
    pub fn apply_scene(&mut self, scene: SceneState) -> bool {
        let scene = scene.sanitized();
        self.mutate(|s| {
            let image = s.image;
            *s = SceneState { image, ..scene };
        })
    }

    /// Drop an emoji at a random point of the logical canvas.
    pub fn add_emoji(&mut self, glyph: impl Into<String>) -> bool {
        let mut rng = rand::rng();
        let p = LogicalPoint::new(
            rng.random_range(0.0..LOGICAL_EXTENT),
            rng.random_range(0.0..LOGICAL_EXTENT),
        );
        self.add_emoji_at(glyph, p)
    }

    /// Drop an emoji at `p` (logical, clamped to the canvas). Empty glyphs are ignored.
    pub fn add_emoji_at(&mut self, glyph: impl Into<String>, p: LogicalPoint) -> bool {
        let marker = EmojiMarker::new(glyph, p);
        if marker.glyph.is_empty() {
            return false;
        }
        self.mutate(|s| s.emoji_markers.push(marker))
    }

    /// Remove the most recently added emoji.
    pub fn remove_last_emoji(&mut self) -> bool {
        self.mutate(|s| {
            s.emoji_markers.pop();
        })
    }

    /// Step back one snapshot. Returns false at the oldest snapshot.
    #[tracing::instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        self.finish_drag();
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.apply_snapshot(snapshot);
        self.request_render();
        true
    }

    /// Step forward one snapshot. Returns false at the newest snapshot.
    #[tracing::instrument(skip(self))]
    pub fn redo(&mut self) -> bool {
        self.finish_drag();
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.apply_snapshot(snapshot);
        self.request_render();
        true
    }

    /// True when [`Editor::undo`] would change the scene.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// True when [`Editor::redo`] would change the scene.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn apply_snapshot(&mut self, snapshot: SceneState) {
        let SceneState {
            image,
            top_text,
            bottom_text,
            font_size,
            text_color,
            font_family,
            top_text_y,
            bottom_text_y,
            emoji_markers,
            filter_kind,
            filter_intensity,
        } = snapshot;

        if image != self.scene.image {
            self.surface_size = self
                .images
                .surface_size_for(image, self.opts.max_surface_dim);
        }
        self.scene.image = image;
        self.scene.top_text = top_text;
        self.scene.bottom_text = bottom_text;
        self.scene.font_size = font_size;
        self.scene.text_color = text_color;
        self.scene.font_family = font_family;
        self.scene.top_text_y = top_text_y;
        self.scene.bottom_text_y = bottom_text_y;
        self.scene.emoji_markers = emoji_markers;
        self.scene.filter_kind = filter_kind;
        self.scene.filter_intensity = filter_intensity;
    }

    /// Pointer pressed at a surface pixel. Returns true if a marker was picked up.
    pub fn pointer_down(&mut self, p: PhysicalPoint) -> bool {
        let logical = normalizer::to_logical(p, self.surface_size);
        let Some(index) = self.interaction.press(logical, &self.scene.emoji_markers) else {
            return false;
        };
        self.drag_origin = self.scene.emoji_markers.get(index).map(EmojiMarker::position);
        true
    }

    /// Pointer moved. Drags the held marker without recording.
    pub fn pointer_move(&mut self, p: PhysicalPoint) -> bool {
        let logical = normalizer::to_logical(p, self.surface_size);
        if !self
            .interaction
            .move_to(logical, &mut self.scene.emoji_markers)
        {
            return false;
        }
        self.request_render();
        true
    }

    /// Pointer released. Commits the gesture if the marker moved.
    pub fn pointer_up(&mut self) -> bool {
        self.finish_drag()
    }

    /// Pointer left the surface. Same as [`Editor::pointer_up`].
    pub fn pointer_leave(&mut self) -> bool {
        self.finish_drag()
    }

    fn finish_drag(&mut self) -> bool {
        let origin = self.drag_origin.take();
        let Some(index) = self.interaction.release() else {
            return false;
        };
        let moved = match (origin, self.scene.emoji_markers.get(index)) {
            (Some(from), Some(marker)) => from != marker.position(),
            _ => false,
        };
        if moved {
            tracing::debug!(marker = index, "drag committed");
            self.commit();
        }
        moved
    }

    /// Re-render now, or once the in-flight decode settles.
    pub fn request_render(&mut self) {
        if self.loader.is_loading() {
            self.render_pending = true;
            return;
        }
        self.render_now();
    }

    fn render_now(&mut self) {
        self.render_pending = false;
        match self
            .compositor
            .render(&self.scene, &self.images, self.surface_size)
        {
            Ok(surface) => self.surface = surface,
            Err(err) => tracing::error!(error = %err, "render failed; keeping previous surface"),
        }
    }

    /// Encode the current surface as PNG.
    pub fn export_png(&self) -> MemeResult<ExportedImage> {
        export_png(&self.surface)
    }

    fn mutate(&mut self, f: impl FnOnce(&mut SceneState)) -> bool {
        self.finish_drag();
        let mut next = self.scene.clone();
        f(&mut next);
        if next == self.scene {
            return false;
        }
        self.scene = next;
        self.commit();
        true
    }

    fn commit(&mut self) {
        self.record_snapshot();
        self.request_render();
    }

    fn record_snapshot(&mut self) {
        if self.history.record(self.scene.clone()) > 0 {
            self.prune_images();
        }
    }

    /// Evict decoded images that neither the live scene nor any snapshot refers to.
    fn prune_images(&mut self) {
        let live: HashSet<ImageHandle> = self
            .history
            .snapshots()
            .iter()
            .chain(std::iter::once(&self.scene))
            .filter_map(|s| s.image)
            .collect();
        let evicted = self.images.retain(|h| live.contains(&h));
        if evicted > 0 {
            tracing::debug!(
                evicted,
                remaining = self.images.len(),
                "evicted unreferenced images"
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
