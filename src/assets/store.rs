use std::collections::HashMap;

use crate::{
    assets::decode::DecodedImage, foundation::core::SurfaceSize, scene::model::ImageHandle,
};

#[derive(Clone, Debug, Default)]
/// Decoded images addressable by [`ImageHandle`].
///
/// Handles are issued from a monotonic counter and never reused, so snapshots in the history
/// can keep referring to older images after a newer one is loaded. The owner evicts images no
/// snapshot refers to any more with [`ImageStore::retain`].
pub struct ImageStore {
    next_id: u64,
    images: HashMap<ImageHandle, DecodedImage>,
}

impl ImageStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `image` and return its handle.
    pub fn insert(&mut self, image: DecodedImage) -> ImageHandle {
        self.next_id += 1;
        let handle = ImageHandle(self.next_id);
        self.images.insert(handle, image);
        handle
    }

    /// Lookup a decoded image.
    pub fn get(&self, handle: ImageHandle) -> Option<&DecodedImage> {
        self.images.get(&handle)
    }

    /// Surface size for `handle` (placeholder size for `None` or unknown handles).
    pub fn surface_size_for(&self, handle: Option<ImageHandle>, max_dim: u32) -> SurfaceSize {
        handle
            .and_then(|h| self.get(h))
            .map(|img| SurfaceSize::fit(img.width, img.height, max_dim))
            .unwrap_or(SurfaceSize::PLACEHOLDER)
    }

    /// Drop every image for which `keep` returns false. Returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(ImageHandle) -> bool) -> usize {
        let before = self.images.len();
        self.images.retain(|handle, _| keep(*handle));
        before - self.images.len()
    }

    /// Number of stored images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True when no image has been stored.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
