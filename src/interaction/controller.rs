use crate::{
    foundation::core::LogicalPoint,
    scene::model::{EmojiMarker, clamp_logical_point},
};

/// Half-width, in logical units, of the square hit box around each marker.
pub const HIT_HALF_EXTENT: f64 = 20.0;

/// Pointer gesture state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A marker is being dragged.
    Dragging {
        /// Index of the dragged marker in paint order.
        marker: usize,
    },
}

/// Turns press/move/release into marker selection and repositioning.
///
/// All points are logical; callers convert device coordinates first.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    state: DragState,
}

impl InteractionController {
    /// Controller in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Index of the marker being dragged, if any.
    pub fn dragged_marker(&self) -> Option<usize> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { marker } => Some(marker),
        }
    }

    /// Start a drag on the earliest marker whose hit box contains `p`.
    ///
    /// Ignored while a gesture is already running. Returns the selected index.
    pub fn press(&mut self, p: LogicalPoint, markers: &[EmojiMarker]) -> Option<usize> {
        if self.state != DragState::Idle {
            return None;
        }
        let hit = hit_test(p, markers)?;
        tracing::debug!(marker = hit, x = p.x, y = p.y, "drag started");
        self.state = DragState::Dragging { marker: hit };
        Some(hit)
    }

    /// Move the dragged marker to `p`. Returns true if a marker moved.
    pub fn move_to(&mut self, p: LogicalPoint, markers: &mut [EmojiMarker]) -> bool {
        let Some(index) = self.dragged_marker() else {
            return false;
        };
        let Some(marker) = markers.get_mut(index) else {
            // Marker list changed under the gesture.
            self.state = DragState::Idle;
            return false;
        };
        let p = clamp_logical_point(p);
        marker.x = p.x;
        marker.y = p.y;
        true
    }

    /// End the gesture. Returns the index that was being dragged.
    pub fn release(&mut self) -> Option<usize> {
        let ended = self.dragged_marker();
        self.state = DragState::Idle;
        ended
    }

    /// Pointer left the surface; same as [`InteractionController::release`].
    pub fn leave(&mut self) -> Option<usize> {
        self.release()
    }
}

/// Index of the first marker (insertion order) whose hit box contains `p`.
pub fn hit_test(p: LogicalPoint, markers: &[EmojiMarker]) -> Option<usize> {
    markers.iter().position(|m| {
        (m.x - p.x).abs() < HIT_HALF_EXTENT && (m.y - p.y).abs() < HIT_HALF_EXTENT
    })
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;
