use crate::scene::model::SceneState;

/// Linear snapshot history with a cursor.
///
/// Always holds at least one snapshot and keeps `index < len`. Recording after an undo drops the
/// redo branch.
#[derive(Clone, Debug)]
pub struct History {
    snapshots: Vec<SceneState>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(SceneState::default())
    }
}

impl History {
    /// History holding only `initial`.
    pub fn new(initial: SceneState) -> Self {
        Self {
            snapshots: vec![initial],
            index: 0,
        }
    }

    /// Append `state` after the cursor, discarding any redo entries first.
    ///
    /// Returns how many redo entries were discarded.
    pub fn record(&mut self, state: SceneState) -> usize {
        let dropped = self.snapshots.len() - (self.index + 1);
        if dropped > 0 {
            tracing::debug!(dropped, "history branch truncated");
        }
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(state);
        self.index = self.snapshots.len() - 1;
        dropped
    }

    /// Step back one snapshot. `None` at the start.
    pub fn undo(&mut self) -> Option<&SceneState> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.snapshots.get(self.index)
    }

    /// Step forward one snapshot. `None` at the tail.
    pub fn redo(&mut self) -> Option<&SceneState> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index)
    }

    /// True when [`History::undo`] would move the cursor.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// True when [`History::redo`] would move the cursor.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> &SceneState {
        &self.snapshots[self.index]
    }

    /// Cursor position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true; a history always holds its initial snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All stored snapshots, oldest first.
    pub fn snapshots(&self) -> &[SceneState] {
        &self.snapshots
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/manager.rs"]
mod tests;
