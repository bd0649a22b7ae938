use tracing::debug;

/// Whether the current editing session holds unsaved edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyTracker {
    dirty: bool,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns `true` when this call flipped the flag.
    pub fn mark(&mut self) -> bool {
        if self.dirty {
            return false;
        }
        debug!("editing session became dirty");
        self.dirty = true;
        true
    }

    pub fn reset(&mut self) {
        self.dirty = false;
    }
}
