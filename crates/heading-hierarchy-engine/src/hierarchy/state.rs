use std::collections::HashMap;

use relative_path::{RelativePath, RelativePathBuf};

/// Heading context carried from one block to the next within a render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalState {
    /// Raw level of the last heading seen, `None` until the first heading.
    ///
    /// Kept unvalidated so a corrupted value is caught at use rather than hidden.
    pub active_heading_level: Option<u8>,
    /// Whether the previous block was itself a heading.
    pub heading_was_last_block: bool,
}

impl TraversalState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_reset(&self) -> bool {
        *self == Self::default()
    }
}

/// Traversal state per document, keyed by vault-relative source path.
///
/// Rendering one note never sees the heading context of another.
#[derive(Debug, Default)]
pub struct SessionStates {
    sessions: HashMap<RelativePathBuf, TraversalState>,
}

impl SessionStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for `path`; an unknown document is in the reset state.
    pub fn state(&self, path: &RelativePath) -> TraversalState {
        self.sessions.get(path).copied().unwrap_or_default()
    }

    pub fn state_mut(&mut self, path: &RelativePath) -> &mut TraversalState {
        self.sessions.entry(path.to_relative_path_buf()).or_default()
    }

    pub fn reset(&mut self, path: &RelativePath) {
        if self.sessions.remove(path).is_some() {
            log::debug!("Reset heading state for {path}");
        }
    }

    pub fn reset_all(&mut self) {
        log::debug!("Reset heading state for {} documents", self.sessions.len());
        self.sessions.clear();
    }

    /// Number of documents carrying heading context.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
