//! Seams to the application hosting the preview.
//!
//! The hierarchy pass never touches a real DOM or file system directly. The
//! host hands it blocks through [`BlockElement`], answers document reads
//! through [`DocumentReader`] and receives styling and rerender requests
//! through [`StyleToggle`] and [`Rerender`].

use std::collections::BTreeSet;

use relative_path::{RelativePath, RelativePathBuf};

use crate::hierarchy::{AUTHOR_STYLE_CLASS, IndentWrapper};
use crate::io::IoError;

/// Source lines a rendered block came from, 0-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionInfo {
    pub line_start: usize,
    pub line_end: usize,
}

/// A rendered block the hierarchy pass can inspect and decorate.
pub trait BlockElement {
    /// Upper-case tag of the first rendered child, `None` for an empty block.
    fn first_child_tag(&self) -> Option<&str>;

    /// Adds a marker class; adding one that is already present is a no-op.
    fn add_class(&mut self, class: &str);

    /// Appends a nesting container. The block owns it, so it goes away when
    /// the block is re-rendered or dropped.
    fn append_wrapper(&mut self, wrapper: IndentWrapper);

    /// Source position, `None` for blocks the host synthesized.
    fn section_info(&self) -> Option<SectionInfo>;
}

/// Reads the full text of a document for end-of-document detection.
pub trait DocumentReader {
    fn read(&self, path: &RelativePath) -> Result<String, IoError>;
}

impl<R: DocumentReader + ?Sized> DocumentReader for &R {
    fn read(&self, path: &RelativePath) -> Result<String, IoError> {
        (**self).read(path)
    }
}

/// Switches the author stylesheet on the application root.
pub trait StyleToggle {
    /// Idempotent: applying the same value twice changes nothing.
    fn set_author_style(&mut self, enabled: bool);
}

/// Forces the host to render a document's preview again.
pub trait Rerender {
    fn rerender(&mut self, path: &RelativePath);
}

/// How the active view presents its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Preview,
    Source,
}

/// The view focused when the workspace layout changed.
#[derive(Debug, Clone, Copy)]
pub struct ActiveView<'a> {
    pub path: &'a RelativePath,
    pub mode: ViewMode,
}

/// Class list of the application root element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootClasses(BTreeSet<String>);

impl RootClasses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }

    pub fn author_style_enabled(&self) -> bool {
        self.contains(AUTHOR_STYLE_CLASS)
    }
}

impl StyleToggle for RootClasses {
    fn set_author_style(&mut self, enabled: bool) {
        if enabled {
            self.0.insert(AUTHOR_STYLE_CLASS.to_string());
        } else {
            self.0.remove(AUTHOR_STYLE_CLASS);
        }
    }
}

/// Collects rerender requests for the host loop to act on.
#[derive(Debug, Clone, Default)]
pub struct RerenderQueue {
    pending: Vec<RelativePathBuf>,
}

impl RerenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> Vec<RelativePathBuf> {
        std::mem::take(&mut self.pending)
    }
}

impl Rerender for RerenderQueue {
    fn rerender(&mut self, path: &RelativePath) {
        if !self.pending.iter().any(|p| p.as_relative_path() == path) {
            self.pending.push(path.to_relative_path_buf());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_style_toggle_is_idempotent() {
        let mut root = RootClasses::new();

        root.set_author_style(true);
        root.set_author_style(true);
        assert!(root.author_style_enabled());

        root.set_author_style(false);
        root.set_author_style(false);
        assert!(!root.author_style_enabled());
        assert_eq!(root, RootClasses::new());
    }

    #[test]
    fn rerender_queue_deduplicates() {
        let mut queue = RerenderQueue::new();
        queue.rerender(RelativePath::new("a.md"));
        queue.rerender(RelativePath::new("a.md"));
        queue.rerender(RelativePath::new("b.md"));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
    }
}
