use std::fmt;

/// A markdown heading level, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Returns `None` for anything outside `1..=6`.
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&level)
            .then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every shallower level, outermost first (`H3` yields `H1`, `H2`).
    pub fn ancestors(self) -> impl Iterator<Item = HeadingLevel> {
        (Self::MIN..self.0).map(HeadingLevel)
    }

    /// This level and every shallower one, deepest first (`H3` yields `H3`, `H2`, `H1`).
    pub fn down_to_root(self) -> impl Iterator<Item = HeadingLevel> {
        (Self::MIN..=self.0).rev().map(HeadingLevel)
    }

    /// Marker for the heading block itself, e.g. `rgh-h2-head`.
    pub fn heading_marker(self) -> String {
        format!("rgh-h{}-head", self.0)
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// What a rendered block is, judged by its first element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockClassification {
    Heading(HeadingLevel),
    Content,
}

/// Classifies a block from the tag name of its first rendered child.
///
/// Only `H1`..`H6` (either case) are headings. Everything else, malformed
/// tags included, is content.
pub fn classify_tag(tag: &str) -> BlockClassification {
    match tag.as_bytes() {
        [b'H' | b'h', digit @ b'0'..=b'9'] => HeadingLevel::new(digit - b'0')
            .map(BlockClassification::Heading)
            .unwrap_or(BlockClassification::Content),
        _ => BlockClassification::Content,
    }
}
