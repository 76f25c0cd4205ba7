use super::{DESCENDING_CLASS, HeadingLevel, TOP_OF_SECTION_CLASS, WRAPPER_CLASS};

/// Extra leading space a wrapper needs for the kind of block it wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clearance {
    #[default]
    Standard,
    /// Quotes and preformatted blocks.
    Wide,
    /// Horizontal rules.
    ExtraWide,
}

impl Clearance {
    /// Clearance for a block whose first child has tag `tag`.
    pub fn for_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(t) if t.eq_ignore_ascii_case("BLOCKQUOTE") || t.eq_ignore_ascii_case("PRE") => {
                Clearance::Wide
            }
            Some(t) if t.eq_ignore_ascii_case("HR") => Clearance::ExtraWide,
            _ => Clearance::Standard,
        }
    }

    fn marker(self) -> Option<&'static str> {
        match self {
            Clearance::Standard => None,
            Clearance::Wide => Some("rgh-top16"),
            Clearance::ExtraWide => Some("rgh-top32"),
        }
    }
}

/// One indent container to create around a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentRequest {
    pub target_level: HeadingLevel,
    /// First content block after a heading.
    pub is_top_of_section: bool,
    /// Heading directly below a shallower heading.
    pub preceding_gap_level: bool,
    /// How many levels shallower than the live heading this wrapper is.
    pub left_offset_steps: u8,
    pub clearance: Clearance,
}

impl IndentRequest {
    pub fn new(
        target_level: HeadingLevel,
        active_level: HeadingLevel,
        is_top_of_section: bool,
        preceding_gap_level: bool,
        clearance: Clearance,
    ) -> Self {
        Self {
            target_level,
            is_top_of_section,
            preceding_gap_level,
            left_offset_steps: active_level.get().saturating_sub(target_level.get()),
            clearance,
        }
    }

    /// Builds the container with its marker classes.
    pub fn build(&self) -> IndentWrapper {
        let mut classes = vec![
            WRAPPER_CLASS.to_string(),
            format!("{WRAPPER_CLASS}-{}", self.target_level),
        ];
        if self.left_offset_steps > 0 {
            classes.push(format!("rgh-left{}0", self.left_offset_steps));
        }
        if self.is_top_of_section {
            classes.push(TOP_OF_SECTION_CLASS.to_string());
        }
        if self.preceding_gap_level {
            classes.push(DESCENDING_CLASS.to_string());
        }
        if let Some(marker) = self.clearance.marker() {
            classes.push(marker.to_string());
        }

        IndentWrapper {
            level: self.target_level,
            classes,
        }
    }
}

/// A generated nesting container, owned by the block it was appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentWrapper {
    level: HeadingLevel,
    classes: Vec<String>,
}

impl IndentWrapper {
    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Classes joined for a `class` attribute.
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }
}
