//! # Preview Rendering
//!
//! A small host for the hierarchy pass: markdown is parsed with
//! `pulldown-cmark`, split into top-level blocks the way a preview pane
//! renders them, and each block is handed to a post-processor before being
//! serialised to HTML.
//!
//! Each block remembers the tag of its first rendered element (`H2`, `P`,
//! `PRE`, ...) and the source lines it came from, which is all the hierarchy
//! pass needs.

mod blocks;

use std::fmt::Write;

use relative_path::{RelativePath, RelativePathBuf};

use crate::hierarchy::{BlockReport, IndentWrapper};
use crate::host::{BlockElement, SectionInfo};

pub use blocks::split_blocks;

/// One rendered top-level block of a preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    first_child_tag: Option<String>,
    inner_html: String,
    text: String,
    classes: Vec<String>,
    wrappers: Vec<IndentWrapper>,
    section: Option<SectionInfo>,
}

impl RenderedBlock {
    pub fn new(
        first_child_tag: Option<&str>,
        inner_html: impl Into<String>,
        section: Option<SectionInfo>,
    ) -> Self {
        Self {
            first_child_tag: first_child_tag.map(str::to_ascii_uppercase),
            inner_html: inner_html.into(),
            text: String::new(),
            classes: Vec::new(),
            wrappers: Vec::new(),
            section,
        }
    }

    /// Attaches the block's visible text, for hosts that do not render HTML.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn wrappers(&self) -> &[IndentWrapper] {
        &self.wrappers
    }

    /// The block as a `<div>` holding its content followed by its wrappers.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<div");
        if !self.classes.is_empty() {
            let _ = write!(
                out,
                r#" class="{}""#,
                html_escape::encode_double_quoted_attribute(&self.classes.join(" "))
            );
        }
        out.push('>');
        out.push_str(self.inner_html.trim_end());
        for wrapper in &self.wrappers {
            let _ = write!(
                out,
                r#"<div class="{}"></div>"#,
                html_escape::encode_double_quoted_attribute(&wrapper.class_attr())
            );
        }
        out.push_str("</div>");
        out
    }
}

impl BlockElement for RenderedBlock {
    fn first_child_tag(&self) -> Option<&str> {
        self.first_child_tag.as_deref()
    }

    fn add_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }

    fn append_wrapper(&mut self, wrapper: IndentWrapper) {
        self.wrappers.push(wrapper);
    }

    fn section_info(&self) -> Option<SectionInfo> {
        self.section
    }
}

/// The rendered preview of one document after a full pass.
#[derive(Debug, Clone)]
pub struct Preview {
    path: RelativePathBuf,
    blocks: Vec<RenderedBlock>,
    reports: Vec<BlockReport>,
}

impl Preview {
    /// Splits `source` into blocks and runs `post_process` over each, in order.
    pub fn render<F>(path: &RelativePath, source: &str, mut post_process: F) -> Self
    where
        F: FnMut(&mut RenderedBlock) -> BlockReport,
    {
        let mut blocks = split_blocks(source);
        let reports = blocks.iter_mut().map(&mut post_process).collect();
        Self {
            path: path.to_relative_path_buf(),
            blocks,
            reports,
        }
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn blocks(&self) -> &[RenderedBlock] {
        &self.blocks
    }

    /// One report per block, in block order.
    pub fn reports(&self) -> &[BlockReport] {
        &self.reports
    }

    /// Every block's HTML, one block per line.
    pub fn to_html(&self) -> String {
        self.blocks
            .iter()
            .map(RenderedBlock::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
