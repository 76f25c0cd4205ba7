//! Terminal rendering of an annotated preview.
//!
//! Every indent wrapper on a block becomes one `│ ` guide in front of each of
//! its lines, outermost level first, so nesting reads left to right the same
//! way the stylesheet indents it.

use heading_hierarchy_engine::{
    AUTHOR_STYLE_CLASS, BlockClassification, BlockElement, HEADING_CONTAINER_CLASS, HeadingLevel,
    IndentWrapper, Preview, RenderedBlock, classify_tag,
};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const GUIDE: &str = "│ ";

fn level_color(level: HeadingLevel) -> Color {
    match level.get() {
        1 => Color::Cyan,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Magenta,
        5 => Color::Blue,
        _ => Color::Red,
    }
}

/// Lines for the whole preview, with a blank line before every heading but the first.
pub fn preview_lines(preview: &Preview, author_style: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in preview.blocks() {
        if is_heading(block) && !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.extend(block_lines(block, author_style));
    }
    lines
}

fn is_heading(block: &RenderedBlock) -> bool {
    block.classes().iter().any(|c| c == HEADING_CONTAINER_CLASS)
}

fn heading_level(block: &RenderedBlock) -> Option<HeadingLevel> {
    match classify_tag(block.first_child_tag()?) {
        BlockClassification::Heading(level) => Some(level),
        BlockClassification::Content => None,
    }
}

fn guides(block: &RenderedBlock, author_style: bool) -> Vec<Span<'static>> {
    let mut wrappers: Vec<&IndentWrapper> = block.wrappers().iter().collect();
    wrappers.sort_by_key(|w| w.level());
    wrappers
        .into_iter()
        .map(|w| {
            let style = if author_style {
                Style::default().fg(level_color(w.level()))
            } else {
                Style::default()
            };
            Span::styled(GUIDE, style)
        })
        .collect()
}

fn block_lines(block: &RenderedBlock, author_style: bool) -> Vec<Line<'static>> {
    let prefix = guides(block, author_style);
    let mut text_style = Style::default();
    if let Some(level) = heading_level(block) {
        text_style = text_style.add_modifier(Modifier::BOLD);
        if author_style {
            text_style = text_style.fg(level_color(level));
        }
    }

    let text = block.text();
    let rows: Vec<&str> = if text.is_empty() {
        vec![""]
    } else {
        text.lines().collect()
    };
    rows.into_iter()
        .map(|row| {
            let mut spans = prefix.clone();
            spans.push(Span::styled(row.to_string(), text_style));
            Line::from(spans)
        })
        .collect()
}

/// A standalone HTML body for `--html` output.
pub fn html_document(preview: &Preview, author_style: bool) -> String {
    let body_class = if author_style {
        format!(r#" class="{AUTHOR_STYLE_CLASS}""#)
    } else {
        String::new()
    };
    format!("<body{body_class}>\n{}\n</body>", preview.to_html())
}
