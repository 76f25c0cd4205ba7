use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};
use xi_rope::Rope;

use super::RenderedBlock;
use crate::host::SectionInfo;

/// A top-level block whose events are still being collected.
struct PendingBlock<'a> {
    /// `None` for blocks a preview hides, such as front matter.
    tag: Option<String>,
    range: Range<usize>,
    events: Vec<Event<'a>>,
}

impl PendingBlock<'_> {
    fn finish(self, rope: &Rope) -> Option<RenderedBlock> {
        let tag = self.tag?;
        let text = plain_text(&self.events);
        let mut inner_html = String::new();
        html::push_html(&mut inner_html, self.events.into_iter());
        Some(
            RenderedBlock::new(Some(&tag), inner_html, Some(section_lines(rope, &self.range)))
                .with_text(text),
        )
    }
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

/// Splits markdown into the top-level blocks a preview renders, in order.
pub fn split_blocks(source: &str) -> Vec<RenderedBlock> {
    let rope = Rope::from(source);
    let mut blocks = Vec::new();
    let mut pending: Option<PendingBlock> = None;
    let mut depth = 0usize;

    for (event, range) in Parser::new_ext(source, options()).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    pending = Some(PendingBlock {
                        tag: block_tag(&tag),
                        range,
                        events: Vec::new(),
                    });
                }
                depth += 1;
                if let Some(block) = pending.as_mut() {
                    block.events.push(Event::Start(tag));
                }
            }
            Event::End(tag_end) => {
                if let Some(block) = pending.as_mut() {
                    block.events.push(Event::End(tag_end));
                }
                depth = depth.saturating_sub(1);
                if depth == 0
                    && let Some(finished) = pending.take().and_then(|b| b.finish(&rope))
                {
                    blocks.push(finished);
                }
            }
            // Leaf events outside any container, e.g. thematic breaks.
            event if depth == 0 => {
                let leaf = PendingBlock {
                    tag: Some(leaf_tag(&event).to_string()),
                    range,
                    events: vec![event],
                };
                blocks.extend(leaf.finish(&rope));
            }
            event => {
                if let Some(block) = pending.as_mut() {
                    block.events.push(event);
                }
            }
        }
    }

    blocks
}

fn block_tag(tag: &Tag) -> Option<String> {
    let name = match tag {
        Tag::Heading { level, .. } => return Some(format!("H{}", *level as usize)),
        Tag::MetadataBlock(_) => return None,
        Tag::Paragraph => "P",
        Tag::BlockQuote(_) => "BLOCKQUOTE",
        Tag::CodeBlock(_) => "PRE",
        Tag::List(Some(_)) => "OL",
        Tag::List(None) => "UL",
        Tag::Table(_) => "TABLE",
        Tag::DefinitionList => "DL",
        _ => "DIV",
    };
    Some(name.to_string())
}

/// Visible text of a block: inline text with line breaks between paragraphs,
/// list items and table rows.
fn plain_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::Rule => text.push_str("───"),
            Event::TaskListMarker(done) => text.push_str(if *done { "[x] " } else { "[ ] " }),
            Event::Start(Tag::Item) => text.push_str("• "),
            Event::End(TagEnd::Paragraph | TagEnd::Item | TagEnd::TableHead | TagEnd::TableRow) => {
                text.push('\n')
            }
            Event::End(TagEnd::TableCell) => text.push(' '),
            _ => {}
        }
    }
    text.trim_end().to_string()
}

fn leaf_tag(event: &Event) -> &'static str {
    match event {
        Event::Rule => "HR",
        _ => "DIV",
    }
}

/// Lines covered by a byte range; the trailing newline belongs to the last line.
fn section_lines(rope: &Rope, range: &Range<usize>) -> SectionInfo {
    let last_byte = range.end.saturating_sub(1).max(range.start).min(rope.len());
    SectionInfo {
        line_start: rope.line_of_offset(range.start.min(rope.len())),
        line_end: rope.line_of_offset(last_byte),
    }
}
