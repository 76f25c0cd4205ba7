use relative_path::RelativePath;

use super::{
    BlockClassification, BoundaryCheck, CONTENT_CONTAINER_CLASS, Clearance,
    HEADING_CONTAINER_CLASS, HeadingLevel, IndentRequest, SessionStates, boundary, classify_tag,
};
use crate::host::{BlockElement, DocumentReader};

/// What the tracker did with a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    /// The block has no rendered children.
    Empty,
    /// Content before the first heading; left unwrapped.
    Prologue,
    Heading {
        level: HeadingLevel,
        /// Placed directly under a shallower heading.
        descending: bool,
    },
    Content {
        level: HeadingLevel,
        /// First content block after a heading.
        top_of_section: bool,
    },
    /// The stored heading level was outside `1..=6`; no wrappers were created.
    InvalidState { level: u8 },
}

/// Everything one call to [`HierarchyTracker::process_block`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReport {
    pub outcome: BlockOutcome,
    /// Wrappers appended to the block, in append order.
    pub wrappers: Vec<IndentRequest>,
    pub boundary: BoundaryCheck,
}

/// Per-block visitor tracking heading context across a render pass.
///
/// The host calls [`process_block`](Self::process_block) once per rendered
/// block, in document order. Heading context is kept per source document.
#[derive(Debug, Default)]
pub struct HierarchyTracker {
    sessions: SessionStates,
}

impl HierarchyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &SessionStates {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut SessionStates {
        &mut self.sessions
    }

    /// Classifies `block`, decorates it and advances its document's state.
    ///
    /// Never fails: anomalies and unreadable documents are logged and
    /// reported in the returned [`BlockReport`].
    pub fn process_block<B, R>(
        &mut self,
        block: &mut B,
        source_path: &RelativePath,
        reader: &R,
    ) -> BlockReport
    where
        B: BlockElement + ?Sized,
        R: DocumentReader + ?Sized,
    {
        let (outcome, wrappers) = self.annotate(block, source_path);

        let boundary = boundary::check(reader, source_path, block.section_info());
        if boundary == BoundaryCheck::Reset {
            self.sessions.reset(source_path);
        }

        log::debug!("{source_path}: {outcome:?}, {} wrappers, {boundary:?}", wrappers.len());
        BlockReport {
            outcome,
            wrappers,
            boundary,
        }
    }

    fn annotate<B: BlockElement + ?Sized>(
        &mut self,
        block: &mut B,
        source_path: &RelativePath,
    ) -> (BlockOutcome, Vec<IndentRequest>) {
        let Some(tag) = block.first_child_tag() else {
            return (BlockOutcome::Empty, Vec::new());
        };
        let classification = classify_tag(tag);
        let clearance = Clearance::for_tag(Some(tag));

        let (outcome, requests) = match classification {
            BlockClassification::Heading(level) => {
                self.enter_heading(block, source_path, level, clearance)
            }
            BlockClassification::Content => self.enter_content(block, source_path, clearance),
        };

        for request in &requests {
            block.append_wrapper(request.build());
        }
        (outcome, requests)
    }

    fn enter_heading<B: BlockElement + ?Sized>(
        &mut self,
        block: &mut B,
        source_path: &RelativePath,
        level: HeadingLevel,
        clearance: Clearance,
    ) -> (BlockOutcome, Vec<IndentRequest>) {
        let state = self.sessions.state_mut(source_path);
        let descending = state.heading_was_last_block
            && state
                .active_heading_level
                .is_some_and(|previous| level.get() > previous);

        block.add_class(HEADING_CONTAINER_CLASS);
        block.add_class(&level.heading_marker());

        // Offsets are measured against the heading being entered.
        let requests = level
            .ancestors()
            .map(|ancestor| IndentRequest::new(ancestor, level, false, descending, clearance))
            .collect();

        state.active_heading_level = Some(level.get());
        state.heading_was_last_block = true;

        (BlockOutcome::Heading { level, descending }, requests)
    }

    fn enter_content<B: BlockElement + ?Sized>(
        &mut self,
        block: &mut B,
        source_path: &RelativePath,
        clearance: Clearance,
    ) -> (BlockOutcome, Vec<IndentRequest>) {
        let Some(raw_level) = self.sessions.state(source_path).active_heading_level else {
            return (BlockOutcome::Prologue, Vec::new());
        };
        let state = self.sessions.state_mut(source_path);

        block.add_class(CONTENT_CONTAINER_CLASS);
        block.add_class(&format!("rgh-h{raw_level}"));

        let top_of_section = state.heading_was_last_block;
        state.heading_was_last_block = false;

        let Some(level) = HeadingLevel::new(raw_level) else {
            log::warn!(
                "Invalid previous heading level {raw_level} in {source_path}, skipping indentation"
            );
            return (BlockOutcome::InvalidState { level: raw_level }, Vec::new());
        };

        let requests = level
            .down_to_root()
            .map(|target| IndentRequest::new(target, level, top_of_section, false, clearance))
            .collect();

        (
            BlockOutcome::Content {
                level,
                top_of_section,
            },
            requests,
        )
    }
}
