//! # Heading Hierarchy
//!
//! Stateful post-processing pass over the rendered blocks of a document.
//! Every block is visited once, in document order, and wrapped in one indent
//! container per heading level it sits under.
//!
//! ## Modules
//!
//! - **`classify`**: `classify_tag` maps a block's leading element tag to a
//!   `HeadingLevel` or plain content
//! - **`state`**: `TraversalState` and the per-document `SessionStates`
//! - **`indent`**: `IndentRequest` and the `IndentWrapper` it builds
//! - **`boundary`**: end-of-document detection that resets a session
//! - **`tracker`**: `HierarchyTracker`, the per-block visitor tying it together
//!
//! ## Key Invariants
//!
//! - A heading at level L gets L-1 wrappers, content gets one per active level
//! - Content before the first heading is left untouched
//! - A session is reset once a block reaches the last line of its document

pub mod boundary;
pub mod classify;
pub mod indent;
pub mod state;
pub mod tracker;

pub use boundary::{BoundaryCheck, should_reset, total_lines};
pub use classify::{BlockClassification, HeadingLevel, classify_tag};
pub use indent::{Clearance, IndentRequest, IndentWrapper};
pub use state::{SessionStates, TraversalState};
pub use tracker::{BlockOutcome, BlockReport, HierarchyTracker};

/// Marker on a block whose first child is a heading.
pub const HEADING_CONTAINER_CLASS: &str = "rgh-div-head";
/// Marker on a content block that sits under a heading.
pub const CONTENT_CONTAINER_CLASS: &str = "rgh-div";
/// Marker on every generated indent container.
pub const WRAPPER_CLASS: &str = "rgh-line";
/// First wrapper of the first content block after a heading.
pub const TOP_OF_SECTION_CLASS: &str = "rgh-top2";
/// Wrappers of a heading placed directly under a shallower heading.
pub const DESCENDING_CLASS: &str = "rgh-top5";
/// Root element marker enabling the author stylesheet.
pub const AUTHOR_STYLE_CLASS: &str = "better-headings-author-style";
