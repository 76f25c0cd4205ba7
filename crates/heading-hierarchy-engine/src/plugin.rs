//! Plugin lifecycle around the hierarchy pass.
//!
//! Owns the settings, the root style toggle and the tracker, and translates
//! host events (load, unload, layout change, settings edits) into state
//! resets and rerender requests.

use heading_hierarchy_config::{Settings, SettingsStore};
use relative_path::RelativePath;

use crate::hierarchy::{BlockReport, HierarchyTracker};
use crate::host::{ActiveView, BlockElement, DocumentReader, Rerender, StyleToggle, ViewMode};
use crate::io::OpenBuffer;
use crate::render::Preview;

pub struct HeadingHierarchyPlugin<R, S> {
    settings: Settings,
    reader: R,
    style: S,
    tracker: HierarchyTracker,
}

impl<R: DocumentReader, S: StyleToggle> HeadingHierarchyPlugin<R, S> {
    /// Loads settings, applies the root style and starts from a clean state.
    ///
    /// Unreadable settings fall back to the defaults rather than failing the load.
    pub fn load<C: SettingsStore + ?Sized>(store: &C, reader: R, mut style: S) -> Self {
        let settings = store.load_or_default().unwrap_or_else(|e| {
            log::warn!("Using default settings: {e}");
            Settings::default()
        });
        style.set_author_style(settings.enable_additional_css);

        Self {
            settings,
            reader,
            style,
            tracker: HierarchyTracker::new(),
        }
    }

    /// Drops all heading context and removes the root style.
    pub fn unload(&mut self) {
        self.tracker.sessions_mut().reset_all();
        self.style.set_author_style(false);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn style(&self) -> &S {
        &self.style
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn tracker(&self) -> &HierarchyTracker {
        &self.tracker
    }

    /// Persists the author-style toggle, then applies it.
    pub fn set_enable_additional_css<C: SettingsStore + ?Sized>(
        &mut self,
        store: &C,
        enabled: bool,
    ) -> anyhow::Result<()> {
        self.settings.enable_additional_css = enabled;
        store.save(&self.settings)?;
        self.style.set_author_style(enabled);
        Ok(())
    }

    /// Reacts to the workspace layout changing.
    ///
    /// When the active view shows a preview, its document's heading context
    /// is reset and a rerender is requested. Returns whether that happened.
    pub fn on_layout_change<H: Rerender + ?Sized>(
        &mut self,
        active: Option<ActiveView<'_>>,
        host: &mut H,
    ) -> bool {
        match active {
            Some(view) if view.mode == ViewMode::Preview => {
                self.tracker.sessions_mut().reset(view.path);
                host.rerender(view.path);
                true
            }
            _ => false,
        }
    }

    /// Per-block post-processor the host calls for every rendered block.
    pub fn post_process<B: BlockElement + ?Sized>(
        &mut self,
        block: &mut B,
        source_path: &RelativePath,
    ) -> BlockReport {
        self.tracker
            .process_block(block, source_path, &self.reader)
    }

    /// Renders `source` and post-processes every block of it.
    ///
    /// End-of-document checks for `source_path` count the lines of `source`
    /// itself, not of whatever the reader holds for that path.
    pub fn render_preview(&mut self, source_path: &RelativePath, source: &str) -> Preview {
        let reader = OpenBuffer::new(&self.reader, source_path, source);
        let tracker = &mut self.tracker;
        Preview::render(source_path, source, |block| {
            tracker.process_block(block, source_path, &reader)
        })
    }
}
