use heading_hierarchy_engine::{
    BlockOutcome, BoundaryCheck, HeadingLevel, HierarchyTracker, MemoryDocuments, RenderedBlock,
    SectionInfo, TraversalState,
};
use heading_hierarchy_engine::{HeadingHierarchyPlugin, RootClasses, Vault};
use heading_hierarchy_config::TomlSettingsStore;
use pretty_assertions::assert_eq;
use relative_path::RelativePath;

fn block(tag: &str, line: usize) -> RenderedBlock {
    RenderedBlock::new(
        Some(tag),
        "",
        Some(SectionInfo {
            line_start: line,
            line_end: line,
        }),
    )
}

fn level(n: u8) -> HeadingLevel {
    HeadingLevel::new(n).unwrap()
}

/// `[H1, Content, H2, Content]` on a four line document.
#[test]
fn heading_content_pairs_reset_at_end_of_document() {
    let mut docs = MemoryDocuments::new();
    docs.insert("a.md", "# A\ntext\n## B\ntext");
    let path = RelativePath::new("a.md");
    let mut tracker = HierarchyTracker::new();

    let mut blocks = vec![block("H1", 0), block("P", 1), block("H2", 2), block("P", 3)];
    let reports: Vec<_> = blocks
        .iter_mut()
        .map(|b| tracker.process_block(b, path, &docs))
        .collect();

    let counts: Vec<usize> = reports.iter().map(|r| r.wrappers.len()).collect();
    assert_eq!(counts, vec![0, 1, 1, 2]);

    assert!(reports[1].wrappers[0].is_top_of_section);
    // Content sits between the headings, so H2 is not a direct descent.
    assert!(!reports[2].wrappers[0].preceding_gap_level);
    assert!(reports[3].wrappers.iter().all(|w| w.is_top_of_section));

    assert_eq!(reports[3].boundary, BoundaryCheck::Reset);
    assert_eq!(tracker.sessions().state(path), TraversalState::default());
}

/// `[H1, H3]`: the deeper heading nests under both missing ancestors.
#[test]
fn skipped_level_heading_is_descending() {
    let mut docs = MemoryDocuments::new();
    docs.insert("b.md", "# A\n### C\nmore\n");
    let path = RelativePath::new("b.md");
    let mut tracker = HierarchyTracker::new();

    let mut h1 = block("H1", 0);
    let mut h3 = block("H3", 1);
    tracker.process_block(&mut h1, path, &docs);
    let report = tracker.process_block(&mut h3, path, &docs);

    assert_eq!(
        report.outcome,
        BlockOutcome::Heading {
            level: level(3),
            descending: true
        }
    );
    let targets: Vec<HeadingLevel> = report.wrappers.iter().map(|w| w.target_level).collect();
    assert_eq!(targets, vec![level(1), level(2)]);
    assert_eq!(h3.wrappers().len(), 2);
}

/// A corrupted stored level degrades to an unwrapped block.
#[test]
fn corrupted_level_does_not_panic() {
    let docs = MemoryDocuments::new();
    let path = RelativePath::new("c.md");
    let mut tracker = HierarchyTracker::new();
    tracker.sessions_mut().state_mut(path).active_heading_level = Some(7);

    let mut content = block("P", 0);
    let report = tracker.process_block(&mut content, path, &docs);

    assert_eq!(report.outcome, BlockOutcome::InvalidState { level: 7 });
    assert!(content.wrappers().is_empty());
    assert_eq!(report.boundary, BoundaryCheck::ReadFailed);
}

#[test]
fn rendered_preview_html() {
    let source = "# Title\n\nIntro text\n\n## Section\n\n---\n\nend";
    let settings_dir = tempfile::tempdir().unwrap();
    let store = TomlSettingsStore::new(settings_dir.path().join("settings.toml"));
    let mut docs = MemoryDocuments::new();
    docs.insert("note.md", source);
    let mut plugin = HeadingHierarchyPlugin::load(&store, docs, RootClasses::new());

    let preview = plugin.render_preview(RelativePath::new("note.md"), source);

    insta::assert_snapshot!(preview.to_html(), @r#"
    <div class="rgh-div-head rgh-h1-head"><h1>Title</h1></div>
    <div class="rgh-div rgh-h1"><p>Intro text</p><div class="rgh-line rgh-line-h1 rgh-top2"></div></div>
    <div class="rgh-div-head rgh-h2-head"><h2>Section</h2><div class="rgh-line rgh-line-h1 rgh-left10"></div></div>
    <div class="rgh-div rgh-h2"><hr /><div class="rgh-line rgh-line-h2 rgh-top2 rgh-top32"></div><div class="rgh-line rgh-line-h1 rgh-left10 rgh-top2 rgh-top32"></div></div>
    <div class="rgh-div rgh-h2"><p>end</p><div class="rgh-line rgh-line-h2"></div><div class="rgh-line rgh-line-h1 rgh-left10"></div></div>
    "#);
    assert_eq!(
        preview.reports().last().map(|r| r.boundary),
        Some(BoundaryCheck::Reset)
    );
}

#[test]
fn prologue_is_rendered_plain() {
    let source = "Intro before any heading\n\n# First";
    let mut docs = MemoryDocuments::new();
    docs.insert("p.md", source);
    let settings_dir = tempfile::tempdir().unwrap();
    let store = TomlSettingsStore::new(settings_dir.path().join("settings.toml"));
    let mut plugin = HeadingHierarchyPlugin::load(&store, docs, RootClasses::new());

    let preview = plugin.render_preview(RelativePath::new("p.md"), source);

    assert_eq!(
        preview.blocks()[0].to_html(),
        "<div><p>Intro before any heading</p></div>"
    );
    assert_eq!(preview.reports()[0].outcome, BlockOutcome::Prologue);
}

#[test]
fn vault_backed_preview_reads_the_file_for_boundaries() {
    let notes_dir = tempfile::tempdir().unwrap();
    let source = "# One\n\n> quoted\n\n    indented code\n";
    std::fs::write(notes_dir.path().join("v.md"), source).unwrap();
    let store = TomlSettingsStore::new(notes_dir.path().join("settings.toml"));
    let vault = Vault::open(notes_dir.path()).unwrap();
    let mut plugin = HeadingHierarchyPlugin::load(&store, vault, RootClasses::new());

    let preview = plugin.render_preview(RelativePath::new("v.md"), source);

    let boundaries: Vec<BoundaryCheck> = preview.reports().iter().map(|r| r.boundary).collect();
    assert_eq!(
        boundaries,
        vec![
            BoundaryCheck::Continue,
            BoundaryCheck::Continue,
            BoundaryCheck::Continue
        ]
    );
    assert!(preview.blocks()[1].wrappers()[0].has_class("rgh-top16"));
    assert!(preview.blocks()[2].wrappers()[0].has_class("rgh-top16"));
}
