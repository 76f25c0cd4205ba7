use std::fs;
use tempfile::TempDir;

/// Temporary notes folder holding `(relative path, content)` pairs.
///
/// Parent folders of nested paths are created as needed.
pub fn notes_dir_with(files: &[(&str, &str)]) -> TempDir {
    let notes_dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        let path = notes_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    notes_dir
}
