use relative_path::{RelativePath, RelativePathBuf};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::host::DocumentReader;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
    #[error("Document not loaded: {0}")]
    NotLoaded(RelativePathBuf),
}

/// Read a markdown file and return its content
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Scan for markdown files in the notes directory
pub fn scan_markdown_files(notes_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !notes_root.exists() {
        return Err(IoError::InvalidNotesDir(
            "notes directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// A notes folder on disk, addressed by vault-relative paths.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    pub fn open<P: Into<PathBuf>>(root: P) -> Result<Self, IoError> {
        let root = root.into();
        validate_notes_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every markdown file in the vault, sorted, relative to the root.
    pub fn markdown_files(&self) -> Result<Vec<RelativePathBuf>, IoError> {
        let files = scan_markdown_files(&self.root)?;
        Ok(files
            .iter()
            .filter_map(|path| path.strip_prefix(&self.root).ok())
            .filter_map(|path| RelativePathBuf::from_path(path).ok())
            .collect())
    }
}

impl DocumentReader for Vault {
    fn read(&self, path: &RelativePath) -> Result<String, IoError> {
        read_file(path, &self.root)
    }
}

/// Documents held in memory, for hosts that already have the source text.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocuments {
    documents: HashMap<RelativePathBuf, String>,
}

impl MemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str, text: &str) {
        self.documents
            .insert(RelativePathBuf::from(path), text.to_string());
    }
}

impl DocumentReader for MemoryDocuments {
    fn read(&self, path: &RelativePath) -> Result<String, IoError> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| IoError::NotLoaded(path.to_relative_path_buf()))
    }
}

/// Serves one document from the buffer being rendered and defers every other
/// path to the wrapped reader.
pub struct OpenBuffer<'a, R: ?Sized> {
    path: &'a RelativePath,
    source: &'a str,
    inner: &'a R,
}

impl<'a, R: DocumentReader + ?Sized> OpenBuffer<'a, R> {
    pub fn new(inner: &'a R, path: &'a RelativePath, source: &'a str) -> Self {
        Self {
            path,
            source,
            inner,
        }
    }
}

impl<R: DocumentReader + ?Sized> DocumentReader for OpenBuffer<'_, R> {
    fn read(&self, path: &RelativePath) -> Result<String, IoError> {
        if path == self.path {
            Ok(self.source.to_string())
        } else {
            self.inner.read(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::notes_dir_with;

    #[test]
    fn test_open_buffer_shadows_only_its_own_path() {
        let mut docs = MemoryDocuments::new();
        docs.insert("open.md", "saved text");
        docs.insert("other.md", "other text");

        let buffer = OpenBuffer::new(&docs, RelativePath::new("open.md"), "unsaved\ntext");

        assert_eq!(buffer.read(RelativePath::new("open.md")).unwrap(), "unsaved\ntext");
        assert_eq!(buffer.read(RelativePath::new("other.md")).unwrap(), "other text");
        assert!(matches!(
            buffer.read(RelativePath::new("missing.md")),
            Err(IoError::NotLoaded(_))
        ));
    }

    #[test]
    fn test_scan_finds_markdown_files() {
        // Given a notes directory with markdown files
        let notes_dir = notes_dir_with(&[("test1.md", "# First\n\nBody"), ("test2.md", "## Second")]);

        // When scanning for files
        let files = scan_markdown_files(notes_dir.path()).unwrap();

        // Then we find the expected files
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.file_name().unwrap() == "test1.md"));
        assert!(files.iter().any(|f| f.file_name().unwrap() == "test2.md"));
    }

    #[test]
    fn test_handle_invalid_notes_directory() {
        let nonexistent_path = PathBuf::from("/this/path/does/not/exist");

        let result = scan_markdown_files(&nonexistent_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("notes directory"));
    }

    #[test]
    fn test_ignore_non_markdown_files() {
        let notes_dir = notes_dir_with(&[("document.md", "# Markdown"), ("image.png", "fake image data")]);

        let files = scan_markdown_files(notes_dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "document.md");
    }

    #[test]
    fn test_read_file_not_found() {
        let notes_dir = notes_dir_with(&[]);
        let result = read_file(RelativePath::new("nonexistent.md"), notes_dir.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_vault_lists_nested_files_relative_to_root() {
        let notes_dir = notes_dir_with(&[("root.md", "# Root"), ("sub/nested.md", "# Nested")]);

        let vault = Vault::open(notes_dir.path()).unwrap();
        let files = vault.markdown_files().unwrap();

        assert_eq!(vault.root(), notes_dir.path());

        assert_eq!(
            files,
            vec![
                RelativePathBuf::from("root.md"),
                RelativePathBuf::from("sub/nested.md")
            ]
        );
    }

    #[test]
    fn test_vault_reads_documents() {
        let notes_dir = notes_dir_with(&[("note.md", "# Title\n\nParagraph")]);

        let vault = Vault::open(notes_dir.path()).unwrap();

        assert_eq!(
            vault.read(RelativePath::new("note.md")).unwrap(),
            "# Title\n\nParagraph"
        );
        assert!(matches!(
            vault.read(RelativePath::new("missing.md")),
            Err(IoError::NotFound(_))
        ));
    }

    #[test]
    fn test_vault_rejects_missing_directory() {
        let result = Vault::open("/nonexistent/path");
        assert!(matches!(result, Err(IoError::InvalidNotesDir(_))));
    }

    #[test]
    fn test_memory_documents() {
        let mut docs = MemoryDocuments::new();
        docs.insert("a.md", "text");

        assert_eq!(docs.read(RelativePath::new("a.md")).unwrap(), "text");
        assert!(matches!(
            docs.read(RelativePath::new("b.md")),
            Err(IoError::NotLoaded(_))
        ));
    }
}
