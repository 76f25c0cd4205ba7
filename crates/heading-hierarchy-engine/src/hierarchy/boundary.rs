use relative_path::RelativePath;

use crate::host::{DocumentReader, SectionInfo};

/// Result of the end-of-document check run after each block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryCheck {
    /// The block reaches the last line; the session was reset.
    Reset,
    /// More of the document follows.
    Continue,
    /// The host tracks no source lines for this block.
    NoSectionInfo,
    /// The document could not be read; the session was left as it was.
    ReadFailed,
}

/// True once a block ending at `section_line_end` (0-based) reaches the last line.
pub fn should_reset(section_line_end: usize, total_lines: usize) -> bool {
    section_line_end >= total_lines.saturating_sub(1)
}

/// Number of `\n`-separated lines; a trailing newline starts an empty last line.
pub fn total_lines(text: &str) -> usize {
    text.split('\n').count()
}

/// Reads the document and decides whether `section` ends it.
pub(crate) fn check<R: DocumentReader + ?Sized>(
    reader: &R,
    source_path: &RelativePath,
    section: Option<SectionInfo>,
) -> BoundaryCheck {
    let Some(section) = section else {
        return BoundaryCheck::NoSectionInfo;
    };

    match reader.read(source_path) {
        Ok(text) if should_reset(section.line_end, total_lines(&text)) => BoundaryCheck::Reset,
        Ok(_) => BoundaryCheck::Continue,
        Err(e) => {
            log::warn!("Skipping end-of-document check for {source_path}: {e}");
            BoundaryCheck::ReadFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryDocuments;
    use rstest::rstest;

    #[rstest]
    #[case(3, 4, true)]
    #[case(4, 4, true)]
    #[case(2, 4, false)]
    #[case(0, 1, true)]
    #[case(0, 0, true)]
    #[case(0, 2, false)]
    fn reset_at_last_line(#[case] line_end: usize, #[case] total: usize, #[case] expected: bool) {
        assert_eq!(should_reset(line_end, total), expected);
    }

    #[rstest]
    #[case("", 1)]
    #[case("one", 1)]
    #[case("one\ntwo", 2)]
    #[case("one\ntwo\n", 3)]
    #[case("\n\n", 3)]
    fn counts_newline_separated_lines(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(total_lines(text), expected);
    }

    #[test]
    fn missing_section_info_skips_the_read() {
        let docs = MemoryDocuments::new();
        let result = check(&docs, RelativePath::new("absent.md"), None);
        assert_eq!(result, BoundaryCheck::NoSectionInfo);
    }

    #[test]
    fn read_failure_is_reported_not_raised() {
        let docs = MemoryDocuments::new();
        let section = SectionInfo {
            line_start: 0,
            line_end: 0,
        };
        let result = check(&docs, RelativePath::new("absent.md"), Some(section));
        assert_eq!(result, BoundaryCheck::ReadFailed);
    }

    #[test]
    fn last_block_of_document_resets() {
        let mut docs = MemoryDocuments::new();
        docs.insert("note.md", "# A\ntext");

        let last = SectionInfo {
            line_start: 1,
            line_end: 1,
        };
        let first = SectionInfo {
            line_start: 0,
            line_end: 0,
        };

        assert_eq!(
            check(&docs, RelativePath::new("note.md"), Some(last)),
            BoundaryCheck::Reset
        );
        assert_eq!(
            check(&docs, RelativePath::new("note.md"), Some(first)),
            BoundaryCheck::Continue
        );
    }
}
