//! Markdown emission: one paragraph per block, blocks separated by a blank line.

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::layout::Document;

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Serialize a document. An empty document yields an empty string.
pub fn to_markdown(document: &Document) -> String {
    document.paragraph_texts().join(PARAGRAPH_SEPARATOR)
}

/// Split emitted markdown back into its paragraph blocks.
///
/// Inverse of [`to_markdown`] as long as no paragraph itself contains a blank
/// line.
pub fn split_blocks(markdown: &str) -> Vec<String> {
    if markdown.is_empty() {
        return Vec::new();
    }
    markdown
        .split(PARAGRAPH_SEPARATOR)
        .map(str::to_string)
        .collect()
}

/// Write the document as a `.md` file.
pub fn write_markdown(path: &Path, document: &Document) -> Result<()> {
    let markdown = to_markdown(document);
    std::fs::write(path, &markdown)?;
    info!(
        "Wrote {} paragraphs ({} bytes) to {:?}",
        document.len(),
        markdown.len(),
        path
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Paragraph;

    fn doc(paragraphs: &[&[&str]]) -> Document {
        Document {
            paragraphs: paragraphs
                .iter()
                .map(|texts| Paragraph::new(texts.iter().map(|t| t.to_string()).collect()).unwrap())
                .collect(),
        }
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_markdown(&Document::default()), "");
        assert!(split_blocks("").is_empty());
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let document = doc(&[&["Hello", "World"], &["New"]]);
        assert_eq!(to_markdown(&document), "Hello World\n\nNew");
    }

    #[test]
    fn test_single_paragraph_has_no_separator() {
        assert_eq!(to_markdown(&doc(&[&["just", "one"]])), "just one");
    }

    #[test]
    fn test_split_blocks_recovers_paragraphs() {
        let document = doc(&[&["Title"], &["first", "line"], &["second block"]]);
        let markdown = to_markdown(&document);
        assert_eq!(split_blocks(&markdown), document.paragraph_texts());
    }

    #[test]
    fn test_blank_fragment_round_trips() {
        use crate::config::AnchorEdge;
        use crate::fragment::{Fragment, Region};
        use crate::layout::group_paragraphs;

        let quad = Region::from_box(0.0, 0.0, 20.0, 8.0).unwrap();
        let document = group_paragraphs(&[Fragment::new(quad, "", Some(0.4))], 10.0, AnchorEdge::Top);
        let markdown = to_markdown(&document);
        assert_eq!(markdown, "");
        assert_eq!(split_blocks(&markdown), document.paragraph_texts());
    }

    #[test]
    fn test_write_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recognized_text.md");
        write_markdown(&path, &doc(&[&["a"], &["b"]])).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\n\nb");
    }
}
