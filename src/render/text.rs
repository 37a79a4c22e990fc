//! Plain text rendering for layout documents.

use crate::model::LayoutDocument;

/// Convert a document to plain text, one paragraph per line.
///
/// Text is written verbatim, including blank paragraphs.
pub fn to_text(doc: &LayoutDocument) -> String {
    let mut output = doc.plain_text();
    if !output.is_empty() {
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Orientation, PageSpec, ParagraphPlacement};

    #[test]
    fn test_to_text() {
        let doc = LayoutDocument::new(
            PageSpec::new(20200, 13397, Orientation::Landscape),
            vec![
                ParagraphPlacement::new("Hello, world!", 0, 0, 24.0),
                ParagraphPlacement::new("  indented  ", 400, 200, 24.0),
            ],
        );

        assert_eq!(to_text(&doc), "Hello, world!\n  indented  \n");
    }

    #[test]
    fn test_to_text_empty() {
        let doc = LayoutDocument::new(PageSpec::new(220, 1417, Orientation::Landscape), vec![]);
        assert_eq!(to_text(&doc), "");
    }
}
