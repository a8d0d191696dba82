use std::path::Path;

use scraper::{Html, Node};

use scholarmeta_core::FileKind;

use crate::IngestError;

/// Read the text of a plain-text or HTML file.
///
/// Never fails for "no text": an empty or markup-only file yields an empty
/// string. Only I/O errors propagate. PDF and word-processor kinds are not
/// handled here and also yield an empty string.
pub fn extract_text(path: &Path, kind: FileKind) -> Result<String, IngestError> {
    match kind {
        FileKind::Txt => read_lossy(path),
        FileKind::Html | FileKind::Htm => Ok(html_to_text(&read_lossy(path)?)),
        FileKind::Pdf | FileKind::Doc | FileKind::Docx => Ok(String::new()),
    }
}

/// Read a file as UTF-8, replacing invalid sequences with U+FFFD.
pub fn read_lossy(path: &Path) -> Result<String, IngestError> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Flatten an HTML document to its text nodes in document order, each
/// followed by a single space. Script and style contents are text nodes too
/// and are kept.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();
    for node in document.tree.root().descendants() {
        if let Node::Text(t) = node.value() {
            text.push_str(t);
            text.push(' ');
        }
    }
    text
}
