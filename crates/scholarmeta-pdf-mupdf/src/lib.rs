use std::path::Path;

use mupdf::{Document, TextPageFlags};

use scholarmeta_core::{BackendError, PdfBackend};
use scholarmeta_parsing::text_processing::expand_ligatures;

/// Pages read by default. Title, byline, abstract, and imprint live on the
/// first few pages; the body is never needed.
pub const DEFAULT_MAX_PAGES: usize = 5;

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that non-PDF code paths do not transitively
/// depend on it.
///
/// Only the first `max_pages` pages are read. Pages that fail to load or
/// carry no text are skipped; the document only fails as a whole when it
/// cannot be opened.
pub struct MupdfBackend {
    max_pages: usize,
}

impl Default for MupdfBackend {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many leading pages to read. `0` is treated as `1`.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }
}

fn page_text(document: &Document, index: i32) -> Result<String, mupdf::Error> {
    let page = document.load_page(index)?;
    let text_page = page.to_text_page(TextPageFlags::empty())?;

    // Block/line iteration keeps one output line per layout line
    let mut text = String::new();
    for block in text_page.blocks() {
        for line in block.lines() {
            text.extend(line.chars().map(|c| c.char().unwrap_or('\u{FFFD}')));
            text.push('\n');
        }
    }
    Ok(text)
}

impl PdfBackend for MupdfBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let page_count = match document.page_count() {
            Ok(n) => usize::try_from(n).unwrap_or(0),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "could not count pages");
                0
            }
        };
        let to_read = page_count.min(self.max_pages);

        let mut text = String::new();
        let mut pages_read = 0usize;
        for index in 0..to_read {
            // to_read <= max_pages, which fits in i32 for any sane setting
            let Ok(page_index) = i32::try_from(index) else {
                break;
            };
            match page_text(&document, page_index) {
                Ok(page) if !page.trim().is_empty() => {
                    tracing::debug!(page = index + 1, chars = page.len(), "read page");
                    text.push_str(page.trim());
                    text.push('\n');
                    pages_read += 1;
                }
                Ok(_) => tracing::debug!(page = index + 1, "skipping page with no text"),
                Err(e) => tracing::debug!(page = index + 1, error = %e, "skipping unreadable page"),
            }
        }

        tracing::info!(
            path = %path.display(),
            page_count,
            pages_read,
            chars = text.len(),
            "extracted PDF text"
        );

        Ok(expand_ligatures(&text))
    }
}
