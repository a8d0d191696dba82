use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF text extraction backends.
///
/// Implementors provide the low-level text-layer step only; field heuristics
/// live in `scholarmeta_parsing::MetadataExtractor`. Academic metadata is
/// front-loaded, so backends are expected to read a bounded prefix of the
/// document and to skip unreadable pages rather than fail on them.
pub trait PdfBackend: Send + Sync {
    /// Extract the text of the leading pages of a PDF file.
    ///
    /// Returns `Ok("")` when the document has no usable text layer. An error
    /// means the document could not be opened at all.
    fn extract_text(&self, path: &Path) -> Result<String, BackendError>;
}
