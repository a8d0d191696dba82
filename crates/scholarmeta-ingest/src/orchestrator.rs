use std::fs::File;
use std::path::Path;

use scholarmeta_core::{DEFAULT_LANGUAGE, ExtractedMetadata, FileKind, PdfBackend};
use scholarmeta_parsing::MetadataExtractor;

use crate::IngestError;
use crate::remote::{RemoteClient, RemoteError};
use crate::text;

/// Routes one document to the right extraction path.
///
/// PDFs go to the remote service first when one is configured; if that call
/// fails for any reason the local backend and heuristics run exactly once.
/// Plain text and HTML always use the local pipeline. Word-processor files
/// get a fixed low-confidence stub.
///
/// Holds no mutable state, so one instance can serve concurrent callers.
pub struct Orchestrator {
    extractor: MetadataExtractor,
    pdf_backend: Option<Box<dyn PdfBackend>>,
    remote: Option<RemoteClient>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    /// Local-only orchestrator with default heuristics and, when the `pdf`
    /// feature is on, the MuPDF backend.
    pub fn new() -> Self {
        Self {
            extractor: MetadataExtractor::new(),
            pdf_backend: default_pdf_backend(),
            remote: None,
        }
    }

    pub fn with_extractor(mut self, extractor: MetadataExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_pdf_backend(mut self, backend: Box<dyn PdfBackend>) -> Self {
        self.pdf_backend = Some(backend);
        self
    }

    pub fn with_remote(mut self, remote: RemoteClient) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn extractor(&self) -> &MetadataExtractor {
        &self.extractor
    }

    /// Extract metadata, inferring the file kind from the extension.
    pub fn extract(&self, path: &Path) -> Result<ExtractedMetadata, IngestError> {
        let kind = FileKind::from_path(path).map_err(|e| IngestError::UnsupportedType(e.0))?;
        self.extract_as(path, kind)
    }

    /// Extract metadata from `path`, treating it as `kind`.
    ///
    /// Errors only when the file cannot be read; weak or unparseable content
    /// produces a low-confidence record instead.
    pub fn extract_as(
        &self,
        path: &Path,
        kind: FileKind,
    ) -> Result<ExtractedMetadata, IngestError> {
        check_readable(path)?;

        match kind {
            FileKind::Pdf => self.extract_pdf(path),
            FileKind::Doc | FileKind::Docx => {
                tracing::info!(path = %path.display(), %kind, "word-processor files are not parsed");
                Ok(ExtractedMetadata::word_stub())
            }
            FileKind::Txt | FileKind::Html | FileKind::Htm => {
                let text = text::extract_text(path, kind)?;
                tracing::debug!(path = %path.display(), chars = text.len(), "read document text");
                Ok(self.extractor.extract_from_text(&text))
            }
        }
    }

    fn extract_pdf(&self, path: &Path) -> Result<ExtractedMetadata, IngestError> {
        if let Some(remote) = &self.remote {
            match self.try_remote(remote, path) {
                Ok(meta) => {
                    tracing::info!(path = %path.display(), "used remote extraction");
                    return Ok(meta);
                }
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "remote extraction unavailable, using local pipeline"
                ),
            }
        }
        self.extract_pdf_locally(path)
    }

    /// One remote attempt, with the record brought in line with local
    /// invariants.
    pub fn try_remote(
        &self,
        remote: &RemoteClient,
        path: &Path,
    ) -> Result<ExtractedMetadata, RemoteError> {
        let meta = remote.extract(path)?;
        Ok(sanitize_remote(meta, self.extractor.current_year()))
    }

    fn extract_pdf_locally(&self, path: &Path) -> Result<ExtractedMetadata, IngestError> {
        let Some(backend) = &self.pdf_backend else {
            return Err(IngestError::NoPdfSupport);
        };

        match backend.extract_text(path) {
            Ok(text) if !text.trim().is_empty() => {
                tracing::info!(path = %path.display(), chars = text.len(), "used local extraction");
                Ok(self.extractor.extract_from_text(&text))
            }
            Ok(_) => {
                tracing::info!(path = %path.display(), "PDF has no extractable text");
                Ok(ExtractedMetadata::unreadable_pdf())
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to open PDF");
                Ok(ExtractedMetadata::unreadable_pdf())
            }
        }
    }
}

/// Surface missing files and permission problems before any parsing.
fn check_readable(path: &Path) -> Result<(), IngestError> {
    let file = File::open(path)?;
    if file.metadata()?.is_dir() {
        return Err(IngestError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} is a directory", path.display()),
        )));
    }
    Ok(())
}

/// Remote records are trusted, except where they would break invariants
/// every record carries: a year outside `[1900, current_year]` becomes 0,
/// a missing language becomes the default, and confidence is clamped.
fn sanitize_remote(mut meta: ExtractedMetadata, current_year: i32) -> ExtractedMetadata {
    if meta.year != 0 && !(1900..=current_year).contains(&meta.year) {
        meta.year = 0;
    }
    if meta.language.trim().is_empty() {
        meta.language = DEFAULT_LANGUAGE.to_string();
    }
    meta.confidence = if meta.confidence.is_finite() {
        meta.confidence.clamp(0.0, 1.0)
    } else {
        0.0
    };
    meta
}

#[cfg(feature = "pdf")]
fn default_pdf_backend() -> Option<Box<dyn PdfBackend>> {
    Some(Box::new(scholarmeta_pdf_mupdf::MupdfBackend::default()))
}

#[cfg(not(feature = "pdf"))]
fn default_pdf_backend() -> Option<Box<dyn PdfBackend>> {
    None
}
