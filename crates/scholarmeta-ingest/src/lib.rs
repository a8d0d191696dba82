use std::path::Path;

use thiserror::Error;

pub mod orchestrator;
pub mod remote;
pub mod settings;
pub mod text;

pub use orchestrator::Orchestrator;
pub use remote::{RemoteClient, RemoteConfig, RemoteError};
pub use settings::Settings;
// Re-export domain types for convenience
pub use scholarmeta_core::{DocumentType, ExtractedMetadata, FileKind};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported file type: {0:?}")]
    UnsupportedType(String),
    #[error("no PDF backend available (enable the `pdf` feature of scholarmeta-ingest)")]
    NoPdfSupport,
}

/// Extract metadata from a PDF, TXT, HTML/HTM, or DOC/DOCX file.
///
/// Settings come from the config file cascade and environment (see
/// [`Settings`]); PDFs go to the remote service first when one is
/// configured. Build an [`Orchestrator`] directly to reuse it across files.
pub fn extract_metadata(path: &Path) -> Result<ExtractedMetadata, IngestError> {
    let config = scholarmeta_core::config_file::load_config();
    Settings::from_config(&config)
        .apply_env()
        .orchestrator()
        .extract(path)
}
