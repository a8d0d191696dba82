//! Heuristic metadata extraction from the flat text of academic documents.
//!
//! Each field has its own pure extractor (`title`, `authors`, `identifiers`,
//! ...) returning an empty value when nothing is found.
//! [`MetadataExtractor`] composes them into an [`ExtractedMetadata`] record
//! and scores it with [`confidence::score`].

pub mod abstract_text;
pub mod academic;
pub mod authors;
pub mod classify;
pub mod confidence;
pub mod config;
pub mod extractor;
pub mod identifiers;
pub mod keywords;
pub mod language;
pub mod text_processing;
pub mod title;
pub mod venue;

pub use confidence::{ConfidenceWeights, FieldPresence};
pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use extractor::MetadataExtractor;
// Re-export domain types from core (canonical definitions live there)
pub use scholarmeta_core::{DocumentType, ExtractedMetadata};

/// Extract metadata from already-extracted document text using defaults.
pub fn extract_from_text(text: &str) -> ExtractedMetadata {
    MetadataExtractor::new().extract_from_text(text)
}
