use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod backend;
pub mod config_file;

pub use backend::{BackendError, PdfBackend};

/// Language reported when nothing better is known.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Confidence reported for a PDF that could not be opened or had no text layer.
pub const UNREADABLE_PDF_CONFIDENCE: f64 = 0.1;

/// Confidence reported for word-processor files, which are not parsed yet.
pub const WORD_STUB_CONFIDENCE: f64 = 0.3;

/// Coarse classification of a source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum DocumentType {
    #[default]
    Paper,
    Book,
    Thesis,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Paper => "paper",
            DocumentType::Book => "book",
            DocumentType::Thesis => "thesis",
        }
    }

    /// Map a free-form label onto one of the three types.
    ///
    /// Remote services report finer labels ("dissertation", "skripsi",
    /// "conference paper", "journal"); anything that is not recognisably a
    /// thesis or a book collapses to [`DocumentType::Paper`].
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        match label.as_str() {
            "thesis" | "tesis" | "dissertation" | "disertasi" | "skripsi" => DocumentType::Thesis,
            "book" | "buku" => DocumentType::Book,
            _ => DocumentType::Paper,
        }
    }
}

impl From<String> for DocumentType {
    fn from(label: String) -> Self {
        DocumentType::from_label(&label)
    }
}

impl FromStr for DocumentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DocumentType::from_label(s))
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured bibliographic metadata recovered from one document.
///
/// Every textual field defaults to the empty string and `year` to `0`, so the
/// record is total over any input. Field names serialize as snake_case; the
/// deserializer also accepts the camelCase spellings some services emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedMetadata {
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub keywords: Vec<String>,
    pub journal: String,
    pub publisher: String,
    pub year: i32,
    pub volume: String,
    pub issue: String,
    pub pages: String,
    #[serde(alias = "DOI")]
    pub doi: String,
    #[serde(alias = "ISBN")]
    pub isbn: String,
    #[serde(alias = "ISSN")]
    pub issn: String,
    pub language: String,
    pub subject: String,
    pub university: String,
    pub department: String,
    pub advisor: String,
    #[serde(alias = "documentType")]
    pub document_type: DocumentType,
    pub confidence: f64,
}

impl Default for ExtractedMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            authors: Vec::new(),
            abstract_text: String::new(),
            keywords: Vec::new(),
            journal: String::new(),
            publisher: String::new(),
            year: 0,
            volume: String::new(),
            issue: String::new(),
            pages: String::new(),
            doi: String::new(),
            isbn: String::new(),
            issn: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            subject: String::new(),
            university: String::new(),
            department: String::new(),
            advisor: String::new(),
            document_type: DocumentType::Paper,
            confidence: 0.0,
        }
    }
}

impl ExtractedMetadata {
    /// Record for a PDF that failed to open or yielded no text.
    pub fn unreadable_pdf() -> Self {
        Self {
            confidence: UNREADABLE_PDF_CONFIDENCE,
            ..Self::default()
        }
    }

    /// Record for doc/docx input, pending a real word-processor parser.
    pub fn word_stub() -> Self {
        Self {
            confidence: WORD_STUB_CONFIDENCE,
            ..Self::default()
        }
    }

    pub fn has_identifier(&self) -> bool {
        !self.doi.is_empty() || !self.isbn.is_empty() || !self.issn.is_empty()
    }

    pub fn has_venue(&self) -> bool {
        !self.journal.is_empty() || !self.publisher.is_empty()
    }

    pub fn has_provenance(&self) -> bool {
        !self.university.is_empty() || !self.department.is_empty()
    }
}

/// Returned when a file extension is outside the supported set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported file type: {0}")]
pub struct UnsupportedFileType(pub String);

/// Input formats accepted by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Doc,
    Docx,
    Txt,
    Html,
    Htm,
}

impl FileKind {
    pub const ALL: [FileKind; 6] = [
        FileKind::Pdf,
        FileKind::Doc,
        FileKind::Docx,
        FileKind::Txt,
        FileKind::Html,
        FileKind::Htm,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Doc => "doc",
            FileKind::Docx => "docx",
            FileKind::Txt => "txt",
            FileKind::Html => "html",
            FileKind::Htm => "htm",
        }
    }

    /// Infer the kind from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, UnsupportedFileType> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        ext.parse()
    }

    pub fn is_html(&self) -> bool {
        matches!(self, FileKind::Html | FileKind::Htm)
    }

    pub fn is_word(&self) -> bool {
        matches!(self, FileKind::Doc | FileKind::Docx)
    }
}

impl FromStr for FileKind {
    type Err = UnsupportedFileType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ext = s.trim().trim_start_matches('.').to_lowercase();
        FileKind::ALL
            .into_iter()
            .find(|k| k.extension() == ext)
            .ok_or(UnsupportedFileType(ext))
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
