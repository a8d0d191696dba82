use chrono::Datelike;

use scholarmeta_core::ExtractedMetadata;

use crate::config::ParsingConfig;
use crate::text_processing::normalize_line_endings;
use crate::{
    abstract_text, academic, authors, classify, confidence, identifiers, keywords, language,
    title, venue,
};

/// The text-to-metadata pipeline.
///
/// Holds a [`ParsingConfig`] and the calendar year used to bound detected
/// publication years. Every step is a pure function of the input text, so a
/// single extractor can be shared freely and produces identical records for
/// identical input.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    config: ParsingConfig,
    current_year: i32,
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataExtractor {
    /// Create an extractor with default configuration, bounded by this year.
    pub fn new() -> Self {
        Self::with_config(ParsingConfig::default())
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self {
            config,
            current_year: chrono::Local::now().year(),
        }
    }

    /// Pin the upper bound for accepted years.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Run every field extractor over `text` and score the result.
    ///
    /// Line endings are normalised once up front; authors are searched in the
    /// window after the detected title; confidence is computed last from the
    /// assembled record.
    pub fn extract_from_text(&self, text: &str) -> ExtractedMetadata {
        let text = normalize_line_endings(text);
        let lines: Vec<&str> = text.lines().collect();

        let author_anchor = authors::author_anchor_index(&lines, &self.config);

        let mut meta = ExtractedMetadata {
            title: title::extract_title_with_config(&lines, &self.config),
            authors: authors::extract_authors_with_config(&lines, author_anchor, &self.config),
            abstract_text: abstract_text::extract_abstract_with_config(&text, &self.config),
            keywords: keywords::extract_keywords(&text),
            journal: venue::extract_journal(&text),
            publisher: venue::extract_publisher(&text),
            year: identifiers::extract_year(&text, self.current_year),
            volume: venue::extract_volume(&text),
            issue: venue::extract_issue(&text),
            pages: venue::extract_pages(&text),
            doi: identifiers::extract_doi(&text),
            isbn: identifiers::extract_isbn(&text),
            issn: identifiers::extract_issn(&text),
            language: language::detect_language(&text).to_string(),
            subject: academic::extract_subject(&text),
            university: academic::extract_university(&text),
            department: academic::extract_department(&text),
            advisor: academic::extract_advisor(&text),
            document_type: classify::classify_document(&text),
            confidence: 0.0,
        };
        meta.confidence = confidence::score(&meta, &self.config.confidence_weights());

        tracing::debug!(
            lines = lines.len(),
            title_found = !meta.title.is_empty(),
            authors = meta.authors.len(),
            year = meta.year,
            document_type = %meta.document_type,
            confidence = meta.confidence,
            "extracted metadata from text"
        );

        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsingConfigBuilder;
    use scholarmeta_core::DocumentType;

    const SAMPLE: &str = "Machine Learning for Climate Prediction\nJohn Smith, Jane Doe\nUniversitas Dumai, Fakultas Ilmu Komputer\nAbstract: This paper studies...\nKeywords: machine learning, climate, prediction\n2023";

    #[test]
    fn test_sample_document() {
        let meta = MetadataExtractor::new()
            .with_current_year(2026)
            .extract_from_text(SAMPLE);
        assert_eq!(meta.title, "Machine Learning for Climate Prediction");
        assert_eq!(meta.authors, vec!["John Smith", "Jane Doe"]);
        assert_eq!(meta.university, "Universitas Dumai");
        assert_eq!(meta.department, "Fakultas Ilmu Komputer");
        assert_eq!(meta.year, 2023);
        assert_eq!(
            meta.keywords,
            vec!["machine learning", "climate", "prediction"]
        );
        assert_eq!(meta.document_type, DocumentType::Paper);
        assert!(meta.confidence > 0.5);
    }

    #[test]
    fn test_crlf_matches_lf() {
        let extractor = MetadataExtractor::new().with_current_year(2026);
        let crlf = SAMPLE.replace('\n', "\r\n");
        assert_eq!(
            extractor.extract_from_text(SAMPLE),
            extractor.extract_from_text(&crlf)
        );
    }

    #[test]
    fn test_empty_text() {
        let meta = MetadataExtractor::new().extract_from_text("");
        assert_eq!(meta, ExtractedMetadata::default());
    }

    #[test]
    fn test_year_bounded_by_current_year() {
        let text = "A Forward Looking Study\nPublished 2031";
        let meta = MetadataExtractor::new()
            .with_current_year(2026)
            .extract_from_text(text);
        assert_eq!(meta.year, 0);
        let meta = MetadataExtractor::new()
            .with_current_year(2031)
            .extract_from_text(text);
        assert_eq!(meta.year, 2031);
    }

    #[test]
    fn test_thesis_record() {
        let text = "Sistem Informasi Perpustakaan Berbasis Web\nA thesis submitted to Universitas Dumai\nAdvisor: Dr. Rina Putri\n2019";
        let meta = MetadataExtractor::new()
            .with_current_year(2026)
            .extract_from_text(text);
        assert_eq!(meta.document_type, DocumentType::Thesis);
        assert_eq!(meta.advisor, "Dr. Rina Putri");
        assert_eq!(meta.university, "Universitas Dumai");
        assert_eq!(meta.year, 2019);
    }

    #[test]
    fn test_title_below_search_window_not_an_author() {
        let page_numbers: Vec<String> = (1..=17).map(|n| n.to_string()).collect();
        let text = format!(
            "{}\nDeep Learning For River Flow Forecasting\nJane Doe, John Roe",
            page_numbers.join("\n")
        );
        let meta = MetadataExtractor::new()
            .with_current_year(2026)
            .extract_from_text(&text);
        assert_eq!(meta.title, "");
        assert_eq!(meta.authors, vec!["Jane Doe", "John Roe"]);
    }

    #[test]
    fn test_custom_config_is_used() {
        let config = ParsingConfigBuilder::new().max_authors(1).build().unwrap();
        let meta = MetadataExtractor::with_config(config)
            .with_current_year(2026)
            .extract_from_text(SAMPLE);
        assert_eq!(meta.authors, vec!["John Smith"]);
    }
}
