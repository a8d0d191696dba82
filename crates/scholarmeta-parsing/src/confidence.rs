//! Completeness-based confidence scoring.
//!
//! The score is a weighted checklist over groups of fields. Each group adds
//! its weight to the total, and to the numerator when satisfied, so the
//! result depends only on which fields are populated, never on their values.

use serde::{Deserialize, Serialize};

use scholarmeta_core::ExtractedMetadata;

/// Weight of each field group in the confidence score.
///
/// The defaults sum to 1.1; the score is normalised by the total so only
/// the ratios matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceWeights {
    pub title: f64,
    pub authors: f64,
    #[serde(rename = "abstract")]
    pub abstract_text: f64,
    pub year: f64,
    /// Any of DOI, ISBN, ISSN.
    pub identifiers: f64,
    /// Journal or publisher.
    pub venue: f64,
    pub keywords: f64,
    /// University or department.
    pub provenance: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            title: 0.20,
            authors: 0.15,
            abstract_text: 0.15,
            year: 0.10,
            identifiers: 0.10,
            venue: 0.10,
            keywords: 0.10,
            provenance: 0.10,
        }
    }
}

impl ConfidenceWeights {
    fn total(&self) -> f64 {
        self.title
            + self.authors
            + self.abstract_text
            + self.year
            + self.identifiers
            + self.venue
            + self.keywords
            + self.provenance
    }
}

/// Which field groups of a record are populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FieldPresence(u8);

impl FieldPresence {
    pub const TITLE: u8 = 1 << 0;
    pub const AUTHORS: u8 = 1 << 1;
    pub const ABSTRACT: u8 = 1 << 2;
    pub const YEAR: u8 = 1 << 3;
    pub const IDENTIFIERS: u8 = 1 << 4;
    pub const VENUE: u8 = 1 << 5;
    pub const KEYWORDS: u8 = 1 << 6;
    pub const PROVENANCE: u8 = 1 << 7;

    pub fn of(meta: &ExtractedMetadata) -> Self {
        let flags = [
            (!meta.title.is_empty(), Self::TITLE),
            (!meta.authors.is_empty(), Self::AUTHORS),
            (!meta.abstract_text.is_empty(), Self::ABSTRACT),
            (meta.year != 0, Self::YEAR),
            (meta.has_identifier(), Self::IDENTIFIERS),
            (meta.has_venue(), Self::VENUE),
            (!meta.keywords.is_empty(), Self::KEYWORDS),
            (meta.has_provenance(), Self::PROVENANCE),
        ];
        FieldPresence(
            flags
                .iter()
                .filter(|(present, _)| *present)
                .fold(0, |acc, (_, bit)| acc | bit),
        )
    }

    pub fn contains(&self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Number of satisfied groups.
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }
}

/// Score a record in `[0, 1]` from the populated-field set.
pub fn score(meta: &ExtractedMetadata, weights: &ConfidenceWeights) -> f64 {
    score_presence(FieldPresence::of(meta), weights)
}

/// Score a presence set directly.
pub fn score_presence(presence: FieldPresence, weights: &ConfidenceWeights) -> f64 {
    let total = weights.total();
    if total <= 0.0 {
        return 0.0;
    }

    let satisfied: f64 = [
        (FieldPresence::TITLE, weights.title),
        (FieldPresence::AUTHORS, weights.authors),
        (FieldPresence::ABSTRACT, weights.abstract_text),
        (FieldPresence::YEAR, weights.year),
        (FieldPresence::IDENTIFIERS, weights.identifiers),
        (FieldPresence::VENUE, weights.venue),
        (FieldPresence::KEYWORDS, weights.keywords),
        (FieldPresence::PROVENANCE, weights.provenance),
    ]
    .iter()
    .filter(|(bit, _)| presence.contains(*bit))
    .map(|(_, w)| w)
    .sum();

    (satisfied / total).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_record_scores_zero() {
        let meta = ExtractedMetadata::default();
        assert_eq!(FieldPresence::of(&meta).bits(), 0);
        assert!(approx(score(&meta, &ConfidenceWeights::default()), 0.0));
    }

    #[test]
    fn test_full_record_scores_one() {
        let meta = ExtractedMetadata {
            title: "T".into(),
            authors: vec!["A".into()],
            abstract_text: "x".into(),
            year: 2020,
            doi: "10.1/x".into(),
            journal: "J".into(),
            keywords: vec!["k".into()],
            department: "D".into(),
            ..Default::default()
        };
        assert_eq!(FieldPresence::of(&meta).count(), 8);
        assert!(approx(score(&meta, &ConfidenceWeights::default()), 1.0));
    }

    #[test]
    fn test_title_only_is_normalised() {
        let meta = ExtractedMetadata {
            title: "Some Title".into(),
            ..Default::default()
        };
        assert!(approx(score(&meta, &ConfidenceWeights::default()), 0.20 / 1.1));
    }

    #[test]
    fn test_depends_only_on_presence() {
        let a = ExtractedMetadata {
            title: "First".into(),
            isbn: "0-306-40615-2".into(),
            ..Default::default()
        };
        let b = ExtractedMetadata {
            title: "A completely different title".into(),
            issn: "1234-5678".into(),
            ..Default::default()
        };
        let w = ConfidenceWeights::default();
        assert_eq!(FieldPresence::of(&a), FieldPresence::of(&b));
        assert_eq!(score(&a, &w), score(&b, &w));
    }

    #[test]
    fn test_zero_weights() {
        let w = ConfidenceWeights {
            title: 0.0,
            authors: 0.0,
            abstract_text: 0.0,
            year: 0.0,
            identifiers: 0.0,
            venue: 0.0,
            keywords: 0.0,
            provenance: 0.0,
        };
        let meta = ExtractedMetadata {
            title: "T".into(),
            ..Default::default()
        };
        assert_eq!(score(&meta, &w), 0.0);
    }

    #[test]
    fn test_weights_from_toml() {
        let w: ConfidenceWeights = toml::from_str("title = 1.0\nabstract = 0.5").unwrap();
        assert!(approx(w.title, 1.0));
        assert!(approx(w.abstract_text, 0.5));
        assert!(approx(w.authors, 0.15));
    }
}
