use regex::Regex;

use crate::confidence::ConfidenceWeights;

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Configuration for the metadata heuristics.
///
/// Use [`ParsingConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── title.rs ──
    /// Number of leading lines searched for a title (default: 16).
    pub(crate) title_search_lines: usize,
    /// Exclusive lower bound on title length in chars (default: 10).
    pub(crate) title_min_chars: usize,
    /// Exclusive upper bound on title length in chars (default: 200).
    pub(crate) title_max_chars: usize,
    /// Patterns marking a line as "not a title".
    pub(crate) non_title_patterns: ListOverride<Regex>,

    // ── authors.rs ──
    /// Number of lines after the title scanned for authors (default: 20).
    pub(crate) author_window: usize,
    /// Maximum number of authors to retain (default: 15).
    pub(crate) max_authors: usize,
    /// Institutional terms that disqualify an author line or name.
    pub(crate) institution_terms: ListOverride<String>,

    // ── abstract_text.rs ──
    /// Line index cap for the fallback abstract search (default: 50).
    pub(crate) abstract_search_lines: usize,

    // ── confidence.rs ──
    pub(crate) confidence_weights: Option<ConfidenceWeights>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            title_search_lines: 16,
            title_min_chars: 10,
            title_max_chars: 200,
            non_title_patterns: ListOverride::Default,
            author_window: 20,
            max_authors: 15,
            institution_terms: ListOverride::Default,
            abstract_search_lines: 50,
            confidence_weights: None,
        }
    }
}

impl ParsingConfig {
    /// Get the confidence weights, using defaults if not configured.
    pub fn confidence_weights(&self) -> ConfidenceWeights {
        self.confidence_weights.clone().unwrap_or_default()
    }

    pub fn max_authors(&self) -> usize {
        self.max_authors
    }

    pub fn author_window(&self) -> usize {
        self.author_window
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    title_search_lines: Option<usize>,
    title_min_chars: Option<usize>,
    title_max_chars: Option<usize>,
    non_title_patterns: ListOverrideBuilder,
    author_window: Option<usize>,
    max_authors: Option<usize>,
    institution_terms: ListOverridePlainBuilder,
    abstract_search_lines: Option<usize>,
    confidence_weights: Option<ConfidenceWeights>,
}

/// Helper for building `ListOverride<Regex>` from string patterns.
#[derive(Debug, Clone, Default)]
enum ListOverrideBuilder {
    #[default]
    Default,
    Replace(Vec<String>),
    Extend(Vec<String>),
}

/// Helper for building `ListOverride<String>`.
#[derive(Debug, Clone, Default)]
enum ListOverridePlainBuilder {
    #[default]
    Default,
    Replace(Vec<String>),
    Extend(Vec<String>),
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Title ──

    pub fn title_search_lines(mut self, n: usize) -> Self {
        self.title_search_lines = Some(n);
        self
    }

    pub fn title_length_bounds(mut self, min_chars: usize, max_chars: usize) -> Self {
        self.title_min_chars = Some(min_chars);
        self.title_max_chars = Some(max_chars);
        self
    }

    pub fn set_non_title_patterns(mut self, patterns: Vec<String>) -> Self {
        self.non_title_patterns = ListOverrideBuilder::Replace(patterns);
        self
    }

    pub fn add_non_title_pattern(mut self, pattern: String) -> Self {
        match &mut self.non_title_patterns {
            ListOverrideBuilder::Extend(v) => v.push(pattern),
            _ => self.non_title_patterns = ListOverrideBuilder::Extend(vec![pattern]),
        }
        self
    }

    // ── Authors ──

    pub fn author_window(mut self, n: usize) -> Self {
        self.author_window = Some(n);
        self
    }

    pub fn max_authors(mut self, n: usize) -> Self {
        self.max_authors = Some(n);
        self
    }

    pub fn set_institution_terms(mut self, terms: Vec<String>) -> Self {
        self.institution_terms = ListOverridePlainBuilder::Replace(terms);
        self
    }

    pub fn add_institution_term(mut self, term: String) -> Self {
        match &mut self.institution_terms {
            ListOverridePlainBuilder::Extend(v) => v.push(term),
            _ => self.institution_terms = ListOverridePlainBuilder::Extend(vec![term]),
        }
        self
    }

    // ── Abstract ──

    pub fn abstract_search_lines(mut self, n: usize) -> Self {
        self.abstract_search_lines = Some(n);
        self
    }

    // ── Confidence weights ──

    pub fn confidence_weights(mut self, weights: ConfidenceWeights) -> Self {
        self.confidence_weights = Some(weights);
        self
    }

    /// Compile all string patterns into regexes and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let compile_list =
            |builder: ListOverrideBuilder| -> Result<ListOverride<Regex>, regex::Error> {
                match builder {
                    ListOverrideBuilder::Default => Ok(ListOverride::Default),
                    ListOverrideBuilder::Replace(patterns) => {
                        let regexes: Result<Vec<_>, _> =
                            patterns.iter().map(|p| Regex::new(p)).collect();
                        Ok(ListOverride::Replace(regexes?))
                    }
                    ListOverrideBuilder::Extend(patterns) => {
                        let regexes: Result<Vec<_>, _> =
                            patterns.iter().map(|p| Regex::new(p)).collect();
                        Ok(ListOverride::Extend(regexes?))
                    }
                }
            };

        // Terms are matched against lower-cased text.
        let compile_plain = |builder: ListOverridePlainBuilder| -> ListOverride<String> {
            let lower = |v: Vec<String>| v.into_iter().map(|t| t.to_lowercase()).collect();
            match builder {
                ListOverridePlainBuilder::Default => ListOverride::Default,
                ListOverridePlainBuilder::Replace(v) => ListOverride::Replace(lower(v)),
                ListOverridePlainBuilder::Extend(v) => ListOverride::Extend(lower(v)),
            }
        };

        let defaults = ParsingConfig::default();
        Ok(ParsingConfig {
            title_search_lines: self.title_search_lines.unwrap_or(defaults.title_search_lines),
            title_min_chars: self.title_min_chars.unwrap_or(defaults.title_min_chars),
            title_max_chars: self.title_max_chars.unwrap_or(defaults.title_max_chars),
            non_title_patterns: compile_list(self.non_title_patterns)?,
            author_window: self.author_window.unwrap_or(defaults.author_window),
            max_authors: self.max_authors.unwrap_or(defaults.max_authors),
            institution_terms: compile_plain(self.institution_terms),
            abstract_search_lines: self
                .abstract_search_lines
                .unwrap_or(defaults.abstract_search_lines),
            confidence_weights: self.confidence_weights,
        })
    }
}
