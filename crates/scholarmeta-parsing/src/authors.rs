use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::text_processing::{
    collapse_whitespace, dedup_preserving_order, len_between, normalize_line_endings,
};
use crate::title::is_non_title_line_with_config;

/// Substrings (lower-case) that mark a line as affiliation, contact, or
/// section material rather than a byline.
const NON_AUTHOR_KEYWORDS: &[&str] = &[
    // institutions
    "universitas",
    "university",
    "college",
    "institute",
    "institut",
    "politeknik",
    "polytechnic",
    "fakultas",
    "faculty",
    "school",
    "sekolah",
    "jurusan",
    "department",
    "departemen",
    "divisi",
    "laboratory",
    "laboratorium",
    "prodi",
    "program studi",
    "study program",
    // contact
    "corresponding author",
    "penulis korespondensi",
    "alamat",
    "address",
    "email",
    "e-mail",
    "phone",
    "telepon",
    "contact",
    // sections
    "abstract",
    "abstrak",
    "introduction",
    "pendahuluan",
    "keywords",
    "kata kunci",
    "references",
    "referensi",
    "daftar pustaka",
    "acknowledgment",
    "acknowledgement",
    "figure",
    "table",
    "chapter",
    "page",
    "halaman",
    // publication furniture
    "volume",
    "issue",
    "doi",
    "issn",
    "isbn",
    "published",
    "diterbitkan",
    "submitted",
    "received",
    "accepted",
    "revised",
    "journal",
    "jurnal",
    "proceedings",
    "prosiding",
    "conference",
    "seminar",
    "workshop",
    "copyright",
];

/// Terms (lower-case) that disqualify an individual name: institution words
/// plus study-programme names that often sit on the byline.
pub const DEFAULT_INSTITUTION_TERMS: &[&str] = &[
    "universitas",
    "university",
    "college",
    "institute",
    "institut",
    "politeknik",
    "polytechnic",
    "fakultas",
    "faculty",
    "school",
    "sekolah",
    "jurusan",
    "department",
    "departemen",
    "program studi",
    "study program",
    "prodi",
    "laboratory",
    "ilmu komputer",
    "computer science",
    "teknik informatika",
    "informatics",
    "sistem informasi",
    "information systems",
    "teknologi informasi",
    "information technology",
    "engineering",
];

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://|www\.").unwrap());

/// True if `line` carries affiliation, contact, section, or date material
/// that rules it out as an author line.
pub fn is_non_author_line(line: &str) -> bool {
    let lower = line.to_lowercase();

    if NON_AUTHOR_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return true;
    }
    if line.contains('@') || URL_RE.is_match(line) {
        return true;
    }

    // Phone-shaped: separators plus a long digit run
    let digits = line.chars().filter(|c| c.is_ascii_digit()).count();
    if (line.contains('+') || line.contains('-')) && digits >= 8 {
        return true;
    }

    // Dates like 2021-03-04 or 12/05/2019
    let has_year_prefix = ["200", "201", "202"].iter().any(|y| line.contains(y));
    if has_year_prefix && line.contains(['/', '-', '.']) {
        return true;
    }

    false
}

/// True if `line` looks like a byline: at least two tokens, and at least half
/// of them capitalised words.
pub fn is_likely_author_line(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return false;
    }
    let capitalised = tokens
        .iter()
        .filter(|t| t.chars().count() > 1 && t.starts_with(|c: char| c.is_ascii_uppercase()))
        .count();
    capitalised * 2 >= tokens.len()
}

/// Split a byline into raw name fragments on commas, parentheses, `and`, `&`.
pub fn split_author_line(line: &str) -> Vec<String> {
    static SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,()]|\band\b|&").unwrap());
    SPLIT_RE
        .split(line)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Strip footnote markers, embedded emails, and edge punctuation from a name.
pub fn clean_author_name(fragment: &str) -> String {
    static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+").unwrap());
    static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d*]+").unwrap());

    let name = EMAIL_RE.replace_all(fragment, "");
    let name = MARKER_RE.replace_all(&name, "");
    let name = collapse_whitespace(&name);
    name.trim_matches(|c: char| c.is_whitespace() || ".,;:!?".contains(c))
        .to_string()
}

/// True if a cleaned name is plausible as a person's name.
pub fn is_valid_author_name(name: &str) -> bool {
    is_valid_author_name_with_config(name, &ParsingConfig::default())
}

fn is_valid_author_name_with_config(name: &str, config: &ParsingConfig) -> bool {
    let len = name.chars().count();
    if !(3..=100).contains(&len) {
        return false;
    }
    if name.contains('@') || URL_RE.is_match(name) {
        return false;
    }

    let lower = name.to_lowercase();
    let defaults: Vec<String> = DEFAULT_INSTITUTION_TERMS
        .iter()
        .map(|s| s.to_string())
        .collect();
    if config
        .institution_terms
        .resolve(&defaults)
        .iter()
        .any(|term| lower.contains(term.as_str()))
    {
        return false;
    }

    if name.chars().filter(|c| c.is_ascii_alphabetic()).count() < 2 {
        return false;
    }

    // Shouted acronyms and headings
    if len > 5
        && name
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| c.is_uppercase())
    {
        return false;
    }

    true
}

/// Index of the line authors are searched after: the first line of title
/// length that is not a non-title line.
///
/// Unlike title detection this scans every line and ignores `Title:` labels.
pub fn author_anchor_index(lines: &[&str], config: &ParsingConfig) -> Option<usize> {
    lines.iter().position(|raw| {
        let line = raw.trim();
        len_between(line, config.title_min_chars, config.title_max_chars)
            && !is_non_title_line_with_config(line, config)
    })
}

/// Extract author names from the lines following the title at `title_idx`.
///
/// With no title, scanning starts at the first line.
pub fn extract_authors(lines: &[&str], title_idx: Option<usize>) -> Vec<String> {
    extract_authors_with_config(lines, title_idx, &ParsingConfig::default())
}

/// Config-aware version of [`extract_authors`].
pub fn extract_authors_with_config(
    lines: &[&str],
    title_idx: Option<usize>,
    config: &ParsingConfig,
) -> Vec<String> {
    let start = title_idx.map_or(0, |i| i + 1);
    let mut authors = Vec::new();

    for line in lines.iter().skip(start).take(config.author_window) {
        let line = line.trim();
        let len = line.chars().count();
        if !(3..=200).contains(&len) {
            continue;
        }
        if is_non_author_line(line) || !is_likely_author_line(line) {
            continue;
        }

        for fragment in split_author_line(line) {
            let name = clean_author_name(&fragment);
            if is_valid_author_name_with_config(&name, config) {
                authors.push(name);
            }
        }
    }

    let mut authors = dedup_preserving_order(authors);
    authors.truncate(config.max_authors);
    authors
}

/// Convenience entry point: locate the title line, then extract authors after it.
pub fn extract_authors_from_text(text: &str) -> Vec<String> {
    let config = ParsingConfig::default();
    let text = normalize_line_endings(text);
    let lines: Vec<&str> = text.lines().collect();
    let anchor = author_anchor_index(&lines, &config);
    extract_authors_with_config(&lines, anchor, &config)
}
