//! Academic provenance: university, department, advisor, and subject.
//!
//! Each field is tried as a `Label: value` capture first. University and
//! department then fall back to picking the comma-separated segment of an
//! affiliation line that names the institution, e.g. `Universitas Dumai` out
//! of `Universitas Dumai, Fakultas Ilmu Komputer`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::text_processing::{first_labeled_capture, len_between};

const MIN_FIELD_CHARS: usize = 3;
const MAX_FIELD_CHARS: usize = 200;

/// Affiliation lines are only looked for in the front matter.
const AFFILIATION_SEARCH_LINES: usize = 40;

const UNIVERSITY_TERMS: &[&str] = &[
    "universitas",
    "university",
    "institut",
    "institute",
    "politeknik",
    "polytechnic",
    "college",
];

const DEPARTMENT_TERMS: &[&str] = &[
    "fakultas",
    "faculty",
    "departemen",
    "department",
    "jurusan",
    "program studi",
    "prodi",
    "school of",
];

/// Abbreviations whose trailing period does not end an advisor's name.
static NAME_ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "dr", "prof", "ir", "mr", "mrs", "ms", "jr", "st", "kom", "si", "pd", "mt", "sc", "eng",
        "phd", "hum", "msc", "bsc",
    ]
    .into_iter()
    .collect()
});

pub fn extract_university(text: &str) -> String {
    static LABEL_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)\b(?:university|universitas)\s*:\s*([^.\n]+)").unwrap());
    static SUBMITTED_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)\bsubmitted to\s*:?\s*([^.\n]+)").unwrap());

    first_labeled_capture(
        text,
        &[&*LABEL_RE, &*SUBMITTED_RE],
        MIN_FIELD_CHARS,
        MAX_FIELD_CHARS,
    )
    .or_else(|| affiliation_segment(text, UNIVERSITY_TERMS))
    .unwrap_or_default()
}

pub fn extract_department(text: &str) -> String {
    static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?i)\b(?:department|departemen|faculty|fakultas|jurusan|program studi|prodi)\s*:\s*([^.\n]+)",
        )
        .unwrap()
    });

    first_labeled_capture(text, &[&*LABEL_RE], MIN_FIELD_CHARS, MAX_FIELD_CHARS)
        .or_else(|| affiliation_segment(text, DEPARTMENT_TERMS))
        .unwrap_or_default()
}

/// Advisor named after `Advisor:`, `Supervisor:`, `Pembimbing I:`,
/// "dibimbing oleh", or "under the supervision of". Titles such as `Dr.`
/// and degree suffixes such as `S.Kom.` are kept with the name.
pub fn extract_advisor(text: &str) -> String {
    static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?i)\b(?:(?:advisor|supervisor|pembimbing)(?:\s+(?-i:I{1,3}|IV|[1-3])\b)?\s*:|dibimbing oleh)[ \t]*([^\n]+)",
        )
        .unwrap()
    });
    static SUPERVISION_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)\bunder the supervision of\s*:?[ \t]*([^\n]+)").unwrap());

    for re in [&*LABEL_RE, &*SUPERVISION_RE] {
        let Some(caps) = re.captures(text) else {
            continue;
        };
        let name = cut_at_sentence_end(&caps[1]);
        let name = name.trim().trim_end_matches([',', ';', ':']).trim();
        if len_between(name, MIN_FIELD_CHARS, MAX_FIELD_CHARS) {
            return name.to_string();
        }
    }
    String::new()
}

/// Subject or field of study from `Subject:`, `Bidang:`, `Field of study:`.
pub fn extract_subject(text: &str) -> String {
    static SUBJECT_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\b(?i:subject|bidang|field of study)\s*:\s*([A-Z][A-Za-z &.'-]{3,100})")
            .unwrap()
    });

    SUBJECT_RE
        .captures(text)
        .map(|caps| caps[1].trim().trim_end_matches('.').trim().to_string())
        .filter(|s| len_between(s, MIN_FIELD_CHARS, MAX_FIELD_CHARS))
        .unwrap_or_default()
}

/// The comma/semicolon segment of the first front-matter line that contains
/// one of `terms`.
fn affiliation_segment(text: &str, terms: &[&str]) -> Option<String> {
    let line = text.lines().take(AFFILIATION_SEARCH_LINES).find(|line| {
        let lower = line.to_lowercase();
        terms.iter().any(|t| lower.contains(t))
    })?;

    line.split([',', ';'])
        .find(|segment| {
            let lower = segment.to_lowercase();
            terms.iter().any(|t| lower.contains(t))
        })
        .map(|segment| segment.trim_matches(|c: char| c.is_whitespace() || ",.-:".contains(c)))
        .filter(|segment| len_between(segment, MIN_FIELD_CHARS, MAX_FIELD_CHARS))
        .map(String::from)
}

/// Truncate at the first period that ends a sentence rather than an initial
/// or a title/degree abbreviation.
fn cut_at_sentence_end(text: &str) -> &str {
    for (pos, _) in text.match_indices('.') {
        let after = &text[pos + 1..];
        if !(after.is_empty() || after.starts_with(char::is_whitespace)) {
            continue;
        }

        let word_start = text[..pos]
            .char_indices()
            .rev()
            .find(|(_, c)| !c.is_alphabetic())
            .map_or(0, |(i, c)| i + c.len_utf8());
        let word = &text[word_start..pos];

        if word.chars().count() <= 1 || NAME_ABBREVIATIONS.contains(word.to_lowercase().as_str()) {
            continue;
        }
        return &text[..pos];
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_university_from_affiliation_line() {
        let text = "Some Title Here\nJohn Smith\nUniversitas Dumai, Fakultas Ilmu Komputer\n";
        assert_eq!(extract_university(text), "Universitas Dumai");
        assert_eq!(extract_department(text), "Fakultas Ilmu Komputer");
    }

    #[test]
    fn test_university_label() {
        assert_eq!(
            extract_university("University: Gadjah Mada\nFaculty: Engineering"),
            "Gadjah Mada"
        );
        assert_eq!(extract_department("University: Gadjah Mada\nFaculty: Engineering"), "Engineering");
    }

    #[test]
    fn test_submitted_to() {
        assert_eq!(
            extract_university("A thesis submitted to the Graduate School of Example Tech"),
            "the Graduate School of Example Tech"
        );
    }

    #[test]
    fn test_school_of_department() {
        let text = "School of Computing, National University of Singapore";
        assert_eq!(extract_department(text), "School of Computing");
        assert_eq!(extract_university(text), "National University of Singapore");
    }

    #[test]
    fn test_absent_provenance() {
        let text = "A Paper Title\nJane Doe\nAbstract: nothing about affiliations here";
        assert_eq!(extract_university(text), "");
        assert_eq!(extract_department(text), "");
    }

    #[test]
    fn test_advisor_keeps_titles() {
        assert_eq!(
            extract_advisor("Advisor: Prof. Jane Doe. Submitted 2020"),
            "Prof. Jane Doe"
        );
        assert_eq!(
            extract_advisor("Pembimbing I: Dr. Budi Santoso, S.Kom., M.T.\nPembimbing II: Siti"),
            "Dr. Budi Santoso, S.Kom., M.T."
        );
    }

    #[test]
    fn test_advisor_supervision_phrase() {
        assert_eq!(
            extract_advisor("written under the supervision of Alan K. Turing"),
            "Alan K. Turing"
        );
        assert_eq!(extract_advisor("no advisor mentioned"), "");
    }

    #[test]
    fn test_subject() {
        assert_eq!(extract_subject("Subject: Computer Science"), "Computer Science");
        assert_eq!(extract_subject("Bidang: Teknik Sipil."), "Teknik Sipil");
        assert_eq!(extract_subject("the subject of this study"), "");
    }

    #[test]
    fn test_cut_at_sentence_end() {
        assert_eq!(cut_at_sentence_end("J. R. Smith. Then more"), "J. R. Smith");
        assert_eq!(cut_at_sentence_end("v1.2 build"), "v1.2 build");
    }
}
