use once_cell::sync::Lazy;
use regex::Regex;

use crate::text_processing::{first_labeled_capture, len_between};

const MIN_VENUE_CHARS: usize = 3;
const MAX_VENUE_CHARS: usize = 200;

/// Journal name from `Journal: ...`, `Published in ...`, or a masthead line
/// near the top that starts with "Journal"/"Jurnal"/"Proceedings".
pub fn extract_journal(text: &str) -> String {
    static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)\b(?:journal|jurnal|periodical)\s*:\s*([^.\n]+)").unwrap()
    });
    static PUBLISHED_IN_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)\bpublished in\s*:?\s*([^.\n]+)").unwrap());
    static MASTHEAD_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)^(?:journal|jurnal|proceedings|prosiding)\b").unwrap());

    if let Some(journal) = first_labeled_capture(
        text,
        &[&*LABEL_RE, &*PUBLISHED_IN_RE],
        MIN_VENUE_CHARS,
        MAX_VENUE_CHARS,
    ) {
        return journal;
    }

    text.lines()
        .take(20)
        .map(|line| line.trim().trim_matches(|c: char| " ,.-:".contains(c)))
        .find(|line| MASTHEAD_RE.is_match(line) && len_between(line, 6, 120))
        .map(String::from)
        .unwrap_or_default()
}

/// Publisher from `Publisher:`, `Penerbit:`, `Published by`, `Diterbitkan
/// oleh`, or a copyright line. The bare nouns need the colon.
pub fn extract_publisher(text: &str) -> String {
    static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?i)\b(?:(?:publisher|penerbit)\s*:|(?:published by|diterbitkan oleh)\s*:?)\s*([^.\n]+)",
        )
        .unwrap()
    });
    static COPYRIGHT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"©\s*([^.\n]+)").unwrap());

    first_labeled_capture(
        text,
        &[&*LABEL_RE, &*COPYRIGHT_RE],
        MIN_VENUE_CHARS,
        MAX_VENUE_CHARS,
    )
    .unwrap_or_default()
}

pub fn extract_volume(text: &str) -> String {
    static VOLUME_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)\bvol(?:ume)?\b\.?[\s:]*(\d+)\b").unwrap());
    first_number(&VOLUME_RE, text)
}

pub fn extract_issue(text: &str) -> String {
    static ISSUE_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)\b(?:no|number|issue|nomor)\b\.?[\s:]*(\d+)\b").unwrap()
    });
    first_number(&ISSUE_RE, text)
}

/// Page or page range as written, e.g. `12-34` or `12 – 34`.
pub fn extract_pages(text: &str) -> String {
    static PAGES_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)\b(?:pp|pages?|halaman|hal)\b\.?[\s:]*(\d+(?:\s*[-\u{2013}]\s*\d+)?)")
            .unwrap()
    });
    first_number(&PAGES_RE, text)
}

fn first_number(re: &Regex, text: &str) -> String {
    re.captures(text)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default()
}
