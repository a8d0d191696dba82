use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Normalise `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Expand common typographic ligatures found in PDFs.
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}

/// Collapse every run of whitespace (including newlines) to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
    WS_RE.replace_all(text.trim(), " ").into_owned()
}

/// Remove exact duplicates, keeping the first occurrence of each value.
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// True when the char count of `s` lies strictly between `min` and `max`.
pub(crate) fn len_between(s: &str, min: usize, max: usize) -> bool {
    let n = s.chars().count();
    n > min && n < max
}

/// Return the first capture group of the first regex that yields a trimmed
/// value whose length lies strictly within `(min, max)` chars.
pub(crate) fn first_labeled_capture(
    text: &str,
    patterns: &[&Regex],
    min: usize,
    max: usize,
) -> Option<String> {
    for re in patterns {
        if let Some(caps) = re.captures(text) {
            let value = caps.get(1).map_or("", |m| m.as_str()).trim();
            if len_between(value, min, max) {
                return Some(value.to_string());
            }
        }
    }
    None
}
