use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::text_processing::len_between;

/// Built-in "not a title" patterns, applied to the trimmed line.
///
/// Section headers and page markers are matched case-insensitively; the two
/// letter-case patterns run on the line as written so that ALL-CAPS running
/// heads and all-lowercase fragments are rejected but Title Case is not.
static DEFAULT_NON_TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\s*$").unwrap(),
        Regex::new(r"^\d+$").unwrap(),
        Regex::new(r"(?i)^(?:abstract|introduction|conclusion|references|bibliography)").unwrap(),
        Regex::new(r"^[A-Z\s]+$").unwrap(),
        Regex::new(r"^[a-z\s]+$").unwrap(),
        Regex::new(r"(?i)^(?:page|p\.|pp\.)").unwrap(),
    ]
});

static TITLE_LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:Title|TITLE)\s*:\s*").unwrap());

/// True if `line` cannot be a document title: blank, a bare page number, a
/// section header, an ALL-CAPS or all-lowercase line, or a page marker.
pub fn is_non_title_line(line: &str) -> bool {
    is_non_title_line_with_config(line, &ParsingConfig::default())
}

/// Config-aware version of [`is_non_title_line`].
pub fn is_non_title_line_with_config(line: &str, config: &ParsingConfig) -> bool {
    let line = line.trim();
    config
        .non_title_patterns
        .resolve(&DEFAULT_NON_TITLE_PATTERNS)
        .iter()
        .any(|re| re.is_match(line))
}

/// Extract the document title from the leading lines of the text.
///
/// The first line (within the search window) that is not a non-title line
/// and whose length falls inside the configured bounds wins. A leading
/// `Title:` label is stripped. Returns an empty string when nothing
/// qualifies.
pub fn extract_title(lines: &[&str]) -> String {
    extract_title_with_config(lines, &ParsingConfig::default())
}

/// Config-aware version of [`extract_title`].
pub fn extract_title_with_config(lines: &[&str], config: &ParsingConfig) -> String {
    find_title(lines, config)
        .map(|(_, title)| title)
        .unwrap_or_default()
}

/// Index of the line [`extract_title`] would pick, if any.
pub fn find_title_index(lines: &[&str], config: &ParsingConfig) -> Option<usize> {
    find_title(lines, config).map(|(idx, _)| idx)
}

fn find_title(lines: &[&str], config: &ParsingConfig) -> Option<(usize, String)> {
    for (idx, raw) in lines.iter().enumerate().take(config.title_search_lines) {
        let line = raw.trim();
        if line.is_empty() || is_non_title_line_with_config(line, config) {
            continue;
        }
        if !len_between(line, config.title_min_chars, config.title_max_chars) {
            continue;
        }

        let title = TITLE_LABEL_RE.replace(line, "");
        let title = title.trim();
        // "Title: ABSTRACT" and the like
        if is_non_title_line_with_config(title, config) {
            continue;
        }
        return Some((idx, title.to_string()));
    }
    None
}
