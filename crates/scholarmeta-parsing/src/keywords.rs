use once_cell::sync::Lazy;
use regex::Regex;

use crate::text_processing::dedup_preserving_order;

/// `Keywords:`, `Key words -`, `Index Terms—`, `Kata kunci:` followed by the
/// list up to the end of the line or sentence. A separator is required so
/// prose that merely mentions keywords does not match.
static LABEL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"keywords?", r"key\s+words", r"index\s+terms", r"kata\s+kunci"]
        .iter()
        .map(|label| {
            Regex::new(&format!(
                r"(?i)\b{label}[ \t]*(?::|\u{{2014}}|\u{{2013}}|-)[ \t]*([^.\n]+)"
            ))
            .unwrap()
        })
        .collect()
});

/// Extract keywords from the labelled keyword lists in the text.
///
/// Each label contributes its first list only, and lists are taken in text
/// order. Lists are split on `,` and `;`; fragments of two chars or fewer are
/// dropped. Returns the union, first occurrence first.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut lists: Vec<_> = LABEL_PATTERNS
        .iter()
        .filter_map(|re| re.captures(text).and_then(|caps| caps.get(1)))
        .collect();
    lists.sort_by_key(|list| list.start());

    let keywords: Vec<String> = lists
        .iter()
        .flat_map(|list| list.as_str().split([',', ';']))
        .map(str::trim)
        .filter(|k| k.chars().count() > 2)
        .map(String::from)
        .collect();
    dedup_preserving_order(keywords)
}
