use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::text_processing::{collapse_whitespace, len_between};

const MIN_ABSTRACT_CHARS: usize = 20;
const MAX_ABSTRACT_CHARS: usize = 2000;
const MAX_FALLBACK_LINES: usize = 10;

/// Labels tried in order; each may introduce the abstract body.
static LABEL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["abstract", "summary", "introduction"]
        .iter()
        .map(|label| Regex::new(&format!(r"(?i)\b{label}\b\s*:?\s*")).unwrap())
        .collect()
});

/// End of the abstract paragraph: a blank line, or a new line starting with a
/// capital letter.
static PARAGRAPH_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n|\n\s*[A-Z]").unwrap());

/// Extract the abstract from normalised text.
///
/// First tries label-anchored capture (`Abstract:`, `Summary:`,
/// `Introduction:`), then falls back to collecting the lines after a line
/// that mentions "abstract" or "summary". Whitespace in the result is
/// collapsed; anything outside 21..2000 chars is rejected.
pub fn extract_abstract(text: &str) -> String {
    extract_abstract_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_abstract`].
pub fn extract_abstract_with_config(text: &str, config: &ParsingConfig) -> String {
    if let Some(found) = labeled_abstract(text) {
        return found;
    }
    let lines: Vec<&str> = text.lines().collect();
    fallback_abstract(&lines, config.abstract_search_lines).unwrap_or_default()
}

fn labeled_abstract(text: &str) -> Option<String> {
    for re in LABEL_PATTERNS.iter() {
        let Some(m) = re.find(text) else {
            continue;
        };
        let body = &text[m.end()..];
        let end = PARAGRAPH_END_RE
            .find(body)
            .map_or(body.len(), |end| end.start());
        let candidate = collapse_whitespace(&body[..end]);
        if len_between(&candidate, MIN_ABSTRACT_CHARS, MAX_ABSTRACT_CHARS) {
            return Some(candidate);
        }
    }
    None
}

fn fallback_abstract(lines: &[&str], max_index: usize) -> Option<String> {
    let marker = lines.iter().take(max_index + 1).position(|line| {
        let lower = line.to_lowercase();
        lower.contains("abstract") || lower.contains("summary")
    })?;

    let mut collected = Vec::new();
    for line in lines.iter().take(max_index + 1).skip(marker + 1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_lowercase();
        if ["introduction", "chapter", "section"]
            .iter()
            .any(|stop| lower.contains(stop))
        {
            break;
        }
        if line.chars().count() > 10 {
            collected.push(line);
            if collected.len() == MAX_FALLBACK_LINES {
                break;
            }
        }
    }

    let candidate = collapse_whitespace(&collected.join(" "));
    len_between(&candidate, MIN_ABSTRACT_CHARS, MAX_ABSTRACT_CHARS).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_same_line() {
        let text = "Title Here\nAbstract: This paper studies rainfall.\nKeywords: rain";
        assert_eq!(extract_abstract(text), "This paper studies rainfall.");
    }

    #[test]
    fn test_labeled_multiline_until_blank_line() {
        let text = "ABSTRACT\nwe propose a method\nfor sediment estimation in rivers\n\nmore text";
        assert_eq!(
            extract_abstract(text),
            "we propose a method for sediment estimation in rivers"
        );
    }

    #[test]
    fn test_stops_at_capitalised_line() {
        let text = "Abstract: the body of the abstract continues\nhere in lowercase\nIntroduction starts";
        assert_eq!(
            extract_abstract(text),
            "the body of the abstract continues here in lowercase"
        );
    }

    #[test]
    fn test_summary_label_when_abstract_too_short() {
        let text = "Abstract: short\n\nSummary: a longer summary of the findings";
        assert_eq!(extract_abstract(text), "a longer summary of the findings");
    }

    #[test]
    fn test_fallback_line_scan() {
        // Label capture yields only the short heading remainder
        let text = "Paper Title\nABSTRACT OF THE THESIS\nThis line describes the work in detail.\nIt continues with further explanation.\n1. Introduction\nBody";
        assert_eq!(
            extract_abstract(text),
            "This line describes the work in detail. It continues with further explanation."
        );
    }

    #[test]
    fn test_fallback_skips_blank_lines() {
        let sentences = [
            "Rivers carry sediment downstream.",
            "Floods reshape the channel bed.",
            "Gauges record the water level.",
            "Models predict the peak discharge.",
            "Errors grow with the lead time.",
            "Ensembles reduce the spread.",
            "Field data confirm the trend.",
            "Policy makers use the forecasts.",
        ];
        let text = format!("River Study\nABSTRACT OF THE THESIS\n\n{}", sentences.join("\n\n"));
        assert_eq!(extract_abstract(&text), sentences.join(" "));
    }

    #[test]
    fn test_fallback_stops_after_ten_lines() {
        let body: Vec<String> = (1..=14).map(|i| format!("Finding number {i} holds")).collect();
        let text = format!("SUMMARY OF WORK\n{}", body.join("\n"));
        assert_eq!(extract_abstract(&text), body[..10].join(" "));
    }

    #[test]
    fn test_too_long_rejected() {
        let text = format!("Abstract: {}", "word ".repeat(500));
        assert_eq!(extract_abstract(&text), "");
    }

    #[test]
    fn test_absent() {
        assert_eq!(extract_abstract("Nothing to see here\nat all"), "");
        assert_eq!(extract_abstract(""), "");
    }
}
