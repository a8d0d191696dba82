use once_cell::sync::Lazy;
use regex::Regex;

/// Strip trailing punctuation and unbalanced trailing brackets from a DOI.
fn clean_doi(doi: &str) -> String {
    let mut doi = doi.trim_end_matches(['.', ',', ';', ':']);

    for (open, close) in [('(', ')'), ('[', ']')] {
        while doi.ends_with(close) && doi.matches(close).count() > doi.matches(open).count() {
            doi = &doi[..doi.len() - 1];
            doi = doi.trim_end_matches(['.', ',', ';', ':']);
        }
    }

    doi.to_string()
}

/// Extract a DOI.
///
/// Handles labelled forms (`DOI: 10.1234/x`, `Digital Object Identifier
/// 10.1234/x`) and, failing those, resolver URLs
/// (`https://doi.org/10.1234/x`, `http://dx.doi.org/10.1234/x`). DOIs with
/// balanced parentheses such as `10.1016/0021-9681(87)90171-8` survive
/// intact.
pub fn extract_doi(text: &str) -> String {
    static LABELED_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)(?:doi|digital object identifier)[:\s]*(10\.\d{4,}/[-._;()/:\w]+)")
            .unwrap()
    });
    static URL_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)https?://(?:dx\.)?doi\.org/(10\.\d{4,}/[^\s\]>},]+)").unwrap()
    });

    for re in [&*LABELED_RE, &*URL_RE] {
        if let Some(caps) = re.captures(text) {
            let doi = clean_doi(&caps[1]);
            if !doi.is_empty() {
                return doi;
            }
        }
    }
    String::new()
}

/// True if `candidate` has the length of an ISBN-10 or ISBN-13 once hyphens
/// and spaces are removed. No checksum is computed.
pub fn is_valid_isbn(candidate: &str) -> bool {
    let compact: String = candidate
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();
    let len = compact.chars().count();
    (len == 10 || len == 13)
        && compact
            .chars()
            .all(|c| c.is_ascii_digit() || c == 'X' || c == 'x')
}

/// Extract an ISBN, preserving hyphens as written.
///
/// A labelled ISBN (`ISBN:`, `ISBN-13:`) is preferred; otherwise every bare
/// 10-17 char run of digits, `X`, and hyphens is tried in order.
pub fn extract_isbn(text: &str) -> String {
    static LABELED_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)(?:isbn|international standard book number)(?:-?1[03])?[:\s]*([0-9X-]{10,17})")
            .unwrap()
    });
    static BARE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[0-9X-]{10,17}\b").unwrap());

    if let Some(isbn) = LABELED_RE
        .captures_iter(text)
        .map(|caps| caps[1].trim_matches('-').to_string())
        .find(|c| is_valid_isbn(c))
    {
        return isbn;
    }

    BARE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_matches('-'))
        .find(|c| is_valid_isbn(c))
        .map(String::from)
        .unwrap_or_default()
}

/// Extract a labelled ISSN (`ISSN: 1234-567X`).
pub fn extract_issn(text: &str) -> String {
    static ISSN_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)(?:issn|international standard serial number)[:\s]*(\d{4}-\d{3}[\dX])")
            .unwrap()
    });
    ISSN_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// Return the first standalone year in `[1900, current_year]`, or 0.
///
/// Years after `current_year` (and page numbers that happen to look like
/// years) are skipped, never clamped.
pub fn extract_year(text: &str, current_year: i32) -> i32 {
    static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").unwrap());
    YEAR_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .find(|y| (1900..=current_year).contains(y))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doi_labeled() {
        assert_eq!(extract_doi("DOI: 10.1234/jti.v5i2.101."), "10.1234/jti.v5i2.101");
        assert_eq!(
            extract_doi("Digital Object Identifier 10.1109/ACCESS.2020.12345"),
            "10.1109/ACCESS.2020.12345"
        );
    }

    #[test]
    fn test_doi_with_parentheses() {
        assert_eq!(
            extract_doi("doi:10.1016/0021-9681(87)90171-8"),
            "10.1016/0021-9681(87)90171-8"
        );
        assert_eq!(extract_doi("(see doi:10.1234/abc)"), "10.1234/abc");
    }

    #[test]
    fn test_doi_url() {
        assert_eq!(
            extract_doi("Available at https://doi.org/10.5555/12345678, accessed"),
            "10.5555/12345678"
        );
        assert_eq!(
            extract_doi("http://dx.doi.org/10.1000/xyz]"),
            "10.1000/xyz"
        );
    }

    #[test]
    fn test_doi_absent() {
        assert_eq!(extract_doi("no identifier 10.12/short"), "");
    }

    #[test]
    fn test_isbn_labeled_keeps_hyphens() {
        assert_eq!(extract_isbn("ISBN: 978-3-16-148410-0"), "978-3-16-148410-0");
        assert_eq!(extract_isbn("ISBN-13: 9783161484100"), "9783161484100");
        assert_eq!(extract_isbn("isbn 0-306-40615-2"), "0-306-40615-2");
    }

    #[test]
    fn test_isbn_no_checksum() {
        // Bad check digit is still accepted
        assert_eq!(extract_isbn("ISBN: 978-3-16-148410-9"), "978-3-16-148410-9");
    }

    #[test]
    fn test_isbn_bare_fallback() {
        assert_eq!(
            extract_isbn("Printed 2019, catalogue 602-1234-56-7 Jakarta"),
            "602-1234-56-7"
        );
    }

    #[test]
    fn test_isbn_invalid_length() {
        assert_eq!(extract_isbn("ISBN: 12345678901"), "");
        assert!(!is_valid_isbn("12345678901"));
        assert!(is_valid_isbn("0-306-40615-X"));
    }

    #[test]
    fn test_issn() {
        assert_eq!(extract_issn("ISSN: 2086-4981"), "2086-4981");
        assert_eq!(extract_issn("p-ISSN 1234-567X"), "1234-567X");
        assert_eq!(extract_issn("ISSN pending"), "");
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(extract_year("Published 2023", 2026), 2023);
        assert_eq!(extract_year("Due 2099, filed 2001", 2026), 2001);
        assert_eq!(extract_year("page 1899 then 1950", 2026), 1950);
        assert_eq!(extract_year("Forthcoming 2030", 2026), 0);
        assert_eq!(extract_year("12023 and 20234", 2026), 0);
    }
}
