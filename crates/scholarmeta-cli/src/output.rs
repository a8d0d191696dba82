use std::io::Write;

use owo_colors::OwoColorize;
use scholarmeta_core::ExtractedMetadata;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the record as JSON, one object per call.
pub fn print_json(w: &mut dyn Write, meta: &ExtractedMetadata, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *w, meta)?;
    } else {
        serde_json::to_writer(&mut *w, meta)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print a human-readable summary of the record.
pub fn print_summary(
    w: &mut dyn Write,
    file_name: &str,
    meta: &ExtractedMetadata,
    color: ColorMode,
) -> std::io::Result<()> {
    let sep = "=".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", sep.bold().cyan())?;
        writeln!(w, "{} {}", "METADATA:".bold().cyan(), file_name.bold())?;
        writeln!(w, "{}", sep.bold().cyan())?;
    } else {
        writeln!(w, "{}", sep)?;
        writeln!(w, "METADATA: {}", file_name)?;
        writeln!(w, "{}", sep)?;
    }
    writeln!(w)?;

    let title = if meta.title.is_empty() {
        "(none)"
    } else {
        meta.title.as_str()
    };
    if color.enabled() {
        writeln!(w, "{}:", "Title".bold())?;
        writeln!(w, "  {}", title.cyan())?;
    } else {
        writeln!(w, "Title:")?;
        writeln!(w, "  {}", title)?;
    }
    writeln!(
        w,
        "  Authors:    {}",
        if meta.authors.is_empty() {
            "(none)".to_string()
        } else {
            meta.authors.join("; ")
        }
    )?;
    writeln!(w)?;

    let year = (meta.year != 0).then(|| meta.year.to_string());
    let keywords = (!meta.keywords.is_empty()).then(|| meta.keywords.join(", "));
    let fields = [
        ("Type", Some(meta.document_type.to_string())),
        ("Language", Some(meta.language.clone())),
        ("Year", year),
        ("Journal", non_empty(&meta.journal)),
        ("Publisher", non_empty(&meta.publisher)),
        ("Volume", non_empty(&meta.volume)),
        ("Issue", non_empty(&meta.issue)),
        ("Pages", non_empty(&meta.pages)),
        ("DOI", non_empty(&meta.doi)),
        ("ISBN", non_empty(&meta.isbn)),
        ("ISSN", non_empty(&meta.issn)),
        ("Keywords", keywords),
        ("Subject", non_empty(&meta.subject)),
        ("University", non_empty(&meta.university)),
        ("Department", non_empty(&meta.department)),
        ("Advisor", non_empty(&meta.advisor)),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            writeln!(w, "  {:<11} {}", format!("{label}:"), value)?;
        }
    }

    if !meta.abstract_text.is_empty() {
        writeln!(w)?;
        let abstract_display = truncate_chars(&meta.abstract_text, 300);
        if color.enabled() {
            writeln!(w, "{}:", "Abstract".bold())?;
            writeln!(w, "  {}", abstract_display.dimmed())?;
        } else {
            writeln!(w, "Abstract:")?;
            writeln!(w, "  {}", abstract_display)?;
        }
    }

    writeln!(w)?;
    let confidence = format!("{:.2}", meta.confidence);
    if color.enabled() {
        let colored = if meta.confidence >= 0.7 {
            confidence.green().to_string()
        } else if meta.confidence >= 0.4 {
            confidence.yellow().to_string()
        } else {
            confidence.red().to_string()
        };
        writeln!(w, "{} {}", "Confidence:".bold(), colored)?;
    } else {
        writeln!(w, "Confidence: {}", confidence)?;
    }
    Ok(())
}

/// Print the result of a health probe.
pub fn print_health(
    w: &mut dyn Write,
    url: &str,
    outcome: Result<bool, String>,
    color: ColorMode,
) -> std::io::Result<()> {
    let (status, detail) = match outcome {
        Ok(true) => ("HEALTHY", None),
        Ok(false) => ("UNHEALTHY", None),
        Err(e) => ("UNREACHABLE", Some(e)),
    };
    if color.enabled() {
        let status = if status == "HEALTHY" {
            status.green().to_string()
        } else {
            status.red().to_string()
        };
        writeln!(w, "{} {}", status, url.dimmed())?;
    } else {
        writeln!(w, "{} {}", status, url)?;
    }
    if let Some(detail) = detail {
        writeln!(w, "  {}", detail)?;
    }
    Ok(())
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholarmeta_core::DocumentType;

    fn render(meta: &ExtractedMetadata) -> String {
        let mut buf = Vec::new();
        print_summary(&mut buf, "paper.pdf", meta, ColorMode(false)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_summary_lists_populated_fields() {
        let meta = ExtractedMetadata {
            title: "Deep Rivers".into(),
            authors: vec!["Jane Doe".into(), "John Roe".into()],
            year: 2021,
            doi: "10.1234/abc".into(),
            document_type: DocumentType::Thesis,
            confidence: 0.55,
            ..Default::default()
        };
        let out = render(&meta);
        assert!(out.contains("METADATA: paper.pdf"));
        assert!(out.contains("  Deep Rivers"));
        assert!(out.contains("Jane Doe; John Roe"));
        assert!(out.contains("Year:       2021"));
        assert!(out.contains("DOI:        10.1234/abc"));
        assert!(out.contains("Type:       thesis"));
        assert!(out.contains("Confidence: 0.55"));
        assert!(!out.contains("ISBN:"));
    }

    #[test]
    fn test_summary_of_empty_record() {
        let out = render(&ExtractedMetadata::unreadable_pdf());
        assert!(out.contains("(none)"));
        assert!(!out.contains("Year:"));
        assert!(out.contains("Confidence: 0.10"));
    }

    #[test]
    fn test_json_uses_wire_names() {
        let mut buf = Vec::new();
        print_json(&mut buf, &ExtractedMetadata::default(), false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\"abstract\":\"\""));
        assert!(out.contains("\"document_type\":\"paper\""));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("ééé", 2), "éé...");
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn test_health_output() {
        let mut buf = Vec::new();
        print_health(
            &mut buf,
            "http://localhost:8000/health",
            Err("connection refused".into()),
            ColorMode(false),
        )
        .unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("UNREACHABLE http://localhost:8000/health"));
        assert!(out.contains("connection refused"));
    }
}
