use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub remote: Option<RemoteServiceConfig>,
    pub pdf: Option<PdfConfig>,
    pub parsing: Option<ParsingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteServiceConfig {
    /// Full URL of the extraction endpoint, e.g. `http://pdf-service:8000/extract`.
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Set to `false` to always use the local pipeline for PDFs.
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfConfig {
    pub max_pages: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingSection {
    pub max_authors: Option<usize>,
    pub title_search_lines: Option<usize>,
    pub author_window: Option<usize>,
    pub extra_institution_terms: Option<Vec<String>>,
}

/// Platform config directory path: `<config_dir>/scholarmeta/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("scholarmeta").join("config.toml"))
}

/// Load config by cascading CWD `.scholarmeta.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".scholarmeta.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        remote: Some(RemoteServiceConfig {
            url: overlay
                .remote
                .as_ref()
                .and_then(|r| r.url.clone())
                .or_else(|| base.remote.as_ref().and_then(|r| r.url.clone())),
            timeout_secs: overlay
                .remote
                .as_ref()
                .and_then(|r| r.timeout_secs)
                .or_else(|| base.remote.as_ref().and_then(|r| r.timeout_secs)),
            enabled: overlay
                .remote
                .as_ref()
                .and_then(|r| r.enabled)
                .or_else(|| base.remote.as_ref().and_then(|r| r.enabled)),
        }),
        pdf: Some(PdfConfig {
            max_pages: overlay
                .pdf
                .as_ref()
                .and_then(|p| p.max_pages)
                .or_else(|| base.pdf.as_ref().and_then(|p| p.max_pages)),
        }),
        parsing: Some(ParsingSection {
            max_authors: overlay
                .parsing
                .as_ref()
                .and_then(|p| p.max_authors)
                .or_else(|| base.parsing.as_ref().and_then(|p| p.max_authors)),
            title_search_lines: overlay
                .parsing
                .as_ref()
                .and_then(|p| p.title_search_lines)
                .or_else(|| base.parsing.as_ref().and_then(|p| p.title_search_lines)),
            author_window: overlay
                .parsing
                .as_ref()
                .and_then(|p| p.author_window)
                .or_else(|| base.parsing.as_ref().and_then(|p| p.author_window)),
            extra_institution_terms: overlay
                .parsing
                .as_ref()
                .and_then(|p| p.extra_institution_terms.clone())
                .or_else(|| {
                    base.parsing
                        .as_ref()
                        .and_then(|p| p.extra_institution_terms.clone())
                }),
        }),
    }
}

impl ConfigFile {
    pub fn remote_url(&self) -> Option<&str> {
        self.remote.as_ref().and_then(|r| r.url.as_deref())
    }

    pub fn remote_timeout_secs(&self) -> Option<u64> {
        self.remote.as_ref().and_then(|r| r.timeout_secs)
    }

    /// Remote extraction is on unless explicitly disabled.
    pub fn remote_enabled(&self) -> bool {
        self.remote
            .as_ref()
            .and_then(|r| r.enabled)
            .unwrap_or(true)
    }

    pub fn max_pages(&self) -> Option<usize> {
        self.pdf.as_ref().and_then(|p| p.max_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_section_round_trip_toml() {
        let config = ConfigFile {
            remote: Some(RemoteServiceConfig {
                url: Some("http://localhost:8000/extract".to_string()),
                timeout_secs: Some(12),
                enabled: None,
            }),
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.remote_url(), Some("http://localhost:8000/extract"));
        assert_eq!(parsed.remote_timeout_secs(), Some(12));
        assert!(parsed.remote_enabled());
    }

    #[test]
    fn partial_config_parses() {
        let toml_str = "[pdf]\nmax_pages = 3\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.max_pages(), Some(3));
        assert!(parsed.remote.is_none());
        assert!(parsed.remote_url().is_none());
    }

    #[test]
    fn remote_can_be_disabled() {
        let parsed: ConfigFile = toml::from_str("[remote]\nenabled = false\n").unwrap();
        assert!(!parsed.remote_enabled());
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            pdf: Some(PdfConfig { max_pages: Some(5) }),
            remote: Some(RemoteServiceConfig {
                url: Some("http://base/extract".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            pdf: Some(PdfConfig { max_pages: Some(2) }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        assert_eq!(merged.max_pages(), Some(2));
        assert_eq!(merged.remote_url(), Some("http://base/extract"));
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            parsing: Some(ParsingSection {
                max_authors: Some(8),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.parsing.unwrap().max_authors, Some(8));
    }

    #[test]
    fn missing_file_is_none() {
        assert!(load_from_path(Path::new("/nonexistent/scholarmeta.toml")).is_none());
    }
}
