//! Runtime settings resolved from the config file and environment.

use std::time::Duration;

use scholarmeta_core::config_file::ConfigFile;
use scholarmeta_parsing::{MetadataExtractor, ParsingConfig, ParsingConfigBuilder};

use crate::orchestrator::Orchestrator;
use crate::remote::{DEFAULT_TIMEOUT, RemoteClient, RemoteConfig};

pub const SERVICE_URL_ENV: &str = "SCHOLARMETA_SERVICE_URL";
/// Older deployments name the service after its implementation.
pub const LEGACY_SERVICE_URL_ENV: &str = "PYTHON_SERVICE_URL";
pub const SERVICE_TIMEOUT_ENV: &str = "SCHOLARMETA_SERVICE_TIMEOUT";
pub const MAX_PAGES_ENV: &str = "SCHOLARMETA_MAX_PAGES";

const DEFAULT_MAX_PAGES: usize = 5;

/// Everything needed to build an [`Orchestrator`].
///
/// The remote service is only consulted when a URL has been given somewhere
/// and it has not been disabled.
#[derive(Debug, Clone)]
pub struct Settings {
    pub remote_url: Option<String>,
    pub remote_timeout: Duration,
    pub remote_enabled: bool,
    pub max_pages: usize,
    pub parsing: ParsingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            remote_url: None,
            remote_timeout: DEFAULT_TIMEOUT,
            remote_enabled: true,
            max_pages: DEFAULT_MAX_PAGES,
            parsing: ParsingConfig::default(),
        }
    }
}

impl Settings {
    /// Settings from a loaded config file, with defaults for anything unset.
    pub fn from_config(config: &ConfigFile) -> Self {
        let mut settings = Settings {
            remote_url: config.remote_url().map(String::from),
            remote_enabled: config.remote_enabled(),
            ..Default::default()
        };
        if let Some(secs) = config.remote_timeout_secs() {
            settings.remote_timeout = Duration::from_secs(secs);
        }
        if let Some(n) = config.max_pages() {
            settings.max_pages = n;
        }

        if let Some(section) = &config.parsing {
            let mut builder = ParsingConfigBuilder::new();
            if let Some(n) = section.max_authors {
                builder = builder.max_authors(n);
            }
            if let Some(n) = section.title_search_lines {
                builder = builder.title_search_lines(n);
            }
            if let Some(n) = section.author_window {
                builder = builder.author_window(n);
            }
            for term in section.extra_institution_terms.iter().flatten() {
                builder = builder.add_institution_term(term.clone());
            }
            match builder.build() {
                Ok(parsing) => settings.parsing = parsing,
                Err(e) => tracing::warn!(error = %e, "ignoring invalid [parsing] config"),
            }
        }

        settings
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; unparseable values are ignored.
    pub fn apply_env_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(SERVICE_URL_ENV).or_else(|| non_empty(LEGACY_SERVICE_URL_ENV)) {
            self.remote_url = Some(url.trim().to_string());
        }
        if let Some(secs) = non_empty(SERVICE_TIMEOUT_ENV).and_then(|v| v.trim().parse().ok()) {
            self.remote_timeout = Duration::from_secs(secs);
        }
        if let Some(n) = non_empty(MAX_PAGES_ENV).and_then(|v| v.trim().parse().ok()) {
            self.max_pages = n;
        }
        self
    }

    /// The remote endpoint to try first, if any.
    pub fn remote_config(&self) -> Option<RemoteConfig> {
        if !self.remote_enabled {
            return None;
        }
        self.remote_url
            .as_ref()
            .map(|url| RemoteConfig::new(url.clone()).with_timeout(self.remote_timeout))
    }

    /// Build an orchestrator. A remote client that cannot be constructed is
    /// logged and left out.
    pub fn orchestrator(&self) -> Orchestrator {
        let extractor = MetadataExtractor::with_config(self.parsing.clone());
        let mut orchestrator = Orchestrator::new().with_extractor(extractor);

        #[cfg(feature = "pdf")]
        {
            let backend = scholarmeta_pdf_mupdf::MupdfBackend::new().with_max_pages(self.max_pages);
            orchestrator = orchestrator.with_pdf_backend(Box::new(backend));
        }

        if let Some(remote) = self.remote_config() {
            match RemoteClient::new(remote) {
                Ok(client) => orchestrator = orchestrator.with_remote(client),
                Err(e) => tracing::warn!(error = %e, "remote client unavailable, using local pipeline only"),
            }
        }
        orchestrator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholarmeta_core::config_file::{ParsingSection, PdfConfig, RemoteServiceConfig};

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults_are_local_only() {
        let settings = Settings::default();
        assert!(settings.remote_config().is_none());
        assert_eq!(settings.max_pages, 5);
        assert_eq!(settings.remote_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_config() {
        let config = ConfigFile {
            remote: Some(RemoteServiceConfig {
                url: Some("http://localhost:8000/extract".into()),
                timeout_secs: Some(7),
                enabled: None,
            }),
            pdf: Some(PdfConfig { max_pages: Some(2) }),
            parsing: Some(ParsingSection {
                max_authors: Some(3),
                ..Default::default()
            }),
        };
        let settings = Settings::from_config(&config);
        let remote = settings.remote_config().unwrap();
        assert_eq!(remote.url, "http://localhost:8000/extract");
        assert_eq!(remote.timeout, Duration::from_secs(7));
        assert_eq!(settings.max_pages, 2);
        assert_eq!(settings.parsing.max_authors(), 3);
    }

    #[test]
    fn test_disabled_remote() {
        let config = ConfigFile {
            remote: Some(RemoteServiceConfig {
                url: Some("http://localhost:8000/extract".into()),
                timeout_secs: None,
                enabled: Some(false),
            }),
            ..Default::default()
        };
        assert!(Settings::from_config(&config).remote_config().is_none());
    }

    #[test]
    fn test_env_overrides_config() {
        let config = ConfigFile {
            remote: Some(RemoteServiceConfig {
                url: Some("http://from-config/extract".into()),
                timeout_secs: Some(7),
                enabled: None,
            }),
            ..Default::default()
        };
        let settings = Settings::from_config(&config).apply_env_with(env(&[
            ("SCHOLARMETA_SERVICE_URL", "http://from-env:9000/extract"),
            ("SCHOLARMETA_SERVICE_TIMEOUT", "12"),
            ("SCHOLARMETA_MAX_PAGES", "3"),
        ]));
        assert_eq!(
            settings.remote_url.as_deref(),
            Some("http://from-env:9000/extract")
        );
        assert_eq!(settings.remote_timeout, Duration::from_secs(12));
        assert_eq!(settings.max_pages, 3);
    }

    #[test]
    fn test_legacy_url_env() {
        let settings = Settings::default()
            .apply_env_with(env(&[("PYTHON_SERVICE_URL", "http://legacy:8000/extract")]));
        assert_eq!(
            settings.remote_url.as_deref(),
            Some("http://legacy:8000/extract")
        );

        let settings = Settings::default().apply_env_with(env(&[
            ("PYTHON_SERVICE_URL", "http://legacy:8000/extract"),
            ("SCHOLARMETA_SERVICE_URL", "http://new:8000/extract"),
        ]));
        assert_eq!(settings.remote_url.as_deref(), Some("http://new:8000/extract"));
    }

    #[test]
    fn test_bad_env_values_ignored() {
        let settings = Settings::default().apply_env_with(env(&[
            ("SCHOLARMETA_SERVICE_URL", "  "),
            ("SCHOLARMETA_SERVICE_TIMEOUT", "soon"),
            ("SCHOLARMETA_MAX_PAGES", "-1"),
        ]));
        assert!(settings.remote_url.is_none());
        assert_eq!(settings.remote_timeout, Duration::from_secs(30));
        assert_eq!(settings.max_pages, 5);
    }
}
