//! Runtime configuration: the provider endpoint and the dataset shown first.

use serde::Deserialize;

use crate::error::{Result, SheetNavError};

/// `<meta name="...">` tags read when no configuration object is given.
pub const META_BASE_URL: &str = "sheetnav-base-url";
pub const META_DEFAULT_DATASET: &str = "sheetnav-default-dataset";
pub const META_LOG_LEVEL: &str = "sheetnav-log-level";

/// Page configuration.
///
/// Accepts both camelCase keys and the legacy `baseURL` /
/// `defaultLeaderboard` spelling:
///
/// ```json
/// { "baseURL": "https://example.com/exec", "defaultLeaderboard": "overall" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetNavConfig {
    /// Provider endpoint; requests append `?sheets=<key>`.
    #[serde(alias = "baseURL")]
    pub base_url: String,
    /// Dataset loaded once navigation is built.
    #[serde(default, alias = "defaultLeaderboard")]
    pub default_dataset: Option<String>,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    #[serde(default)]
    pub log_level: Option<String>,
}

impl SheetNavConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_dataset: None,
            log_level: None,
        }
    }

    #[must_use]
    pub fn with_default_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.default_dataset = Some(dataset.into());
        self
    }

    /// Parse and validate JSON configuration text.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot issue any request.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(SheetNavError::Config("base URL is empty".to_string()));
        }
        if let Some(level) = &self.log_level {
            if level.parse::<log::LevelFilter>().is_err() {
                return Err(SheetNavError::Config(format!("unknown log level {level:?}")));
            }
        }
        Ok(())
    }

    /// Base URL with surrounding whitespace removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim()
    }

    /// Configured default dataset, ignoring blank values.
    pub fn default_dataset(&self) -> Option<&str> {
        self.default_dataset
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Configured log level, `Info` when unset.
    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|l| l.parse().ok())
            .unwrap_or(log::LevelFilter::Info)
    }
}
