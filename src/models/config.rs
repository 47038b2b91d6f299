//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::WatchList;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and feed-polling behavior settings
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// Courts and the case numbers followed in each
    #[serde(default)]
    pub watchlist: WatchList,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.scraper.user_agent.trim().is_empty() {
            return Err(AppError::config("scraper.user_agent is empty"));
        }
        if self.scraper.timeout_secs == 0 {
            return Err(AppError::config("scraper.timeout_secs must be > 0"));
        }
        if !self.scraper.feed_url.contains("{court}") {
            return Err(AppError::config(
                "scraper.feed_url must contain a {court} placeholder",
            ));
        }
        // The template must resolve to a well-formed URL once a court
        // code is substituted in.
        url::Url::parse(&self.scraper.feed_url.replace("{court}", "ilnd"))?;
        if self.watchlist.is_empty() {
            return Err(AppError::config("No courts watched"));
        }
        Ok(())
    }
}

/// HTTP client and feed-polling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Per-court feed URL template; `{court}` is replaced with the
    /// court identifier
    #[serde(default = "defaults::feed_url")]
    pub feed_url: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            feed_url: defaults::feed_url(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "docketwatch/0.1 (PACER docket RSS watcher)".to_string()
    }

    pub fn timeout() -> u64 {
        30
    }

    pub fn feed_url() -> String {
        "https://ecf.{court}.uscourts.gov/cgi-bin/rss_outside.pl".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate_with_watchlist() {
        let mut config = Config::default();
        config.watchlist.follow("ilnd", "280638");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_watchlist_rejected() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_feed_url_needs_court_placeholder() {
        let mut config = Config::default();
        config.watchlist.follow("ilnd", "280638");
        config.scraper.feed_url = "https://ecf.ilnd.uscourts.gov/rss.pl".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [scraper]
            timeout_secs = 10

            [watchlist]
            ilnd = ["280638"]
            cacd = ["543744"]
        "#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.scraper.timeout_secs, 10);
        // unspecified fields take defaults
        assert!(config.scraper.feed_url.contains("{court}"));
        assert!(config.watchlist.is_followed("cacd", "543744"));
        assert!(config.validate().is_ok());
    }
}
