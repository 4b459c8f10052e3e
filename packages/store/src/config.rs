//! # Client configuration (`linkshelf.toml`)
//!
//! Defines the TOML configuration bundled with the web client (filename:
//! [`ClientConfig::filename`] = `"linkshelf.toml"`). It tells the client where
//! the REST API lives, under which key the session token is persisted, and which
//! public-feed ordering to show first.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000"
//!
//! [session]
//! storage_key = "token"
//!
//! [feed]
//! default_filter = "latest"   # latest | popular | trending
//! ```
//!
//! All structs derive `Default` so that a missing or empty config file is
//! equivalent to the default configuration.

use serde::{Deserialize, Serialize};

use crate::models::FeedFilter;

/// Top-level configuration stored in `linkshelf.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

/// REST API location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Session persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Durable storage key holding the raw token.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    "token".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

/// Public feed defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub default_filter: FeedFilter,
}

impl ClientConfig {
    /// Builder method to point the client at another API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "linkshelf.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.session.storage_key, "token");
        assert_eq!(config.feed.default_filter, FeedFilter::Latest);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "https://links.example/api"

            [feed]
            default_filter = "trending"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://links.example/api");
        assert_eq!(config.feed.default_filter, FeedFilter::Trending);
        assert_eq!(config.session.storage_key, "token");
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ClientConfig::default().with_base_url("https://api.example");
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        assert!(ClientConfig::from_toml("[feed]\ndefault_filter = \"oldest\"").is_err());
    }
}
