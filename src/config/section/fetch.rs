//! `[fetch]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [fetch]
//! url = "https://my-website.com/app.js"   # Downloaded when no URL is given
//! timeout = 30                            # Seconds (default: client default)
//! system_proxy = true                     # Honor HTTP(S)_PROXY
//! ```

use serde::Deserialize;

use crate::config::ConfigDiagnostics;

/// Fetch command settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// URL to download.
    pub url: String,

    /// Request timeout in seconds. `None` keeps the HTTP client's default.
    pub timeout: Option<u64>,

    /// Use proxy settings from the environment.
    pub system_proxy: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: "https://my-website.com/".to_string(),
            timeout: None,
            system_proxy: true,
        }
    }
}

impl FetchConfig {
    /// Validate fetch configuration.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Err(err) = crate::fetch::parse_url(&self.url) {
            diag.error_with_hint(
                "fetch.url",
                err.to_string(),
                "use an absolute http(s) URL, e.g. \"https://example.com/app.js\"",
            );
        }

        if self.timeout == Some(0) {
            diag.error("fetch.timeout", "must be at least 1 second");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_fetch_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.fetch, FetchConfig::default());
        assert!(config.fetch.system_proxy);
        assert_eq!(config.fetch.timeout, None);
    }

    #[test]
    fn test_fetch_config() {
        let config = test_parse_config(
            "[fetch]\nurl = \"http://localhost:8080/app.js\"\ntimeout = 5\nsystem_proxy = false",
        );
        assert_eq!(config.fetch.url, "http://localhost:8080/app.js");
        assert_eq!(config.fetch.timeout, Some(5));
        assert!(!config.fetch.system_proxy);
    }

    #[test]
    fn test_validate() {
        let mut diag = ConfigDiagnostics::new();
        FetchConfig::default().validate(&mut diag);
        assert!(diag.is_empty());

        let fetch = FetchConfig {
            url: "my-website.com".to_string(),
            timeout: Some(0),
            system_proxy: true,
        };
        let mut diag = ConfigDiagnostics::new();
        fetch.validate(&mut diag);
        let fields: Vec<_> = diag.errors().iter().map(|d| d.field).collect();
        assert_eq!(fields, ["fetch.url", "fetch.timeout"]);
    }
}
