//! Configuration management for the calls history

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Calls list behaviour
    #[serde(default)]
    pub listing: ListingConfig,

    /// Web server configuration
    #[serde(default)]
    pub webserver: WebServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream GraphQL API configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiConfig {
    /// GraphQL endpoint the proxy forwards to
    #[serde(default = "default_graphql_url")]
    #[validate(url)]
    pub graphql_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    #[validate(range(min = 1, max = 300))]
    pub request_timeout: u64,

    /// Bearer token attached to upstream requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

/// Calls list configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListingConfig {
    /// Page size used when the view mounts
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 1000))]
    pub default_page_size: u32,

    /// Page sizes offered by the pagination control
    #[serde(default = "default_page_size_options")]
    #[validate(length(min = 1))]
    pub page_size_options: Vec<u32>,
}

/// Web server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WebServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the compiled front-end
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_graphql_url() -> String {
    "http://localhost:4000/graphql".to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

/// Page size the calls list starts with
pub const DEFAULT_PAGE_SIZE: u32 = 5;

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_page_size_options() -> Vec<u32> {
    vec![5, 10, 25, 50]
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            graphql_url: default_graphql_url(),
            request_timeout: default_request_timeout(),
            auth_token: None,
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            page_size_options: default_page_size_options(),
        }
    }
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from an optional `config` file and `CALLS_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed, or fails validation.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("CALLS")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("listing.page_size_options")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::Error::configuration(e.to_string()))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| crate::Error::configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Check every section for values the application cannot work with
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first offending section.
    pub fn validate(&self) -> crate::Result<()> {
        self.api
            .validate()
            .map_err(|e| crate::Error::configuration(format!("api: {e}")))?;
        self.webserver
            .validate()
            .map_err(|e| crate::Error::configuration(format!("webserver: {e}")))?;
        self.listing.ensure_valid()?;

        Ok(())
    }
}

impl ListingConfig {
    /// Check the listing section on its own
    ///
    /// The browser runs this on the section it receives from the server.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a zero or unlisted page size.
    pub fn ensure_valid(&self) -> crate::Result<()> {
        self.validate()
            .map_err(|e| crate::Error::configuration(format!("listing: {e}")))?;

        if self.page_size_options.contains(&0) {
            return Err(crate::Error::configuration(
                "listing: page_size_options must not contain 0",
            ));
        }
        if !self.page_size_options.contains(&self.default_page_size) {
            return Err(crate::Error::configuration(format!(
                "listing: default_page_size {} is not one of page_size_options",
                self.default_page_size
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.api.graphql_url, "http://localhost:4000/graphql");
        assert_eq!(config.api.request_timeout, 30);
        assert!(config.api.auth_token.is_none());

        assert_eq!(config.listing.default_page_size, 5);
        assert_eq!(config.listing.page_size_options, vec![5, 10, 25, 50]);

        assert_eq!(config.webserver.host, "127.0.0.1");
        assert_eq!(config.webserver.port, 8080);
        assert_eq!(config.webserver.static_dir, PathBuf::from("dist"));

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"listing": {"default_page_size": 10}}"#).unwrap();

        assert_eq!(config.listing.default_page_size, 10);
        assert_eq!(config.listing.page_size_options, vec![5, 10, 25, 50]);
        assert_eq!(config.webserver.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_page_size_must_be_offered() {
        let mut config = Config::default();
        config.listing.default_page_size = 7;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_page_size 7"));
    }

    #[test]
    fn test_listing_section_checked_on_its_own() {
        assert!(ListingConfig::default().ensure_valid().is_ok());

        let listing = ListingConfig {
            default_page_size: 25,
            page_size_options: vec![10, 20],
        };
        let err = listing.ensure_valid().unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: listing:"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = Config::default();
        config.listing.default_page_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.listing.page_size_options = vec![0, 5];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_page_size_options_rejected() {
        let mut config = Config::default();
        config.listing.page_size_options.clear();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("listing"));
    }

    #[test]
    fn test_invalid_graphql_url_rejected() {
        let mut config = Config::default();
        config.api.graphql_url = "not a url".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api"));
    }

    #[test]
    fn test_config_serialization_roundtrip_skips_missing_token() {
        let json = serde_json::to_value(Config::default()).unwrap();

        assert!(json["api"].get("auth_token").is_none());
        let back: Config = serde_json::from_value(json).unwrap();
        assert_eq!(back.listing.default_page_size, 5);
    }
}
