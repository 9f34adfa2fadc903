use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for fetching archive pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Site root every request path is joined to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the search page, which also carries the root menu
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// User-Agent header sent with each request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Buffered pages when streaming a game list
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl BrowserConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_path: default_search_path(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.zophar.net".to_string()
}

fn default_search_path() -> String {
    "/music/search".to_string()
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_channel_capacity() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = BrowserConfig::from_json("{}").unwrap();
        assert_eq!(config, BrowserConfig::default());
        assert_eq!(config.base_url, "https://www.zophar.net");
        assert_eq!(config.search_path, "/music/search");
    }

    #[test]
    fn test_partial_override() {
        let config =
            BrowserConfig::from_json(r#"{"base_url": "http://localhost:8080", "channel_capacity": 1}"#)
                .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.channel_capacity, 1);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_json() {
        assert!(BrowserConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(BrowserConfig::from_file("/nonexistent/zophar.json").is_err());
    }
}
