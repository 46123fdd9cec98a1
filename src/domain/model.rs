use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Tuning knobs handed to the scraping library.
///
/// Every field is optional on its own. `None` means "let the library pick its
/// default" and is never serialized, so it cannot turn into `0` or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScraperConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    #[serde(rename = "minDelay", skip_serializing_if = "Option::is_none")]
    pub min_delay_ms: Option<u64>,
    #[serde(rename = "maxDelay", skip_serializing_if = "Option::is_none")]
    pub max_delay_ms: Option<u64>,
    #[serde(rename = "timeout", skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_minute: Option<u32>,
}

impl ScraperConfig {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeRequest {
    pub username: String,
    pub limit: u32,
    pub config: Option<ScraperConfig>,
}

/// What the library hands back from `get_posts`. Posts are opaque to the node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResult {
    pub fn with_posts(posts: Vec<serde_json::Value>) -> Self {
        Self {
            success: true,
            posts: Some(posts),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            posts: None,
            error: Some(error.into()),
        }
    }
}

/// One workflow record. Wraps a single post's JSON object unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeExecutionData {
    pub json: serde_json::Map<String, serde_json::Value>,
}

/// Machine-readable code carried by a [`ScrapeError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrapeCode {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for ScrapeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeCode::Numeric(code) => write!(f, "{}", code),
            ScrapeCode::Text(code) => f.write_str(code),
        }
    }
}

impl From<&str> for ScrapeCode {
    fn from(code: &str) -> Self {
        ScrapeCode::Text(code.to_string())
    }
}

impl From<String> for ScrapeCode {
    fn from(code: String) -> Self {
        ScrapeCode::Text(code)
    }
}

impl From<i64> for ScrapeCode {
    fn from(code: i64) -> Self {
        ScrapeCode::Numeric(code)
    }
}

/// The library's distinguished scrape failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ScrapeError {
    pub message: String,
    pub code: ScrapeCode,
}

impl ScrapeError {
    pub fn new(message: impl Into<String>, code: impl Into<ScrapeCode>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Everything the library can raise instead of returning a [`ScrapeResult`].
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),

    /// A failure value that is not an error at all.
    #[error("non-error failure value: {0}")]
    NonError(serde_json::Value),
}

impl LibraryError {
    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        LibraryError::Other(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_config_fields_are_not_serialized() {
        let config = ScraperConfig {
            max_retries: Some(0),
            timeout_ms: Some(2500),
            ..Default::default()
        };

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value, serde_json::json!({"maxRetries": 0, "timeout": 2500}));
        assert!(!config.is_empty());
        assert!(ScraperConfig::default().is_empty());
    }

    #[test]
    fn test_scrape_result_without_posts_field() {
        let result: ScrapeResult = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(result.success);
        assert!(result.posts.is_none());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_scrape_code_display() {
        assert_eq!(ScrapeCode::from("RATE_LIMITED").to_string(), "RATE_LIMITED");
        assert_eq!(ScrapeCode::from(429i64).to_string(), "429");
    }
}
