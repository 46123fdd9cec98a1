use crate::core::description::{
    DEFAULT_MAX_DELAY_MS, DEFAULT_MAX_RETRIES, DEFAULT_MIN_DELAY_MS, DEFAULT_RATE_LIMIT_PER_MINUTE,
    DEFAULT_TIMEOUT_MS,
};
use crate::domain::model::ScraperConfig;
use std::time::Duration;

/// A [`ScraperConfig`] with every gap filled by the library default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperSettings {
    pub max_retries: u32,
    pub min_delay: Duration,
    pub max_delay: Duration,
    /// `Duration::ZERO` means requests never time out.
    pub timeout: Duration,
    /// `0` turns the per-minute cap off.
    pub rate_limit_per_minute: u32,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self::resolve(&ScraperConfig::default())
    }
}

impl ScraperSettings {
    pub fn resolve(config: &ScraperConfig) -> Self {
        let min_delay_ms = config.min_delay_ms.unwrap_or(DEFAULT_MIN_DELAY_MS);
        let mut max_delay_ms = config.max_delay_ms.unwrap_or(DEFAULT_MAX_DELAY_MS);

        if max_delay_ms < min_delay_ms {
            tracing::warn!(
                min_delay_ms,
                max_delay_ms,
                "maxDelay is below minDelay, using minDelay for both bounds"
            );
            max_delay_ms = min_delay_ms;
        }

        Self {
            max_retries: config.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            min_delay: Duration::from_millis(min_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
            timeout: Duration::from_millis(config.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)),
            rate_limit_per_minute: config
                .rate_limit_per_minute
                .unwrap_or(DEFAULT_RATE_LIMIT_PER_MINUTE),
        }
    }
}
