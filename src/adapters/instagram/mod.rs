//! Built-in scraping library: fetches a public profile's posts over HTTP with
//! request pacing, a per-minute cap and retries.

mod client;
mod posts;
mod retry;
mod settings;
mod throttle;

pub use client::{InstagramWebScraper, DEFAULT_BASE_URL};
pub use posts::Post;
pub use settings::ScraperSettings;

use crate::domain::model::{LibraryError, ScraperConfig};
use crate::domain::ports::{PostScraper, ScraperFactory};

#[derive(Debug, Clone)]
pub struct WebScraperFactory {
    base_url: String,
}

impl WebScraperFactory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for WebScraperFactory {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ScraperFactory for WebScraperFactory {
    fn create(&self, config: ScraperConfig) -> Result<Box<dyn PostScraper>, LibraryError> {
        let scraper = InstagramWebScraper::new(&self.base_url, &config)?;
        Ok(Box::new(scraper))
    }
}
