use super::posts::{Post, ProfileResponse};
use super::retry::{retry_with_backoff, FetchError};
use super::settings::ScraperSettings;
use super::throttle::RequestThrottle;
use crate::domain::model::{LibraryError, ScrapeError, ScrapeResult, ScraperConfig};
use crate::domain::ports::PostScraper;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

pub const DEFAULT_BASE_URL: &str = "https://www.instagram.com";

const PROFILE_PATH: &str = "/api/v1/users/web_profile_info/";
const WEB_APP_ID: &str = "936619743392459";
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Reads a public profile's recent posts from the web profile endpoint.
pub struct InstagramWebScraper {
    client: Client,
    profile_url: String,
    settings: ScraperSettings,
    throttle: RequestThrottle,
}

impl InstagramWebScraper {
    pub fn new(base_url: &str, config: &ScraperConfig) -> Result<Self, LibraryError> {
        let settings = ScraperSettings::resolve(config);
        let mut builder = Client::builder().user_agent(BROWSER_USER_AGENT);
        // a zero timeout means no client timeout at all
        if !settings.timeout.is_zero() {
            builder = builder.timeout(settings.timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ScrapeError::new(format!("Could not build HTTP client: {}", e), "CLIENT_INIT"))?;

        Ok(Self {
            client,
            profile_url: format!("{}{}", base_url.trim_end_matches('/'), PROFILE_PATH),
            throttle: RequestThrottle::new(
                settings.min_delay,
                settings.max_delay,
                settings.rate_limit_per_minute,
            ),
            settings,
        })
    }

    async fn fetch_profile(&self, username: &str) -> Result<ProfileResponse, FetchError> {
        self.throttle.acquire().await;
        tracing::debug!("Requesting profile '{}'", username);

        let response = self
            .client
            .get(&self.profile_url)
            .query(&[("username", username)])
            .header("x-ig-app-id", WEB_APP_ID)
            .header(reqwest::header::ACCEPT, "*/*")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
            }
            StatusCode::NOT_FOUND => Err(FetchError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => Err(FetchError::RateLimited),
            status => Err(FetchError::Status(status.as_u16())),
        }
    }
}

impl FetchError {
    fn into_library_error(self, username: &str) -> LibraryError {
        match self {
            FetchError::RateLimited => {
                ScrapeError::new("Rate limited by Instagram, retries exhausted", "RATE_LIMITED").into()
            }
            FetchError::NotFound => {
                ScrapeError::new(format!("User '{}' was not found", username), "USER_NOT_FOUND").into()
            }
            FetchError::Status(status) => {
                ScrapeError::new(format!("Unexpected HTTP status {}", status), format!("HTTP_{}", status))
                    .into()
            }
            FetchError::Timeout => ScrapeError::new("Request timed out", "TIMEOUT").into(),
            FetchError::Decode(reason) => {
                ScrapeError::new(format!("Invalid response: {}", reason), "INVALID_RESPONSE").into()
            }
            FetchError::Network(e) => {
                ScrapeError::new(format!("Network error: {}", e), "NETWORK_ERROR").into()
            }
        }
    }
}

#[async_trait]
impl PostScraper for InstagramWebScraper {
    async fn get_posts(&self, username: &str, limit: u32) -> Result<ScrapeResult, LibraryError> {
        let response = retry_with_backoff(self.settings.max_retries, self.settings.min_delay, || {
            self.fetch_profile(username)
        })
        .await
        .map_err(|e| e.into_library_error(username))?;

        let Some(user) = response.data.and_then(|data| data.user) else {
            return Ok(ScrapeResult::failed("User not found"));
        };

        let media = user.edge_owner_to_timeline_media.unwrap_or_default();
        if user.is_private && media.edges.is_empty() {
            return Ok(ScrapeResult::failed("Profile is private"));
        }

        let posts = media
            .edges
            .into_iter()
            .take(limit as usize)
            .map(|edge| serde_json::to_value(Post::from(edge.node)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(LibraryError::other)?;

        tracing::info!(
            "Scraped {} of {} posts from '{}'",
            posts.len(),
            media.count,
            username
        );
        Ok(ScrapeResult::with_posts(posts))
    }
}
