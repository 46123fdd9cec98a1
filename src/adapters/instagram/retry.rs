use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single profile request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("rate limited by Instagram")]
    RateLimited,

    #[error("profile not found")]
    NotFound,

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Network(err)
        }
    }
}

fn is_retriable(err: &FetchError) -> bool {
    match err {
        FetchError::RateLimited | FetchError::Timeout | FetchError::Network(_) => true,
        FetchError::Status(status) => *status >= 500,
        FetchError::NotFound | FetchError::Decode(_) => false,
    }
}

/// Runs `operation`, retrying transient failures up to `max_retries` times.
///
/// The wait before retry `n` (1-based) is `base_delay * 2^(n-1)`.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    base_delay: Duration,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay = base_delay.saturating_mul(1u32 << attempt.min(16));
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "transient scrape error, retrying after backoff"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn retries_rate_limit_then_succeeds() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, Duration::ZERO, || {
            let cc = Arc::clone(&cc);
            async move {
                if cc.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(FetchError::RateLimited)
                } else {
                    Ok::<u32, FetchError>(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(2, Duration::ZERO, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FetchError>(FetchError::Status(503))
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(FetchError::Status(503))));
    }

    #[tokio::test]
    async fn zero_retries_means_one_attempt() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(0, Duration::ZERO, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FetchError>(FetchError::Timeout)
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(FetchError::Timeout)));
    }

    #[tokio::test]
    async fn does_not_retry_not_found_or_client_errors() {
        for err in [FetchError::NotFound, FetchError::Status(403), FetchError::Decode("x".into())] {
            let call_count = Arc::new(AtomicU32::new(0));
            let cc = Arc::clone(&call_count);
            let mut pending = Some(err);
            let result = retry_with_backoff(3, Duration::ZERO, || {
                cc.fetch_add(1, Ordering::SeqCst);
                let err = pending.take();
                async move { Err::<u32, FetchError>(err.unwrap_or(FetchError::Timeout)) }
            })
            .await;
            assert_eq!(call_count.load(Ordering::SeqCst), 1);
            assert!(result.is_err());
        }
    }
}
