//! Request pacing for one scraper instance: a random pause between requests
//! plus a sliding one-minute cap.

use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

const WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Default)]
struct ThrottleState {
    sent: VecDeque<Instant>,
}

impl ThrottleState {
    /// How long to wait before another request fits under `rate` per minute.
    fn wait_for_slot(&mut self, now: Instant, rate: u32) -> Option<Duration> {
        while let Some(oldest) = self.sent.front() {
            if now.duration_since(*oldest) >= WINDOW {
                self.sent.pop_front();
            } else {
                break;
            }
        }

        if rate == 0 || self.sent.len() < rate as usize {
            return None;
        }
        self.sent
            .front()
            .map(|oldest| WINDOW.saturating_sub(now.duration_since(*oldest)))
    }
}

#[derive(Debug)]
pub struct RequestThrottle {
    min_delay: Duration,
    max_delay: Duration,
    rate_limit_per_minute: u32,
    state: Mutex<ThrottleState>,
}

impl RequestThrottle {
    pub fn new(min_delay: Duration, max_delay: Duration, rate_limit_per_minute: u32) -> Self {
        Self {
            min_delay,
            max_delay: max_delay.max(min_delay),
            rate_limit_per_minute,
            state: Mutex::new(ThrottleState::default()),
        }
    }

    /// Waits until the next request may go out. The first request is not delayed.
    pub async fn acquire(&self) {
        // held across the sleeps so requests from one instance go out one at a time
        let mut state = self.state.lock().await;

        if !state.sent.is_empty() {
            let pause = self.jitter();
            if !pause.is_zero() {
                tracing::debug!(pause_ms = pause.as_millis() as u64, "pausing between requests");
                tokio::time::sleep(pause).await;
            }
        }

        if let Some(wait) = state.wait_for_slot(Instant::now(), self.rate_limit_per_minute) {
            tracing::info!(
                wait_ms = wait.as_millis() as u64,
                limit = self.rate_limit_per_minute,
                "per-minute request cap reached, waiting"
            );
            tokio::time::sleep(wait).await;
            state.wait_for_slot(Instant::now(), self.rate_limit_per_minute);
        }

        state.sent.push_back(Instant::now());
    }

    fn jitter(&self) -> Duration {
        let min = self.min_delay.as_millis() as u64;
        let max = self.max_delay.as_millis() as u64;
        if max <= min {
            return self.min_delay;
        }
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}
