//! Per-scraper request pacing.
//!
//! Each scraper owns its own limiter; collection runs are sequential, so no
//! cross-scraper coordination exists or is required. The mutex only makes a
//! single scraper's own repeated calls safe if it is ever driven from more
//! than one task.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval between the starts of consecutive requests
/// made through one limiter instance.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// `requests_per_second = 0.5` means one request every two seconds.
    /// Non-positive rates are clamped to one request per second.
    #[must_use]
    pub fn new(requests_per_second: f64) -> Self {
        let rps = if requests_per_second > 0.0 {
            requests_per_second
        } else {
            1.0
        };
        Self {
            min_interval: Duration::from_secs_f64(1.0 / rps),
            last_call: Mutex::new(None),
        }
    }

    /// Sleeps until at least `1 / requests_per_second` has elapsed since the
    /// previous `wait` on this instance, then records the new timestamp.
    /// The lock is held across the sleep so concurrent callers serialize.
    pub async fn wait(&self) {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_wait_returns_immediately() {
        let limiter = RateLimiter::new(0.5);
        let start = std::time::Instant::now();
        limiter.wait().await;
        assert!(
            start.elapsed() < Duration::from_millis(100),
            "first wait should not sleep"
        );
    }

    #[tokio::test]
    async fn consecutive_waits_respect_the_minimum_gap() {
        // 20 req/s → 50ms gap; fast enough to assert wall-clock behavior.
        let limiter = RateLimiter::new(20.0);
        limiter.wait().await;
        let start = std::time::Instant::now();
        limiter.wait().await;
        assert!(
            start.elapsed() >= Duration::from_millis(50),
            "second wait returned after {:?}, expected >= 50ms",
            start.elapsed()
        );
    }

    #[tokio::test]
    async fn gap_already_elapsed_does_not_sleep() {
        let limiter = RateLimiter::new(20.0);
        limiter.wait().await;
        tokio::time::sleep(Duration::from_millis(60)).await;
        let start = std::time::Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() < Duration::from_millis(20));
    }

    #[tokio::test]
    async fn non_positive_rate_clamps_instead_of_panicking() {
        let limiter = RateLimiter::new(0.0);
        limiter.wait().await;
    }
}
