//! Adaptive fetch layer: browser-camouflaged GETs with bounded anti-bot
//! retries.
//!
//! The retry policy deliberately splits failures into two classes:
//! anti-bot responses (403/429) back off exponentially and retry, while any
//! other HTTP status or transport error aborts immediately for this URL in
//! this run. The randomized politeness delay is paid on *every* attempt,
//! including the first, not only on retry.

use std::time::Duration;

use rand::seq::IndexedRandom;
use rand::Rng;
use reqwest::Client;

use crate::error::ScrapeError;

/// Desktop browser user-agents rotated per attempt.
const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:109.0) Gecko/20100101 Firefox/115.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36",
];

const ACCEPT_HEADER: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_HEADER: &str = "en-US,en;q=0.9";

/// Tunables for [`AdaptiveClient`]. Defaults match production behavior;
/// tests zero the delays to keep the suite fast.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    pub request_timeout_secs: u64,
    /// Total attempts per URL, anti-bot retries included.
    pub max_retries: u32,
    /// Base for the exponential anti-bot backoff: `base * 2^attempt` seconds.
    pub backoff_base_secs: u64,
    /// Uniform random politeness delay in `[min, max)` milliseconds,
    /// applied before every attempt.
    pub politeness_delay_ms: (u64, u64),
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            request_timeout_secs: 15,
            max_retries: 3,
            backoff_base_secs: 1,
            politeness_delay_ms: (1000, 3000),
        }
    }
}

impl FetchPolicy {
    #[must_use]
    pub fn from_config(config: &planwatch_core::AppConfig) -> Self {
        Self {
            request_timeout_secs: config.scraper_request_timeout_secs,
            max_retries: config.scraper_max_retries,
            backoff_base_secs: config.scraper_backoff_base_secs,
            politeness_delay_ms: (
                config.scraper_politeness_min_ms,
                config.scraper_politeness_max_ms,
            ),
        }
    }
}

/// Exponential anti-bot backoff: `base * 2^attempt` seconds, saturating on
/// extreme configs.
pub(crate) fn backoff_delay(base_secs: u64, attempt: u32) -> Duration {
    Duration::from_secs(base_secs.saturating_mul(1u64 << attempt.min(62)))
}

/// HTTP client with randomized browser-like headers, a politeness delay, and
/// exponential backoff on anti-bot responses.
pub struct AdaptiveClient {
    client: Client,
    policy: FetchPolicy,
}

impl AdaptiveClient {
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(policy: FetchPolicy) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(policy.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, policy })
    }

    /// Fetches a page body, degrading every failure mode to `None`.
    ///
    /// This is the boundary the resolver sees: a page either arrived or it
    /// did not, and the reason has already been logged.
    pub async fn fetch_page(&self, url: &str) -> Option<String> {
        match self.fetch_html(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(url, error = %e, "live fetch failed — no live data");
                None
            }
        }
    }

    /// The retry loop behind [`AdaptiveClient::fetch_page`], with typed
    /// errors for tests and callers that need the failure class.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::AntiBot`] — 403/429 on every attempt until retries
    ///   were exhausted.
    /// - [`ScrapeError::UnexpectedStatus`] — any other non-2xx status
    ///   (aborts immediately, no retry).
    /// - [`ScrapeError::Http`] — transport failure (aborts immediately).
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        let mut last_anti_bot = None;

        for attempt in 0..self.policy.max_retries {
            self.politeness_delay().await;

            let user_agent = {
                let mut rng = rand::rng();
                USER_AGENTS.choose(&mut rng).copied().unwrap_or(USER_AGENTS[0])
            };

            let response = self
                .client
                .get(url)
                .header(reqwest::header::USER_AGENT, user_agent)
                .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
                .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_HEADER)
                .send()
                .await?;

            let status = response.status();

            if status == reqwest::StatusCode::FORBIDDEN
                || status == reqwest::StatusCode::TOO_MANY_REQUESTS
            {
                let delay = backoff_delay(self.policy.backoff_base_secs, attempt);
                tracing::warn!(
                    url,
                    attempt,
                    status = status.as_u16(),
                    delay_secs = delay.as_secs(),
                    "anti-bot response — backing off before retry"
                );
                last_anti_bot = Some(ScrapeError::AntiBot {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
                tokio::time::sleep(delay).await;
                continue;
            }

            if !status.is_success() {
                return Err(ScrapeError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            return Ok(response.text().await?);
        }

        Err(last_anti_bot.unwrap_or(ScrapeError::UnexpectedStatus {
            status: 0,
            url: url.to_owned(),
        }))
    }

    async fn politeness_delay(&self) {
        let (min_ms, max_ms) = self.policy.politeness_delay_ms;
        if max_ms == 0 {
            return;
        }
        let delay_ms = if min_ms < max_ms {
            rand::rng().random_range(min_ms..max_ms)
        } else {
            min_ms
        };
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
