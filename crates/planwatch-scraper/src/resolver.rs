//! The hybrid field resolver: the single entry point scrapers use to obtain
//! a field value.
//!
//! Resolution layers, most to least trusted for pricing:
//! 1. live page + dedicated CSS selector,
//! 2. live page + heuristic price sweep,
//! 3. the static verified registry,
//! 4. the caller's default.
//!
//! Only `plans` pays the cost of a live fetch — pricing is the one field
//! volatile enough to re-verify on every run. Everything else resolves
//! straight from the registry. A positive live price overwrites the first
//! (canonical) plan's price and stamps it; failures at any layer cascade
//! silently to the next, and nothing is ever fabricated.

use scraper::{Html, Selector};
use serde_json::Value;

use planwatch_core::{PlanRecord, ProviderIdentity};

use crate::extract::{clean_text, extract_price, sniff_lowest_price};
use crate::fetch::AdaptiveClient;
use crate::rate_limit::RateLimiter;
use crate::selectors::get_selectors;
use crate::verified::VerifiedRegistry;

/// Stamp written into `plans[0].last_checked` on successful live injection.
pub const LIVE_STAMP: &str = "Live just now";

pub struct FieldResolver {
    identity: ProviderIdentity,
    registry: VerifiedRegistry,
    client: AdaptiveClient,
    limiter: RateLimiter,
}

impl FieldResolver {
    #[must_use]
    pub fn new(
        identity: ProviderIdentity,
        registry: VerifiedRegistry,
        client: AdaptiveClient,
        limiter: RateLimiter,
    ) -> Self {
        Self {
            identity,
            registry,
            client,
            limiter,
        }
    }

    #[must_use]
    pub fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    #[must_use]
    pub fn registry(&self) -> &VerifiedRegistry {
        &self.registry
    }

    /// Resolves any verified field. `plans` goes through the live-injection
    /// path; every other field is a static registry lookup. When both the
    /// live fetch and the registry come up empty the caller's `default` is
    /// returned unchanged — never a guessed value.
    pub async fn get_verified_field(&self, field: &str, default: Value) -> Value {
        if field == "plans" {
            let fallback: Vec<PlanRecord> =
                serde_json::from_value(default.clone()).unwrap_or_default();
            let resolved = self.resolve_plans(fallback).await;
            if resolved.is_empty() {
                // Nothing to inject into; hand back the original default
                // untouched (it may not even be a list).
                return default;
            }
            return serde_json::to_value(resolved).unwrap_or(default);
        }
        self.registry.get_field(field, default)
    }

    /// The `plans` path: registry plans (or the caller's fallback), with the
    /// canonical plan's price overwritten by a live extraction when one
    /// succeeds. Injection only ever touches a non-empty list.
    pub async fn resolve_plans(&self, default: Vec<PlanRecord>) -> Vec<PlanRecord> {
        let mut plans = match self.registry.plans() {
            Some(p) => p.to_vec(),
            None => default,
        };

        let Some(url) = self.registry.url().map(str::to_owned) else {
            return plans;
        };

        let live = self.live_price(&url).await;
        if live > 0.0 {
            if let Some(basic) = plans.first_mut() {
                basic.price = live;
                basic.last_checked = Some(LIVE_STAMP.to_owned());
            }
        }
        plans
    }

    /// One rate-limited live fetch plus extraction. `0.0` means "no live
    /// data" — the fetch failed or nothing plausible was on the page.
    async fn live_price(&self, url: &str) -> f64 {
        self.limiter.wait().await;
        let Some(body) = self.client.fetch_page(url).await else {
            return 0.0;
        };
        let price = live_price_from_page(&self.identity.name, &body);
        if price > 0.0 {
            tracing::info!(provider = %self.identity, price, "live price extracted");
        } else {
            tracing::debug!(provider = %self.identity, url, "no plausible price on live page");
        }
        price
    }
}

/// Dedicated selector first; heuristic sweep over the page text only when no
/// selector is registered or the selector yields nothing positive.
fn live_price_from_page(provider_name: &str, body: &str) -> f64 {
    let document = Html::parse_document(body);

    if let Some(selectors) = get_selectors(provider_name) {
        if let Some(price) = dedicated_price(&document, selectors.price_css) {
            return price;
        }
    }

    let text = document.root_element().text().collect::<Vec<_>>().join(" ");
    sniff_lowest_price(&text)
}

/// Extracts a positive price from the first element matching `css`, e.g.
/// `"$ 2.95 /mo"` → `2.95`. Selector parse failures and empty matches both
/// read as "this method produced nothing".
fn dedicated_price(document: &Html, css: &str) -> Option<f64> {
    let selector = Selector::parse(css).ok()?;
    let element = document.select(&selector).next()?;
    let text = clean_text(&element.text().collect::<Vec<_>>().join(" "));
    extract_price(&text).filter(|p| *p > 0.0)
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
