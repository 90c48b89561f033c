//! The provider-scraper capability interface and the generic
//! registry-backed implementation.
//!
//! Concrete scrapers are value-producing structs, not subclasses: anything
//! implementing [`ProviderScraper`] can sit in the roster. In practice every
//! provider is served by [`VerifiedScraper`], which pairs a provider identity
//! with the hybrid resolver — the per-provider "leaf" reduces to one entry in
//! the verified-data file, and the roster is discovered from that file at
//! startup.

use planwatch_core::{
    HostingFeatures, HostingPricing, HostingProvider, ProviderCategory, ProviderIdentity,
    ProviderRecord, VerifiedFile, VpnFeatures, VpnPricing, VpnProvider,
};

use crate::error::ScrapeError;
use crate::fetch::{AdaptiveClient, FetchPolicy};
use crate::rate_limit::RateLimiter;
use crate::resolver::FieldResolver;
use crate::verified::VerifiedRegistry;

/// Capability interface for anything that can collect provider records.
///
/// `collect` must contain its own failures: a scraper that cannot produce
/// data returns an empty vec, it does not error past its boundary.
pub trait ProviderScraper {
    fn identity(&self) -> &ProviderIdentity;
    fn collect(&self) -> impl std::future::Future<Output = Vec<ProviderRecord>> + Send;
}

/// Runs one scraper with boundary logging. The orchestration driver calls
/// this for every roster entry, sequentially.
pub async fn run_scraper<S: ProviderScraper>(scraper: &S) -> Vec<ProviderRecord> {
    let identity = scraper.identity().clone();
    tracing::info!(provider = %identity, "collecting");
    let records = scraper.collect().await;
    if records.is_empty() {
        tracing::warn!(provider = %identity, "no records collected — provider omitted this run");
    } else {
        tracing::info!(provider = %identity, count = records.len(), "collected");
    }
    records
}

/// The generic scraper: provider identity plus the hybrid resolver. Each
/// instance owns its own fetch client and rate limiter.
pub struct VerifiedScraper {
    resolver: FieldResolver,
}

impl VerifiedScraper {
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the fetch client cannot be built.
    pub fn from_verified(
        file: &VerifiedFile,
        identity: ProviderIdentity,
        policy: &FetchPolicy,
        requests_per_second: f64,
    ) -> Result<Self, ScrapeError> {
        let registry = VerifiedRegistry::from_file(file, &identity);
        let client = AdaptiveClient::new(policy.clone())?;
        let limiter = RateLimiter::new(requests_per_second);
        Ok(Self {
            resolver: FieldResolver::new(identity, registry, client, limiter),
        })
    }

    async fn collect_hosting(&self) -> Vec<ProviderRecord> {
        let plans = self.resolver.resolve_plans(vec![]).await;
        if plans.is_empty() {
            return vec![];
        }

        let registry = self.resolver.registry();
        let name = &self.resolver.identity().name;
        let website_url = registry.url().map(str::to_owned);

        plans
            .iter()
            .map(|plan| {
                let pricing = HostingPricing {
                    pricing_monthly: positive(plan.price),
                    pricing_yearly: registry.spec_f64("pricing_yearly"),
                    renewal_price: plan.renewal,
                    setup_fee: registry.spec_f64("setup_fee"),
                    money_back_days: registry.spec_i32("money_back_days"),
                };
                let features = HostingFeatures {
                    storage_gb: plan.storage_gb(),
                    storage_type: registry.spec_string("storage_type"),
                    bandwidth: plan.bandwidth.clone(),
                    free_ssl: registry.spec_bool("free_ssl"),
                    free_domain: plan.free_domain,
                    ssh_access: registry.spec_bool("ssh_access"),
                    backup_included: registry.spec_bool("backup_included"),
                    support_24_7: registry.spec_bool("support_24_7"),
                    uptime_percentage: registry.spec_f64("uptime_percentage"),
                };
                let mut record = HostingProvider::from_parts(
                    name.clone(),
                    plan.name.clone(),
                    website_url.clone(),
                    pricing,
                    features,
                );
                record.last_checked = plan.last_checked.clone();
                ProviderRecord::Hosting(record)
            })
            .collect()
    }

    async fn collect_vpn(&self) -> Vec<ProviderRecord> {
        let registry = self.resolver.registry();
        if registry.record().is_none() {
            return vec![];
        }

        // VPN plan lists carry the monthly price; a live injection on the
        // canonical plan supersedes the registry's static monthly figure.
        let plans = self.resolver.resolve_plans(vec![]).await;
        let live_monthly = plans.first().map(|p| p.price).and_then(positive);

        let registry = self.resolver.registry();
        let pricing = VpnPricing {
            pricing_monthly: live_monthly.or_else(|| registry.spec_f64("pricing_monthly")),
            pricing_yearly: registry.spec_f64("pricing_yearly"),
            money_back_days: registry.spec_i32("money_back_days"),
        };
        let features = VpnFeatures {
            server_count: registry.spec_i32("server_count"),
            country_count: registry.spec_i32("country_count"),
            simultaneous_connections: registry.spec_i32("simultaneous_connections"),
            avg_speed_mbps: registry.spec_f64("avg_speed_mbps"),
            has_kill_switch: registry.spec_bool("has_kill_switch"),
            logging_policy: registry.spec_string("logging_policy"),
            jurisdiction: registry.spec_string("jurisdiction"),
            support_24_7: registry.spec_bool("support_24_7"),
        };

        let mut record = VpnProvider::from_parts(
            self.resolver.identity().name.clone(),
            registry.url().map(str::to_owned),
            pricing,
            features,
        );
        record.last_checked = plans.first().and_then(|p| p.last_checked.clone());
        vec![ProviderRecord::Vpn(record)]
    }
}

impl ProviderScraper for VerifiedScraper {
    fn identity(&self) -> &ProviderIdentity {
        self.resolver.identity()
    }

    async fn collect(&self) -> Vec<ProviderRecord> {
        match self.resolver.identity().category {
            ProviderCategory::Hosting => self.collect_hosting().await,
            ProviderCategory::Vpn => self.collect_vpn().await,
        }
    }
}

/// Builds the full roster from the verified file, optionally filtered by
/// category and/or provider name (case-insensitive).
///
/// # Errors
///
/// Returns [`ScrapeError::Http`] if a fetch client cannot be constructed.
pub fn build_roster(
    file: &VerifiedFile,
    policy: &FetchPolicy,
    requests_per_second: f64,
    category: Option<ProviderCategory>,
    provider: Option<&str>,
) -> Result<Vec<VerifiedScraper>, ScrapeError> {
    let mut roster = Vec::new();
    for cat in [ProviderCategory::Hosting, ProviderCategory::Vpn] {
        if category.is_some_and(|c| c != cat) {
            continue;
        }
        for entry in file.providers(cat) {
            if provider.is_some_and(|p| !entry.name.eq_ignore_ascii_case(p)) {
                continue;
            }
            roster.push(VerifiedScraper::from_verified(
                file,
                ProviderIdentity::new(entry.name.clone(), cat),
                policy,
                requests_per_second,
            )?);
        }
    }
    Ok(roster)
}

/// A zero or negative scraped price means "unknown", never a real price.
fn positive(value: f64) -> Option<f64> {
    (value > 0.0).then_some(value)
}

#[cfg(test)]
#[path = "scrapers_test.rs"]
mod tests;
