//! Output records the orchestration layer persists.
//!
//! A hosting row represents one `(provider, plan)` pair; a VPN row represents
//! a whole provider. Both are assembled from two typed partials — pricing and
//! features — merged field-by-field in `from_parts`, so a misspelled field is
//! a compile error rather than a silently dropped map key.
//!
//! Every field except the identity columns is independently nullable. A
//! populated value always traces to a live extraction or to the verified
//! registry; an unknown stays `None` and is persisted as SQL `NULL`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pricing partial for a hosting plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostingPricing {
    pub pricing_monthly: Option<f64>,
    pub pricing_yearly: Option<f64>,
    pub renewal_price: Option<f64>,
    pub setup_fee: Option<f64>,
    pub money_back_days: Option<i32>,
}

/// Feature/resource partial for a hosting plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostingFeatures {
    pub storage_gb: Option<i32>,
    pub storage_type: Option<String>,
    pub bandwidth: Option<String>,
    pub free_ssl: Option<bool>,
    pub free_domain: Option<bool>,
    pub ssh_access: Option<bool>,
    pub backup_included: Option<bool>,
    pub support_24_7: Option<bool>,
    pub uptime_percentage: Option<f64>,
}

/// One comparable hosting plan, ready for upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostingProvider {
    pub provider_name: String,
    pub plan_name: String,
    pub website_url: Option<String>,
    pub last_updated: DateTime<Utc>,
    /// When the price came from a live extraction, the literal stamp
    /// `"Live just now"`; otherwise the registry's curation date.
    pub last_checked: Option<String>,

    pub pricing_monthly: Option<f64>,
    pub pricing_yearly: Option<f64>,
    pub renewal_price: Option<f64>,
    pub setup_fee: Option<f64>,
    pub money_back_days: Option<i32>,

    pub storage_gb: Option<i32>,
    pub storage_type: Option<String>,
    pub bandwidth: Option<String>,
    pub free_ssl: Option<bool>,
    pub free_domain: Option<bool>,
    pub ssh_access: Option<bool>,
    pub backup_included: Option<bool>,
    pub support_24_7: Option<bool>,
    pub uptime_percentage: Option<f64>,
}

impl HostingProvider {
    /// Merges the two typed partials into a full record. Every partial field
    /// is accounted for here by name.
    #[must_use]
    pub fn from_parts(
        provider_name: impl Into<String>,
        plan_name: impl Into<String>,
        website_url: Option<String>,
        pricing: HostingPricing,
        features: HostingFeatures,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            plan_name: plan_name.into(),
            website_url,
            last_updated: Utc::now(),
            last_checked: None,
            pricing_monthly: pricing.pricing_monthly,
            pricing_yearly: pricing.pricing_yearly,
            renewal_price: pricing.renewal_price,
            setup_fee: pricing.setup_fee,
            money_back_days: pricing.money_back_days,
            storage_gb: features.storage_gb,
            storage_type: features.storage_type,
            bandwidth: features.bandwidth,
            free_ssl: features.free_ssl,
            free_domain: features.free_domain,
            ssh_access: features.ssh_access,
            backup_included: features.backup_included,
            support_24_7: features.support_24_7,
            uptime_percentage: features.uptime_percentage,
        }
    }

    /// Dedup/upsert key: `provider_name + plan_name`, lowercased.
    #[must_use]
    pub fn key(&self) -> String {
        format!(
            "{}::{}",
            self.provider_name.to_lowercase(),
            self.plan_name.to_lowercase()
        )
    }
}

/// Pricing partial for a VPN provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VpnPricing {
    pub pricing_monthly: Option<f64>,
    pub pricing_yearly: Option<f64>,
    pub money_back_days: Option<i32>,
}

/// Network/privacy partial for a VPN provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VpnFeatures {
    pub server_count: Option<i32>,
    pub country_count: Option<i32>,
    pub simultaneous_connections: Option<i32>,
    pub avg_speed_mbps: Option<f64>,
    pub has_kill_switch: Option<bool>,
    pub logging_policy: Option<String>,
    pub jurisdiction: Option<String>,
    pub support_24_7: Option<bool>,
}

/// One comparable VPN provider, ready for upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnProvider {
    pub provider_name: String,
    pub website_url: Option<String>,
    pub last_updated: DateTime<Utc>,
    pub last_checked: Option<String>,

    pub pricing_monthly: Option<f64>,
    pub pricing_yearly: Option<f64>,
    pub money_back_days: Option<i32>,

    pub server_count: Option<i32>,
    pub country_count: Option<i32>,
    pub simultaneous_connections: Option<i32>,
    pub avg_speed_mbps: Option<f64>,
    pub has_kill_switch: Option<bool>,
    pub logging_policy: Option<String>,
    pub jurisdiction: Option<String>,
    pub support_24_7: Option<bool>,
}

impl VpnProvider {
    /// Merges the two typed partials into a full record.
    #[must_use]
    pub fn from_parts(
        provider_name: impl Into<String>,
        website_url: Option<String>,
        pricing: VpnPricing,
        features: VpnFeatures,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            website_url,
            last_updated: Utc::now(),
            last_checked: None,
            pricing_monthly: pricing.pricing_monthly,
            pricing_yearly: pricing.pricing_yearly,
            money_back_days: pricing.money_back_days,
            server_count: features.server_count,
            country_count: features.country_count,
            simultaneous_connections: features.simultaneous_connections,
            avg_speed_mbps: features.avg_speed_mbps,
            has_kill_switch: features.has_kill_switch,
            logging_policy: features.logging_policy,
            jurisdiction: features.jurisdiction,
            support_24_7: features.support_24_7,
        }
    }

    /// Dedup/upsert key: `provider_name`, lowercased.
    #[must_use]
    pub fn key(&self) -> String {
        self.provider_name.to_lowercase()
    }
}

/// Output of a single scraper run: zero or more records of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderRecord {
    Hosting(HostingProvider),
    Vpn(VpnProvider),
}

/// One full collection run, serialized as the history snapshot and compared
/// against the previous run for change detection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub collected_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub hosting: Vec<HostingProvider>,
    #[serde(default)]
    pub vpn: Vec<VpnProvider>,
    /// Change lines versus the previous snapshot; informational only, kept in
    /// the snapshot for the record.
    #[serde(default)]
    pub changes_detected: Vec<String>,
}

impl Dataset {
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.hosting.len() + self.vpn.len()
    }
}
