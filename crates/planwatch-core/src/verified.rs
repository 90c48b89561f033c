//! The verified-data registry: a hand-maintained JSON document holding the
//! "trust floor" record for every provider, partitioned by category.
//!
//! ## Observed shape
//!
//! ```json
//! {
//!   "hosting": [
//!     {
//!       "name": "Bluehost",
//!       "url": "https://www.bluehost.com",
//!       "plans": [
//!         { "name": "Basic", "price": 2.95, "renewal": 10.99,
//!           "storage": "10 GB", "bandwidth": "Unmetered",
//!           "free_domain": true, "last_checked": "2026-07-12" }
//!       ],
//!       "money_back_days": 30,
//!       "free_ssl": true
//!     }
//!   ],
//!   "vpn": [ ... ]
//! }
//! ```
//!
//! Category-specific spec fields (`money_back_days`, `server_count`, ...) sit
//! at the top level of each provider entry, so they are captured through a
//! flattened map rather than a fixed struct. `storage` appears both as a
//! string (`"10 GB"`) and a bare number in the wild; it is modeled as a raw
//! JSON value and interpreted at assembly time.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ConfigError, ProviderCategory};

/// One plan inside a provider's verified record. The first element of a
/// provider's plan list is the canonical/basic plan and is the only element
/// live-price injection may mutate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal: Option<f64>,
    /// `"10 GB"`, `"Unmetered"`, or a bare number of gigabytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_domain: Option<bool>,
    /// Either a curation date (`"2026-07-12"`) or the live-injection stamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<String>,
    /// Plan fields the curators added that have no dedicated column.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PlanRecord {
    /// Interprets `storage` as whole gigabytes when it is numeric or a
    /// leading-number string like `"50 GB"`. `"Unmetered"` and absent both
    /// yield `None`.
    #[must_use]
    pub fn storage_gb(&self) -> Option<i32> {
        match self.storage.as_ref()? {
            Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
            Value::String(s) => {
                let digits: String = s.chars().take_while(char::is_ascii_digit).collect();
                digits.parse().ok()
            }
            _ => None,
        }
    }
}

/// A provider's static "ground truth" entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedProvider {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plans: Vec<PlanRecord>,
    /// Category-specific spec fields, keyed by field name.
    #[serde(flatten)]
    pub specs: BTreeMap<String, Value>,
}

impl VerifiedProvider {
    /// Looks up a spec field by name. `plans` is not reachable through this
    /// accessor; callers use [`VerifiedProvider::plans`] directly.
    #[must_use]
    pub fn spec(&self, field: &str) -> Option<&Value> {
        self.specs.get(field)
    }
}

/// The full category-partitioned verified dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifiedFile {
    #[serde(default)]
    pub hosting: Vec<VerifiedProvider>,
    #[serde(default)]
    pub vpn: Vec<VerifiedProvider>,
}

impl VerifiedFile {
    #[must_use]
    pub fn providers(&self, category: ProviderCategory) -> &[VerifiedProvider] {
        match category {
            ProviderCategory::Hosting => &self.hosting,
            ProviderCategory::Vpn => &self.vpn,
        }
    }

    /// Finds a provider entry by case-insensitive name within one category.
    #[must_use]
    pub fn find(&self, category: ProviderCategory, name: &str) -> Option<&VerifiedProvider> {
        self.providers(category)
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Load the verified-data registry from a JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed. Callers that
/// can operate without verified data (the per-scraper registry view) catch
/// this and degrade to an empty record.
pub fn load_verified_file(path: &Path) -> Result<VerifiedFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::VerifiedFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    let file: VerifiedFile = serde_json::from_str(&content)?;
    Ok(file)
}

#[cfg(test)]
#[path = "verified_test.rs"]
mod tests;
