//! Per-scraper view onto the verified-data registry.
//!
//! Loaded once per scraper instance. A missing file, a parse error, or an
//! unknown provider all degrade to "no verified data" — field lookups then
//! fall through to the caller-supplied default. Load failure never raises.

use std::path::Path;

use serde_json::Value;

use planwatch_core::{load_verified_file, PlanRecord, ProviderIdentity, VerifiedFile, VerifiedProvider};

/// The matched verified record for one provider, or nothing.
#[derive(Debug, Clone, Default)]
pub struct VerifiedRegistry {
    record: Option<VerifiedProvider>,
}

impl VerifiedRegistry {
    /// Loads the category-partitioned dataset and caches the entry whose name
    /// matches `identity` case-insensitively. Any failure degrades to an
    /// empty registry.
    #[must_use]
    pub fn load(path: &Path, identity: &ProviderIdentity) -> Self {
        match load_verified_file(path) {
            Ok(file) => Self::from_file(&file, identity),
            Err(e) => {
                tracing::warn!(
                    provider = %identity,
                    error = %e,
                    "failed to load verified data registry — degrading to empty"
                );
                Self::default()
            }
        }
    }

    /// Builds the view from an already-loaded file (the orchestration driver
    /// loads the file once and shares it across the roster).
    #[must_use]
    pub fn from_file(file: &VerifiedFile, identity: &ProviderIdentity) -> Self {
        let record = file.find(identity.category, &identity.name).cloned();
        if record.is_none() {
            tracing::debug!(provider = %identity, "no verified record for provider");
        }
        Self { record }
    }

    #[must_use]
    pub fn record(&self) -> Option<&VerifiedProvider> {
        self.record.as_ref()
    }

    /// The provider's canonical URL from the verified record, if known.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.record.as_ref()?.url.as_deref()
    }

    /// The verified plan list, when the record has one.
    #[must_use]
    pub fn plans(&self) -> Option<&[PlanRecord]> {
        let plans = self.record.as_ref()?.plans.as_slice();
        if plans.is_empty() {
            None
        } else {
            Some(plans)
        }
    }

    /// Looks up `field` inside the matched record, falling back to `default`
    /// when the record or the field is absent. `plans` is special-cased and
    /// returned as the full plan list.
    #[must_use]
    pub fn get_field(&self, field: &str, default: Value) -> Value {
        let Some(record) = &self.record else {
            return default;
        };
        if field == "plans" {
            return match self.plans() {
                Some(plans) => serde_json::to_value(plans).unwrap_or(default),
                None => default,
            };
        }
        record.spec(field).cloned().unwrap_or(default)
    }

    // Typed spec accessors for record assembly. Absent or mistyped values
    // read as None; nothing is coerced into a fabricated number.

    #[must_use]
    pub fn spec_f64(&self, field: &str) -> Option<f64> {
        self.record.as_ref()?.spec(field)?.as_f64()
    }

    #[must_use]
    pub fn spec_i32(&self, field: &str) -> Option<i32> {
        let v = self.record.as_ref()?.spec(field)?.as_i64()?;
        i32::try_from(v).ok()
    }

    #[must_use]
    pub fn spec_bool(&self, field: &str) -> Option<bool> {
        self.record.as_ref()?.spec(field)?.as_bool()
    }

    #[must_use]
    pub fn spec_string(&self, field: &str) -> Option<String> {
        Some(self.record.as_ref()?.spec(field)?.as_str()?.to_owned())
    }
}
