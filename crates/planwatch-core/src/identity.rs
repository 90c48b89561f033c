use serde::{Deserialize, Serialize};

/// The comparison vertical a provider belongs to. Partitions both the
/// verified-data file and the output tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderCategory {
    Hosting,
    Vpn,
}

impl ProviderCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderCategory::Hosting => "hosting",
            ProviderCategory::Vpn => "vpn",
        }
    }
}

impl std::fmt::Display for ProviderCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who a scraper collects for. Fixed at construction; used as the lookup key
/// into both the selector registry and the verified-data registry
/// (case-insensitive match on `name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderIdentity {
    pub name: String,
    pub category: ProviderCategory,
}

impl ProviderIdentity {
    #[must_use]
    pub fn new(name: impl Into<String>, category: ProviderCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// Case-insensitive comparison against another provider name.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.name.eq_ignore_ascii_case(other)
    }
}

impl std::fmt::Display for ProviderIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.category)
    }
}
