use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod identity;
pub mod records;
pub mod verified;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use identity::{ProviderCategory, ProviderIdentity};
pub use records::{
    Dataset, HostingFeatures, HostingPricing, HostingProvider, ProviderRecord, VpnFeatures,
    VpnPricing, VpnProvider,
};
pub use verified::{load_verified_file, PlanRecord, VerifiedFile, VerifiedProvider};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read verified data file {path}: {source}")]
    VerifiedFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse verified data file: {0}")]
    VerifiedFileParse(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
