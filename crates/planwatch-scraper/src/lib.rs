pub mod error;
pub mod extract;
pub mod fetch;
pub mod rate_limit;
pub mod resolver;
pub mod scrapers;
pub mod selectors;
pub mod verified;

pub use error::ScrapeError;
pub use fetch::{AdaptiveClient, FetchPolicy};
pub use rate_limit::RateLimiter;
pub use resolver::{FieldResolver, LIVE_STAMP};
pub use scrapers::{build_roster, run_scraper, ProviderScraper, VerifiedScraper};
pub use selectors::{get_selectors, SelectorSet};
pub use verified::VerifiedRegistry;
