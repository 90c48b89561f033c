use planwatch_core::{ProviderCategory, ProviderIdentity, ProviderRecord, VerifiedFile};

use super::*;
use crate::fetch::FetchPolicy;

fn test_policy() -> FetchPolicy {
    FetchPolicy {
        request_timeout_secs: 5,
        max_retries: 1,
        backoff_base_secs: 0,
        politeness_delay_ms: (0, 0),
    }
}

// No URLs anywhere, so collection never touches the network.
fn sample_file() -> VerifiedFile {
    serde_json::from_value(serde_json::json!({
        "hosting": [
            {
                "name": "Bluehost",
                "plans": [
                    {"name": "Basic", "price": 2.95, "renewal": 10.99,
                     "storage": "10 GB", "bandwidth": "Unmetered",
                     "free_domain": true, "last_checked": "2026-07-12"},
                    {"name": "Choice Plus", "price": 5.45, "storage": "100 GB"}
                ],
                "pricing_yearly": 35.40,
                "money_back_days": 30,
                "storage_type": "SSD",
                "free_ssl": true,
                "support_24_7": true,
                "uptime_percentage": 99.98
            },
            {
                "name": "Hostwinds",
                "plans": [{"name": "Basic", "price": 0.0}]
            }
        ],
        "vpn": [
            {
                "name": "NordVPN",
                "url": null,
                "plans": [{"name": "Standard", "price": 3.39, "last_checked": "2026-07-01"}],
                "pricing_monthly": 12.99,
                "server_count": 6300,
                "country_count": 111,
                "simultaneous_connections": 10,
                "avg_speed_mbps": 6730.0,
                "has_kill_switch": true,
                "logging_policy": "No logs (audited)",
                "jurisdiction": "Panama",
                "support_24_7": true
            },
            {
                "name": "Mullvad",
                "pricing_monthly": 5.48,
                "jurisdiction": "Sweden"
            }
        ]
    }))
    .unwrap()
}

fn scraper_for(name: &str, category: ProviderCategory, file: &VerifiedFile) -> VerifiedScraper {
    VerifiedScraper::from_verified(
        file,
        ProviderIdentity::new(name, category),
        &test_policy(),
        1000.0,
    )
    .expect("scraper")
}

#[tokio::test]
async fn hosting_collection_flattens_one_record_per_plan() {
    let file = sample_file();
    let scraper = scraper_for("Bluehost", ProviderCategory::Hosting, &file);
    let records = scraper.collect().await;

    assert_eq!(records.len(), 2);
    let ProviderRecord::Hosting(basic) = &records[0] else {
        panic!("expected a hosting record");
    };
    assert_eq!(basic.provider_name, "Bluehost");
    assert_eq!(basic.plan_name, "Basic");
    assert_eq!(basic.pricing_monthly, Some(2.95));
    assert_eq!(basic.renewal_price, Some(10.99));
    assert_eq!(basic.storage_gb, Some(10));
    assert_eq!(basic.bandwidth.as_deref(), Some("Unmetered"));
    assert_eq!(basic.free_domain, Some(true));
    assert_eq!(basic.last_checked.as_deref(), Some("2026-07-12"));
    // Provider-level specs repeat on every plan record.
    assert_eq!(basic.money_back_days, Some(30));
    assert_eq!(basic.storage_type.as_deref(), Some("SSD"));
    assert_eq!(basic.free_ssl, Some(true));
    assert_eq!(basic.uptime_percentage, Some(99.98));

    let ProviderRecord::Hosting(plus) = &records[1] else {
        panic!("expected a hosting record");
    };
    assert_eq!(plus.plan_name, "Choice Plus");
    assert_eq!(plus.pricing_monthly, Some(5.45));
    assert_eq!(plus.renewal_price, None);
    assert_eq!(plus.storage_gb, Some(100));
    assert_eq!(plus.free_domain, None);
}

#[tokio::test]
async fn zero_price_maps_to_unknown_not_free() {
    let file = sample_file();
    let scraper = scraper_for("Hostwinds", ProviderCategory::Hosting, &file);
    let records = scraper.collect().await;

    assert_eq!(records.len(), 1);
    let ProviderRecord::Hosting(record) = &records[0] else {
        panic!("expected a hosting record");
    };
    assert_eq!(record.pricing_monthly, None);
}

#[tokio::test]
async fn vpn_collection_produces_a_single_record() {
    let file = sample_file();
    let scraper = scraper_for("NordVPN", ProviderCategory::Vpn, &file);
    let records = scraper.collect().await;

    assert_eq!(records.len(), 1);
    let ProviderRecord::Vpn(record) = &records[0] else {
        panic!("expected a vpn record");
    };
    assert_eq!(record.provider_name, "NordVPN");
    // The plan price beats the static monthly figure.
    assert_eq!(record.pricing_monthly, Some(3.39));
    assert_eq!(record.server_count, Some(6300));
    assert_eq!(record.country_count, Some(111));
    assert_eq!(record.logging_policy.as_deref(), Some("No logs (audited)"));
    assert_eq!(record.jurisdiction.as_deref(), Some("Panama"));
    assert_eq!(record.last_checked.as_deref(), Some("2026-07-01"));
}

#[tokio::test]
async fn vpn_without_plans_falls_back_to_static_monthly_price() {
    let file = sample_file();
    let scraper = scraper_for("Mullvad", ProviderCategory::Vpn, &file);
    let records = scraper.collect().await;

    assert_eq!(records.len(), 1);
    let ProviderRecord::Vpn(record) = &records[0] else {
        panic!("expected a vpn record");
    };
    assert_eq!(record.pricing_monthly, Some(5.48));
    assert_eq!(record.server_count, None);
    assert!(record.last_checked.is_none());
}

#[tokio::test]
async fn unknown_provider_collects_nothing() {
    let file = sample_file();
    let hosting = scraper_for("No Such Host", ProviderCategory::Hosting, &file);
    assert!(hosting.collect().await.is_empty());

    let vpn = scraper_for("No Such VPN", ProviderCategory::Vpn, &file);
    assert!(run_scraper(&vpn).await.is_empty());
}

#[test]
fn roster_covers_both_categories_in_file_order() {
    let file = sample_file();
    let roster = build_roster(&file, &test_policy(), 1.0, None, None).expect("roster");
    let names: Vec<_> = roster
        .iter()
        .map(|s| (s.identity().name.as_str(), s.identity().category))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Bluehost", ProviderCategory::Hosting),
            ("Hostwinds", ProviderCategory::Hosting),
            ("NordVPN", ProviderCategory::Vpn),
            ("Mullvad", ProviderCategory::Vpn),
        ]
    );
}

#[test]
fn roster_filters_by_category_and_provider() {
    let file = sample_file();

    let vpn_only = build_roster(
        &file,
        &test_policy(),
        1.0,
        Some(ProviderCategory::Vpn),
        None,
    )
    .expect("roster");
    assert_eq!(vpn_only.len(), 2);
    assert!(vpn_only
        .iter()
        .all(|s| s.identity().category == ProviderCategory::Vpn));

    let one = build_roster(&file, &test_policy(), 1.0, None, Some("bluehost")).expect("roster");
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].identity().name, "Bluehost");

    let none = build_roster(&file, &test_policy(), 1.0, None, Some("nope")).expect("roster");
    assert!(none.is_empty());
}
