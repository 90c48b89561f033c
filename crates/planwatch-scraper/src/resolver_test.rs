use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use planwatch_core::{ProviderCategory, VerifiedFile};

use super::*;
use crate::fetch::FetchPolicy;

fn test_policy() -> FetchPolicy {
    FetchPolicy {
        request_timeout_secs: 5,
        max_retries: 3,
        backoff_base_secs: 0,
        politeness_delay_ms: (0, 0),
    }
}

fn resolver_for(name: &str, category: ProviderCategory, file: &VerifiedFile) -> FieldResolver {
    let identity = ProviderIdentity::new(name, category);
    let registry = VerifiedRegistry::from_file(file, &identity);
    FieldResolver::new(
        identity,
        registry,
        AdaptiveClient::new(test_policy()).expect("client"),
        RateLimiter::new(1000.0),
    )
}

fn bluehost_file(url: &str) -> VerifiedFile {
    serde_json::from_value(serde_json::json!({
        "hosting": [{
            "name": "Bluehost",
            "url": url,
            "plans": [{
                "name": "Basic",
                "price": 2.95,
                "renewal": 10.99,
                "storage": "10 GB",
                "last_checked": "2026-07-12"
            }]
        }]
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// live_price_from_page — extraction precedence, no network
// ---------------------------------------------------------------------------

#[test]
fn dedicated_selector_wins_over_heuristic() {
    // The heuristic minimum would be 1.99; the selector must win.
    let body = r#"<html><body>
        <p>Limited offer from $1.99</p>
        <span class="price-large">$ 2.95 /mo</span>
    </body></html>"#;
    let price = super::live_price_from_page("Bluehost", body);
    assert!((price - 2.95).abs() < f64::EPSILON);
}

#[test]
fn heuristic_used_when_no_selector_registered() {
    let body = "<html><body>Plans from $2.95/mo, Premium $4500 setup fee, \
                Basic $0.10 trial</body></html>";
    let price = super::live_price_from_page("Hostwinds", body);
    assert!((price - 2.95).abs() < f64::EPSILON);
}

#[test]
fn heuristic_used_when_selector_matches_nothing_positive() {
    let body = r#"<html><body>
        <span class="price-large">Contact us</span>
        <p>Shared hosting at $5.99 per month</p>
    </body></html>"#;
    let price = super::live_price_from_page("Bluehost", body);
    assert!((price - 5.99).abs() < f64::EPSILON);
}

#[test]
fn page_without_any_plausible_price_yields_zero() {
    let body = "<html><body>All plans include a free domain.</body></html>";
    assert_eq!(super::live_price_from_page("Hostwinds", body), 0.0);
}

// ---------------------------------------------------------------------------
// resolve_plans — injection policy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn live_price_is_injected_into_the_canonical_plan() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><span class="price-large">$ 3.49 /mo</span></body></html>"#,
        ))
        .mount(&server)
        .await;

    let file = bluehost_file(&server.uri());
    let resolver = resolver_for("Bluehost", ProviderCategory::Hosting, &file);
    let plans = resolver.resolve_plans(vec![]).await;

    assert_eq!(plans.len(), 1);
    assert!((plans[0].price - 3.49).abs() < f64::EPSILON);
    assert_eq!(plans[0].last_checked.as_deref(), Some(LIVE_STAMP));
    // The rest of the plan is untouched.
    assert_eq!(plans[0].renewal, Some(10.99));
}

#[tokio::test]
async fn fetch_failure_leaves_registry_plans_unmodified() {
    // Nothing listens on port 9 — the live fetch fails with a network error.
    let file = bluehost_file("http://127.0.0.1:9");
    let resolver = resolver_for("Bluehost", ProviderCategory::Hosting, &file);
    let plans = resolver.resolve_plans(vec![]).await;

    assert_eq!(plans.len(), 1);
    assert!((plans[0].price - 2.95).abs() < f64::EPSILON);
    assert_eq!(plans[0].last_checked.as_deref(), Some("2026-07-12"));
}

#[tokio::test]
async fn no_injection_into_an_empty_plan_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>$4.99/mo</body></html>"),
        )
        .mount(&server)
        .await;

    // Record has a URL but no plans; a live price exists but has nowhere to go.
    let file: VerifiedFile = serde_json::from_value(serde_json::json!({
        "hosting": [{"name": "Hostwinds", "url": server.uri()}]
    }))
    .unwrap();
    let resolver = resolver_for("Hostwinds", ProviderCategory::Hosting, &file);

    let plans = resolver.resolve_plans(vec![]).await;
    assert!(plans.is_empty());
}

#[tokio::test]
async fn no_url_means_no_live_fetch() {
    let file: VerifiedFile = serde_json::from_value(serde_json::json!({
        "hosting": [{
            "name": "Bluehost",
            "plans": [{"name": "Basic", "price": 2.95}]
        }]
    }))
    .unwrap();
    let resolver = resolver_for("Bluehost", ProviderCategory::Hosting, &file);
    let plans = resolver.resolve_plans(vec![]).await;
    assert!((plans[0].price - 2.95).abs() < f64::EPSILON);
    assert!(plans[0].last_checked.is_none());
}

// ---------------------------------------------------------------------------
// get_verified_field — dynamic entry point
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_plan_fields_resolve_statically() {
    let file: VerifiedFile = serde_json::from_value(serde_json::json!({
        "vpn": [{"name": "NordVPN", "server_count": 6300}]
    }))
    .unwrap();
    let resolver = resolver_for("NordVPN", ProviderCategory::Vpn, &file);

    let value = resolver
        .get_verified_field("server_count", serde_json::json!(null))
        .await;
    assert_eq!(value, serde_json::json!(6300));
}

#[tokio::test]
async fn default_passes_through_when_both_sources_are_absent() {
    let file = VerifiedFile::default();
    let resolver = resolver_for("Unknown Host", ProviderCategory::Hosting, &file);

    let default = serde_json::json!(null);
    let value = resolver
        .get_verified_field("pricing_monthly", default.clone())
        .await;
    assert_eq!(value, default);

    let plans = resolver
        .get_verified_field("plans", serde_json::json!([]))
        .await;
    assert_eq!(plans, serde_json::json!([]));
}

#[tokio::test]
async fn plans_field_returns_registry_plans_when_live_fails() {
    let file = bluehost_file("http://127.0.0.1:9");
    let resolver = resolver_for("Bluehost", ProviderCategory::Hosting, &file);

    let plans = resolver
        .get_verified_field("plans", serde_json::json!([]))
        .await;
    assert_eq!(plans[0]["name"], "Basic");
    assert!((plans[0]["price"].as_f64().unwrap() - 2.95).abs() < f64::EPSILON);
}
