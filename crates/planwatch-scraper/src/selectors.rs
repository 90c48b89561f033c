//! Dedicated extraction rules for the "VIP" providers.
//!
//! When a provider is listed here the resolver extracts from these exact CSS
//! paths before falling back to the heuristic sweep. The table is static and
//! consulted read-only; lookup is case-insensitive, matching the verified
//! registry's normalization.

/// Provider-specific CSS locators. `price_css` may be a selector list
/// (`"a, b"`) — the first matching element wins.
#[derive(Debug, Clone, Copy)]
pub struct SelectorSet {
    pub price_css: &'static str,
    pub plan_name_css: Option<&'static str>,
    pub features_css: Option<&'static str>,
}

#[rustfmt::skip]
static SELECTOR_REGISTRY: &[(&str, SelectorSet)] = &[
    // hosting
    ("Bluehost", SelectorSet {
        price_css: "span.price-large, span[data-testid='price']",
        plan_name_css: Some("h3.card-title"),
        features_css: None,
    }),
    ("SiteGround", SelectorSet {
        price_css: "span.price",
        plan_name_css: Some("h2.entry-title"),
        features_css: None,
    }),
    ("HostGator", SelectorSet {
        price_css: ".pricing-card-price",
        plan_name_css: Some(".pricing-card-title"),
        features_css: None,
    }),
    ("DreamHost", SelectorSet {
        price_css: ".price-month",
        plan_name_css: Some(".plan-name"),
        features_css: None,
    }),
    ("Hostinger", SelectorSet {
        price_css: ".h-price__amount",
        plan_name_css: Some(".h-cart-product__title"),
        features_css: Some(".h-features-list"),
    }),
    ("A2 Hosting", SelectorSet {
        price_css: ".price-value",
        plan_name_css: Some(".plan-title"),
        features_css: None,
    }),
    ("InMotion Hosting", SelectorSet {
        price_css: ".im-price",
        plan_name_css: Some("h3.im-heading"),
        features_css: None,
    }),
    ("GoDaddy", SelectorSet {
        price_css: ".pricing-main .price",
        plan_name_css: Some(".pkg-title"),
        features_css: None,
    }),
    ("Namecheap", SelectorSet {
        price_css: ".price .amount",
        plan_name_css: Some(".product-header"),
        features_css: None,
    }),
    ("GreenGeeks", SelectorSet {
        price_css: ".pricing-price",
        plan_name_css: Some(".plan-box h2"),
        features_css: None,
    }),
    ("Kinsta", SelectorSet {
        price_css: ".plan-price .amount",
        plan_name_css: Some(".plan-name"),
        features_css: None,
    }),
    ("WP Engine", SelectorSet {
        price_css: ".price",
        plan_name_css: Some(".plan-title"),
        features_css: None,
    }),
    ("Liquid Web", SelectorSet {
        price_css: ".price .value",
        plan_name_css: Some("h2.title"),
        features_css: None,
    }),
    ("DigitalOcean", SelectorSet {
        price_css: "#droplet-pricing .price",
        plan_name_css: Some(".pricing-card-title"),
        features_css: None,
    }),
    ("Cloudways", SelectorSet {
        price_css: ".plan-price",
        plan_name_css: Some(".plan-name"),
        features_css: None,
    }),
    // vpn
    ("NordVPN", SelectorSet {
        price_css: ".js-price-value, .Title-module_price__2qKk6",
        plan_name_css: Some(".Title-module_title__3Bw2D"),
        features_css: None,
    }),
    ("ExpressVPN", SelectorSet {
        price_css: ".price-amount",
        plan_name_css: Some(".plan-name"),
        features_css: None,
    }),
    ("Surfshark", SelectorSet {
        price_css: ".c-plan__price",
        plan_name_css: Some(".c-plan__title"),
        features_css: None,
    }),
    ("CyberGhost", SelectorSet {
        price_css: ".price-amount",
        plan_name_css: Some(".plan-title"),
        features_css: None,
    }),
    ("PIA", SelectorSet {
        price_css: ".price-amount",
        plan_name_css: Some(".package-title"),
        features_css: None,
    }),
    ("ProtonVPN", SelectorSet {
        price_css: ".price-monthly",
        plan_name_css: Some(".plan-header"),
        features_css: None,
    }),
    ("Windscribe", SelectorSet {
        price_css: ".pricing-table .price",
        plan_name_css: Some(".plan-header h2"),
        features_css: None,
    }),
    ("IPVanish", SelectorSet {
        price_css: ".price-large",
        plan_name_css: Some(".plan-title"),
        features_css: None,
    }),
    ("PureVPN", SelectorSet {
        price_css: ".amount",
        plan_name_css: Some(".plan-card-title"),
        features_css: None,
    }),
    ("Mullvad", SelectorSet {
        price_css: ".price",
        plan_name_css: Some("h1"),
        features_css: None,
    }),
    ("Ivacy", SelectorSet {
        price_css: ".price-amount",
        plan_name_css: Some(".plan-name"),
        features_css: None,
    }),
    ("Hide.me", SelectorSet {
        price_css: ".pricing-rate",
        plan_name_css: Some(".pricing-title"),
        features_css: None,
    }),
    ("VyprVPN", SelectorSet {
        price_css: ".price-value",
        plan_name_css: Some(".plan-name"),
        features_css: None,
    }),
    ("TunnelBear", SelectorSet {
        price_css: ".cost",
        plan_name_css: Some(".plan-name"),
        features_css: None,
    }),
    ("StrongVPN", SelectorSet {
        price_css: ".price-text",
        plan_name_css: Some(".header h2"),
        features_css: None,
    }),
];

/// Returns the dedicated selector set for a provider, if one is registered.
/// Case-insensitive on the provider name.
#[must_use]
pub fn get_selectors(provider_name: &str) -> Option<&'static SelectorSet> {
    SELECTOR_REGISTRY
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(provider_name))
        .map(|(_, set)| set)
}
