//! Text extraction helpers: pulling prices and counts out of free text.
//!
//! Two tiers live here. The general helpers (`extract_price`,
//! `extract_number`, `clean_text`) serve dedicated-selector extraction where
//! the element text is already known to contain the value. The heuristic
//! sweep (`sniff_lowest_price`) is the fallback of last resort over a whole
//! page and is deliberately false-positive-tolerant: it never errors, it
//! only returns `0.0` when nothing plausible survives.

use std::sync::LazyLock;

use regex::Regex;

/// `$ 2.95`, `$12`, `$9.9` — dollar amounts with an optional 1–2 digit
/// fraction, optional whitespace after the sign.
static DOLLAR_AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s?(\d+\.?\d{0,2})").expect("dollar amount regex"));

/// Leading currency sign is optional: `"12.99"`, `"$12.99/mo"`, `"€9.99"`.
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\$€£]?\s*(\d+\.?\d{0,2})").expect("price regex"));

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("integer regex"));

/// Hosting/VPN prices outside this open band are treated as noise
/// ($0.10 trials, $4500 setup fees) by the heuristic sweep.
const PLAUSIBLE_PRICE_MIN: f64 = 0.5;
const PLAUSIBLE_PRICE_MAX: f64 = 100.0;

/// Extracts the first price-looking number from a short text fragment,
/// e.g. a dedicated selector's element text: `"$ 2.95 /mo"` → `2.95`.
#[must_use]
pub fn extract_price(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    let captures = PRICE_RE.captures(cleaned.trim())?;
    captures.get(1)?.as_str().parse().ok()
}

/// Extracts the first integer from text like `"5400+ servers"` → `5400`.
#[must_use]
pub fn extract_number(text: &str) -> Option<i64> {
    let cleaned = text.replace(',', "");
    let captures = INTEGER_RE.captures(cleaned.trim())?;
    captures.get(1)?.as_str().parse().ok()
}

/// Collapses runs of whitespace and trims — selector text often spans
/// multiple pretty-printed HTML lines.
#[must_use]
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Heuristic price sweep over full page text: every `$X.XX` match inside the
/// plausible band, lowest survivor wins (the "starting at" price is assumed
/// to be the lowest plausible value on the page). Returns `0.0` when nothing
/// survives.
#[must_use]
pub fn sniff_lowest_price(page_text: &str) -> f64 {
    DOLLAR_AMOUNT_RE
        .captures_iter(page_text)
        .filter_map(|c| c.get(1)?.as_str().parse::<f64>().ok())
        .filter(|v| *v > PLAUSIBLE_PRICE_MIN && *v < PLAUSIBLE_PRICE_MAX)
        .fold(0.0_f64, |lowest, v| {
            if lowest == 0.0 || v < lowest {
                v
            } else {
                lowest
            }
        })
}
