//! Database operations for `hosting_providers` and `vpn_providers`.
//!
//! Money and percentage fields are stored as fixed-scale `NUMERIC` columns.
//! Scrape-time `f64` values are bound as-is and cast inside the SQL, and read
//! back through `::float8` casts, so the database engine owns the rounding at
//! the persistence boundary.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use planwatch_core::{HostingProvider, VpnProvider};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `hosting_providers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HostingPlanRow {
    pub id: i64,
    pub provider_name: String,
    pub plan_name: String,
    pub website_url: Option<String>,
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
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A row from the `vpn_providers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VpnProviderRow {
    pub id: i64,
    pub provider_name: String,
    pub website_url: Option<String>,
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
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

const HOSTING_SELECT_COLUMNS: &str = "id, provider_name, plan_name, website_url, last_checked, \
     pricing_monthly::float8 AS pricing_monthly, \
     pricing_yearly::float8 AS pricing_yearly, \
     renewal_price::float8 AS renewal_price, \
     setup_fee::float8 AS setup_fee, \
     money_back_days, storage_gb, storage_type, bandwidth, \
     free_ssl, free_domain, ssh_access, backup_included, support_24_7, \
     uptime_percentage::float8 AS uptime_percentage, \
     last_updated, created_at";

const VPN_SELECT_COLUMNS: &str = "id, provider_name, website_url, last_checked, \
     pricing_monthly::float8 AS pricing_monthly, \
     pricing_yearly::float8 AS pricing_yearly, \
     money_back_days, server_count, country_count, simultaneous_connections, \
     avg_speed_mbps::float8 AS avg_speed_mbps, \
     has_kill_switch, logging_policy, jurisdiction, support_24_7, \
     last_updated, created_at";

// ---------------------------------------------------------------------------
// hosting_providers operations
// ---------------------------------------------------------------------------

/// Upserts one hosting plan row.
///
/// Conflicts on `(provider_name, plan_name)` update every data column and
/// `last_updated` in place, so re-running a collection refreshes the row
/// rather than duplicating it.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_hosting_plan(
    pool: &PgPool,
    record: &HostingProvider,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO hosting_providers \
             (provider_name, plan_name, website_url, last_checked, \
              pricing_monthly, pricing_yearly, renewal_price, setup_fee, money_back_days, \
              storage_gb, storage_type, bandwidth, free_ssl, free_domain, \
              ssh_access, backup_included, support_24_7, uptime_percentage, last_updated) \
         VALUES ($1, $2, $3, $4, \
                 $5::numeric(10,2), $6::numeric(10,2), $7::numeric(10,2), $8::numeric(10,2), $9, \
                 $10, $11, $12, $13, $14, \
                 $15, $16, $17, $18::numeric(5,2), $19) \
         ON CONFLICT (provider_name, plan_name) DO UPDATE SET \
             website_url       = EXCLUDED.website_url, \
             last_checked      = EXCLUDED.last_checked, \
             pricing_monthly   = EXCLUDED.pricing_monthly, \
             pricing_yearly    = EXCLUDED.pricing_yearly, \
             renewal_price     = EXCLUDED.renewal_price, \
             setup_fee         = EXCLUDED.setup_fee, \
             money_back_days   = EXCLUDED.money_back_days, \
             storage_gb        = EXCLUDED.storage_gb, \
             storage_type      = EXCLUDED.storage_type, \
             bandwidth         = EXCLUDED.bandwidth, \
             free_ssl          = EXCLUDED.free_ssl, \
             free_domain       = EXCLUDED.free_domain, \
             ssh_access        = EXCLUDED.ssh_access, \
             backup_included   = EXCLUDED.backup_included, \
             support_24_7      = EXCLUDED.support_24_7, \
             uptime_percentage = EXCLUDED.uptime_percentage, \
             last_updated      = EXCLUDED.last_updated \
         RETURNING id",
    )
    .bind(&record.provider_name)
    .bind(&record.plan_name)
    .bind(&record.website_url)
    .bind(&record.last_checked)
    .bind(record.pricing_monthly)
    .bind(record.pricing_yearly)
    .bind(record.renewal_price)
    .bind(record.setup_fee)
    .bind(record.money_back_days)
    .bind(record.storage_gb)
    .bind(&record.storage_type)
    .bind(&record.bandwidth)
    .bind(record.free_ssl)
    .bind(record.free_domain)
    .bind(record.ssh_access)
    .bind(record.backup_included)
    .bind(record.support_24_7)
    .bind(record.uptime_percentage)
    .bind(record.last_updated)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Returns all hosting plan rows, ordered for stable comparison output.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_hosting_plans(pool: &PgPool) -> Result<Vec<HostingPlanRow>, DbError> {
    let sql = format!(
        "SELECT {HOSTING_SELECT_COLUMNS} \
         FROM hosting_providers \
         ORDER BY provider_name, plan_name"
    );
    let rows = sqlx::query_as::<_, HostingPlanRow>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_hosting_plans(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM hosting_providers")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

// ---------------------------------------------------------------------------
// vpn_providers operations
// ---------------------------------------------------------------------------

/// Upserts one VPN provider row.
///
/// Conflicts on `(provider_name)` update every data column and `last_updated`
/// in place.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_vpn_provider(pool: &PgPool, record: &VpnProvider) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO vpn_providers \
             (provider_name, website_url, last_checked, \
              pricing_monthly, pricing_yearly, money_back_days, \
              server_count, country_count, simultaneous_connections, avg_speed_mbps, \
              has_kill_switch, logging_policy, jurisdiction, support_24_7, last_updated) \
         VALUES ($1, $2, $3, \
                 $4::numeric(10,2), $5::numeric(10,2), $6, \
                 $7, $8, $9, $10::numeric(10,2), \
                 $11, $12, $13, $14, $15) \
         ON CONFLICT (provider_name) DO UPDATE SET \
             website_url              = EXCLUDED.website_url, \
             last_checked             = EXCLUDED.last_checked, \
             pricing_monthly          = EXCLUDED.pricing_monthly, \
             pricing_yearly           = EXCLUDED.pricing_yearly, \
             money_back_days          = EXCLUDED.money_back_days, \
             server_count             = EXCLUDED.server_count, \
             country_count            = EXCLUDED.country_count, \
             simultaneous_connections = EXCLUDED.simultaneous_connections, \
             avg_speed_mbps           = EXCLUDED.avg_speed_mbps, \
             has_kill_switch          = EXCLUDED.has_kill_switch, \
             logging_policy           = EXCLUDED.logging_policy, \
             jurisdiction             = EXCLUDED.jurisdiction, \
             support_24_7             = EXCLUDED.support_24_7, \
             last_updated             = EXCLUDED.last_updated \
         RETURNING id",
    )
    .bind(&record.provider_name)
    .bind(&record.website_url)
    .bind(&record.last_checked)
    .bind(record.pricing_monthly)
    .bind(record.pricing_yearly)
    .bind(record.money_back_days)
    .bind(record.server_count)
    .bind(record.country_count)
    .bind(record.simultaneous_connections)
    .bind(record.avg_speed_mbps)
    .bind(record.has_kill_switch)
    .bind(&record.logging_policy)
    .bind(&record.jurisdiction)
    .bind(record.support_24_7)
    .bind(record.last_updated)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Returns all VPN provider rows, ordered by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_vpn_providers(pool: &PgPool) -> Result<Vec<VpnProviderRow>, DbError> {
    let sql = format!(
        "SELECT {VPN_SELECT_COLUMNS} \
         FROM vpn_providers \
         ORDER BY provider_name"
    );
    let rows = sqlx::query_as::<_, VpnProviderRow>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_vpn_providers(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vpn_providers")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
