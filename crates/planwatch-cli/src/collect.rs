//! Collection and report command handlers for the CLI.
//!
//! Per-provider scrape failures are contained inside the scraper layer and
//! surface here as empty record sets; only configuration, roster, and
//! database errors abort a run.

use chrono::Utc;
use sqlx::PgPool;

use planwatch_core::{AppConfig, Dataset, HostingProvider, ProviderCategory, ProviderRecord, VpnProvider};
use planwatch_db::PoolConfig;
use planwatch_scraper::{build_roster, run_scraper, FetchPolicy, ProviderScraper};

use crate::{diff, history};

/// Collect provider data for the selected roster, write the history
/// snapshot, and upsert everything into the database.
///
/// When `dry_run` is `true` the function prints what would be collected and
/// returns without fetching or touching the database.
///
/// # Errors
///
/// Returns an error if the verified file cannot be loaded, no providers match
/// the filters, or a database step fails. A database failure after the run
/// has started also marks the collection run as failed.
pub(crate) async fn run_collect(
    config: &AppConfig,
    category: Option<ProviderCategory>,
    provider: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let file = planwatch_core::load_verified_file(&config.verified_data_path)?;
    let policy = FetchPolicy::from_config(config);
    let roster = build_roster(
        &file,
        &policy,
        config.scraper_requests_per_second,
        category,
        provider,
    )
    .map_err(|e| anyhow::anyhow!("failed to build scraper roster: {e}"))?;

    if roster.is_empty() {
        anyhow::bail!("no providers matched the given filters");
    }

    if dry_run {
        let names: Vec<String> = roster.iter().map(|s| s.identity().to_string()).collect();
        println!(
            "dry-run: would collect {} providers: [{}]",
            roster.len(),
            names.join(", ")
        );
        return Ok(());
    }

    let total = roster.len();
    let mut records = Vec::new();
    for (i, scraper) in roster.iter().enumerate() {
        tracing::info!(step = i + 1, total, provider = %scraper.identity(), "running scraper");
        records.extend(run_scraper(scraper).await);
    }

    let mut dataset = assemble_dataset(records);

    let previous = history::load_latest_snapshot(&config.history_dir);
    let changes = diff::detect_changes(previous.as_ref(), &dataset);
    for change in &changes {
        println!("{change}");
    }
    dataset.changes_detected.clone_from(&changes);

    let snapshot_path = history::save_snapshot(&config.history_dir, &dataset, Utc::now().date_naive())?;
    tracing::info!(path = %snapshot_path.display(), "history snapshot written");

    let pool =
        planwatch_db::connect_pool(&config.database_url, PoolConfig::from_app_config(config))
            .await?;
    let applied = planwatch_db::run_migrations(&pool).await?;
    if applied > 0 {
        tracing::info!(applied, "applied pending migrations");
    }

    let run = planwatch_db::create_collection_run(&pool, run_type(category), "cli").await?;
    planwatch_db::start_collection_run(&pool, run.id).await?;

    match persist_dataset(&pool, &dataset).await {
        Ok(count) => {
            planwatch_db::complete_collection_run(&pool, run.id, count).await?;
            println!(
                "collected {} records ({} hosting plans, {} vpn providers), {} changes detected",
                dataset.record_count(),
                dataset.hosting.len(),
                dataset.vpn.len(),
                changes.len()
            );
            Ok(())
        }
        Err(e) => {
            planwatch_db::fail_collection_run(&pool, run.id, &e.to_string()).await?;
            Err(e.into())
        }
    }
}

/// Print a summary of what is currently stored.
///
/// # Errors
///
/// Returns an error if the database cannot be reached or a query fails.
pub(crate) async fn run_report(config: &AppConfig) -> anyhow::Result<()> {
    let pool =
        planwatch_db::connect_pool(&config.database_url, PoolConfig::from_app_config(config))
            .await?;

    let hosting = planwatch_db::count_hosting_plans(&pool).await?;
    let vpn = planwatch_db::count_vpn_providers(&pool).await?;
    println!("stored records: {hosting} hosting plans, {vpn} vpn providers");

    for row in planwatch_db::list_hosting_plans(&pool).await? {
        println!(
            "  hosting: {} ({}) {} [{}]",
            row.provider_name,
            row.plan_name,
            row.pricing_monthly
                .map_or_else(|| "n/a".to_string(), |p| format!("${p}/mo")),
            row.last_checked.as_deref().unwrap_or("never checked")
        );
    }
    for row in planwatch_db::list_vpn_providers(&pool).await? {
        println!(
            "  vpn: {} {} [{}]",
            row.provider_name,
            row.pricing_monthly
                .map_or_else(|| "n/a".to_string(), |p| format!("${p}/mo")),
            row.last_checked.as_deref().unwrap_or("never checked")
        );
    }

    let runs = planwatch_db::list_collection_runs(&pool, 5).await?;
    for run in runs {
        println!(
            "run {} [{}] {} — {} records{}",
            run.public_id,
            run.run_type,
            run.status,
            run.records_processed,
            run.error_message
                .map(|e| format!(" ({e})"))
                .unwrap_or_default()
        );
    }

    Ok(())
}

fn run_type(category: Option<ProviderCategory>) -> &'static str {
    match category {
        None => "all",
        Some(ProviderCategory::Hosting) => "hosting",
        Some(ProviderCategory::Vpn) => "vpn",
    }
}

/// Merges raw scraper output into one dataset, deduplicating by the upsert
/// key. The later submission wins, matching the database upsert semantics.
fn assemble_dataset(records: Vec<ProviderRecord>) -> Dataset {
    let mut hosting: Vec<HostingProvider> = Vec::new();
    let mut vpn: Vec<VpnProvider> = Vec::new();

    for record in records {
        match record {
            ProviderRecord::Hosting(h) => {
                if let Some(existing) = hosting.iter_mut().find(|e| e.key() == h.key()) {
                    *existing = h;
                } else {
                    hosting.push(h);
                }
            }
            ProviderRecord::Vpn(v) => {
                if let Some(existing) = vpn.iter_mut().find(|e| e.key() == v.key()) {
                    *existing = v;
                } else {
                    vpn.push(v);
                }
            }
        }
    }

    Dataset {
        collected_at: Some(Utc::now()),
        hosting,
        vpn,
        changes_detected: Vec::new(),
    }
}

async fn persist_dataset(pool: &PgPool, dataset: &Dataset) -> Result<i32, planwatch_db::DbError> {
    let mut count: i32 = 0;
    for record in &dataset.hosting {
        planwatch_db::upsert_hosting_plan(pool, record).await?;
        count = count.saturating_add(1);
    }
    for record in &dataset.vpn {
        planwatch_db::upsert_vpn_provider(pool, record).await?;
        count = count.saturating_add(1);
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planwatch_core::{
        HostingFeatures, HostingPricing, VpnFeatures, VpnPricing,
    };

    fn hosting_record(provider: &str, plan: &str, monthly: Option<f64>) -> ProviderRecord {
        ProviderRecord::Hosting(HostingProvider::from_parts(
            provider,
            plan,
            None,
            HostingPricing {
                pricing_monthly: monthly,
                ..HostingPricing::default()
            },
            HostingFeatures::default(),
        ))
    }

    #[test]
    fn assemble_dedupes_by_key_with_last_write_winning() {
        let records = vec![
            hosting_record("Bluehost", "Basic", Some(4.95)),
            hosting_record("Bluehost", "Choice Plus", Some(5.45)),
            // Same key as the first record, different case; this one wins.
            hosting_record("BLUEHOST", "BASIC", Some(2.95)),
        ];

        let dataset = assemble_dataset(records);
        assert_eq!(dataset.hosting.len(), 2);
        assert_eq!(dataset.hosting[0].pricing_monthly, Some(2.95));
        assert_eq!(dataset.hosting[1].plan_name, "Choice Plus");
        assert!(dataset.collected_at.is_some());
    }

    #[test]
    fn assemble_partitions_by_category() {
        let records = vec![
            hosting_record("Bluehost", "Basic", Some(2.95)),
            ProviderRecord::Vpn(VpnProvider::from_parts(
                "NordVPN",
                None,
                VpnPricing::default(),
                VpnFeatures::default(),
            )),
        ];

        let dataset = assemble_dataset(records);
        assert_eq!(dataset.hosting.len(), 1);
        assert_eq!(dataset.vpn.len(), 1);
        assert_eq!(dataset.record_count(), 2);
    }

    #[test]
    fn run_type_names_follow_the_category_filter() {
        assert_eq!(run_type(None), "all");
        assert_eq!(run_type(Some(ProviderCategory::Hosting)), "hosting");
        assert_eq!(run_type(Some(ProviderCategory::Vpn)), "vpn");
    }
}
