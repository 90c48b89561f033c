use clap::{Parser, Subcommand};
use planwatch_core::ProviderCategory;

mod collect;
mod diff;
mod history;

#[derive(Debug, Parser)]
#[command(name = "planwatch-cli")]
#[command(about = "Hosting/VPN plan collection command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect provider data, detect changes, and upsert into the database.
    Collect {
        /// Restrict the run to one category: "hosting" or "vpn".
        #[arg(long, value_parser = parse_category)]
        category: Option<ProviderCategory>,
        /// Restrict the run to a single provider by name (case-insensitive).
        #[arg(long)]
        provider: Option<String>,
        /// Print what would be collected without fetching or persisting.
        #[arg(long)]
        dry_run: bool,
    },
    /// Summarize what is currently stored.
    Report,
}

fn parse_category(value: &str) -> Result<ProviderCategory, String> {
    match value.to_ascii_lowercase().as_str() {
        "hosting" => Ok(ProviderCategory::Hosting),
        "vpn" => Ok(ProviderCategory::Vpn),
        other => Err(format!(
            "unknown category '{other}' (expected 'hosting' or 'vpn')"
        )),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = planwatch_core::load_app_config()?;

    match cli.command {
        Commands::Collect {
            category,
            provider,
            dry_run,
        } => collect::run_collect(&config, category, provider.as_deref(), dry_run).await,
        Commands::Report => collect::run_report(&config).await,
    }
}
