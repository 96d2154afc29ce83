//! School-Harvest main entry point
//!
//! This is the command-line interface for the School-Harvest directory crawler.

use anyhow::Context;
use clap::Parser;
use school_harvest::config::{load_config_with_hash, Config};
use school_harvest::output::{print_summary, write_results, HarvestSummary};
use school_harvest::Pipeline;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// School-Harvest: a staged directory crawler
///
/// Walks the listing pages of a school directory, reads every school's
/// detail page, then scans each school's website for links that look like a
/// staff directory. With no arguments it harvests the built-in California
/// listing and writes `all_results.json` and `directory_results.json`.
#[derive(Parser, Debug)]
#[command(name = "school-harvest")]
#[command(version)]
#[command(about = "A staged school directory crawler", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file overriding the built-in defaults
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("school_harvest=info,warn"),
            1 => EnvFilter::new("school_harvest=debug,info"),
            2 => EnvFilter::new("school_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: prints the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== School-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);

    println!("\nSelectors:");
    println!("  Detail link: {}", config.selectors.detail_link);
    println!("  County: {}", config.selectors.region);
    println!("  Name: {}", config.selectors.name);
    println!("  CDS code: {}", config.selectors.code);
    println!("  Website: {}", config.selectors.website);

    println!("\nOutput:");
    println!("  All records: {}", config.output.all_results_path);
    println!("  With directories: {}", config.output.directory_results_path);

    println!("\nListing Pages ({}):", config.listing.urls.len());
    println!("  Origin: {}", config.listing.origin);
    for url in &config.listing.urls {
        println!("  - {}", url);
    }
}

/// Runs the full harvest and writes both result files
async fn handle_harvest(config: &Config) -> anyhow::Result<()> {
    let pipeline = Pipeline::from_config(config).context("Failed to build pipeline")?;

    tracing::info!(
        "Starting harvest of {} listing pages",
        config.listing.urls.len()
    );
    let started_at = chrono::Utc::now();
    let result = pipeline.execute(&config.listing.urls).await;
    let finished_at = chrono::Utc::now();

    write_results(
        &result,
        Path::new(&config.output.all_results_path),
        Path::new(&config.output.directory_results_path),
    )
    .context("Failed to write results")?;

    for record in &result.records_with_links {
        println!("{} ({})", record.name, record.code);
        for link in record.discovered_links() {
            println!("  - {}", link);
        }
    }
    println!();

    print_summary(&HarvestSummary::from_result(&result, started_at, finished_at));

    Ok(())
}
