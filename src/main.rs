//! Jobscrape main entry point
//!
//! This is the command-line interface for the Jobscrape job listing scraper.

use clap::Parser;
use jobscrape::config::{load_config, Config};
use jobscrape::crawler::run_scrape;
use jobscrape::output::print_summary;
use jobscrape::ScrapeError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Jobscrape: a polite job listing scraper
///
/// Jobscrape fetches a job listing page, visits every job's detail page
/// with a randomized pause between requests, and saves the collected jobs
/// to a spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "jobscrape")]
#[command(version = "1.0.0")]
#[command(about = "A polite job listing scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Spreadsheet to write (overrides output.path)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Listing page to scrape (overrides site.listing-url)
    #[arg(long, value_name = "URL")]
    listing_url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_scrape(config).await?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("jobscrape=info,warn"),
            1 => EnvFilter::new("jobscrape=debug,info"),
            2 => EnvFilter::new("jobscrape=trace,debug"),
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

/// Loads the config file (or defaults) and applies CLI overrides
fn resolve_config(cli: &Cli) -> Result<Config, jobscrape::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output.path = output.to_string_lossy().into_owned();
    }

    if let Some(listing_url) = &cli.listing_url {
        config.site.listing_url = listing_url.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== Jobscrape Dry Run ===\n");

    println!("Site:");
    println!("  Listing URL: {}", config.site.listing_url);
    println!(
        "  Base URL: {}",
        config
            .site
            .base_url
            .as_deref()
            .unwrap_or("(listing URL origin)")
    );

    println!("\nFetcher:");
    println!("  User agents: {}", config.fetcher.user_agents.len());
    println!("  Accept: {}", config.fetcher.accept);
    println!("  Accept-Encoding: {}", config.fetcher.accept_encoding);
    println!("  Accept-Language: {}", config.fetcher.accept_language);
    println!(
        "  Timeouts: {}s total, {}s connect",
        config.fetcher.timeout_secs, config.fetcher.connect_timeout_secs
    );

    println!("\nPoliteness:");
    println!(
        "  Delay between detail pages: {}ms to {}ms",
        config.politeness.min_delay_ms, config.politeness.max_delay_ms
    );

    println!("\nOutput:");
    println!("  File: {}", config.output.path);
    println!("  Sheet: {}", config.output.sheet_name);

    println!("\nSelectors:");
    for (key, selector) in config.selectors.entries() {
        println!("  {}: {}", key, selector);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config) -> Result<(), ScrapeError> {
    let output_path = config.output.path.clone();

    match run_scrape(config).await {
        Ok(report) => {
            tracing::info!("Scrape completed successfully");
            print_summary(&report);
            Ok(())
        }
        Err(ScrapeError::Export(e)) => {
            tracing::error!("An error occurred while saving the Excel file: {}", e);
            tracing::error!(
                "Please make sure the file '{}' is not open in another program and try again.",
                output_path
            );
            Err(ScrapeError::Export(e))
        }
        Err(e) => {
            tracing::error!("Scrape aborted: {}", e);
            Err(e)
        }
    }
}
