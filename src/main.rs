//! Pravda-Archive main entry point
//!
//! This is the command-line interface for the archive scraper.

use anyhow::{bail, Context};
use clap::Parser;
use pravda_archive::config::{load_config_with_hash, validate, Config};
use pravda_archive::crawler::crawl;
use pravda_archive::output::{generate_markdown_summary, print_statistics, CrawlStatistics};
use pravda_archive::url::is_http_url;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pravda-Archive: walks the pravda.com.ua news archive page by page
///
/// Starting from an archive page, extracts every article's title, subtitle,
/// date and link, and follows the "next page" link until the archive root
/// is reached.
#[derive(Parser, Debug)]
#[command(name = "pravda-archive")]
#[command(version)]
#[command(about = "Scrapes article listings from the pravda.com.ua archive", long_about = None)]
struct Cli {
    /// First archive page, e.g. https://www.pravda.com.ua/archives/date_10092019/
    #[arg(value_name = "START_URL")]
    start_url: String,

    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Stop once the next-page link equals this URL
    #[arg(long, value_name = "URL")]
    end_url: Option<String>,

    /// Stop after this many pages even if the end URL was not reached
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Write the collected tables to this markdown file
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    if !is_http_url(&cli.start_url) {
        bail!("Start URL must be an absolute HTTP(S) URL: {}", cli.start_url);
    }

    if cli.dry_run {
        handle_dry_run(&cli, &config);
        return Ok(());
    }

    handle_crawl(&cli, &config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pravda_archive=info,warn"),
            1 => EnvFilter::new("pravda_archive=debug,info"),
            2 => EnvFilter::new("pravda_archive=trace,debug"),
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

/// Loads the config file (if any) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(end_url) = &cli.end_url {
        config.site.end_url = end_url.clone();
    }
    if cli.max_pages.is_some() {
        config.crawler.max_pages = cli.max_pages;
    }

    validate(&config).context("Invalid configuration")?;

    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(cli: &Cli, config: &Config) {
    println!("=== Pravda-Archive Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Start URL: {}", cli.start_url);
    println!("  End URL: {}", config.site.end_url);

    println!("\nSelectors:");
    println!("  Next page: {}", config.selectors.next_page);
    println!("  Articles: {}", config.selectors.articles);
    println!("  Time: {}", config.selectors.time);
    println!("  Subtitle: {}", config.selectors.subtitle);

    println!("\nCrawler:");
    println!(
        "  Delay between pages: {}ms - {}ms",
        config.crawler.min_delay_ms, config.crawler.max_delay_ms
    );
    match config.crawler.max_pages {
        Some(limit) => println!("  Max pages: {}", limit),
        None => println!("  Max pages: unlimited"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling from {} until {}",
        cli.start_url,
        config.site.end_url
    );

    let output = match crawl(config, &cli.start_url).await {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if let Some(path) = &cli.summary {
        generate_markdown_summary(&output, path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        tracing::info!("Summary written to {}", path.display());
    }

    if !cli.quiet {
        print_statistics(&CrawlStatistics::from_output(&output));
    }

    Ok(())
}
