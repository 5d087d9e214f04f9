//! Spinneret main entry point
//!
//! Command-line interface for the bounded concurrent web crawler.

use anyhow::Context;
use clap::Parser;
use spinneret::config::load_settings;
use spinneret::crawler::Spider;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Spinneret: a bounded, concurrent breadth-first web crawler
///
/// Crawls outward from a single seed URL, recording the links discovered on
/// every visited page, until a visit quota is reached or no reachable work
/// remains. Results are written as JSON.
#[derive(Parser, Debug)]
#[command(name = "spinneret")]
#[command(version)]
#[command(about = "A bounded concurrent web crawler", long_about = None)]
struct Cli {
    /// Path to TOML settings file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Write results to this path, overriding save-to-file from the config
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

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

    let mut settings = load_settings(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if let Some(output) = cli.output {
        settings.save_to_file = Some(output);
    }

    // The config's verbose flag picks the default filter; CLI flags win
    setup_logging(cli.verbose, cli.quiet, settings.verbose);

    let spider = Spider::new(settings)?;
    let results = spider.start().await?;
    spider.save_results(&results)?;

    println!("Visited {} pages", results.len());
    if spider.settings().save_to_file.is_none() {
        // No output file configured: print the results instead
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool, config_verbose: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match (verbose, config_verbose) {
            (0, false) => EnvFilter::new("spinneret=warn"),
            (0, true) => EnvFilter::new("spinneret=info,warn"),
            (1, _) => EnvFilter::new("spinneret=debug,info"),
            (2, _) => EnvFilter::new("spinneret=trace,debug"),
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
