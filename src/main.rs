//! ghlookup - resolve GitHub usernames to profiles
//!
//! Prints the profiles of all users that exist as a JSON array.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ghlookup::config::days;
use ghlookup::{Config, Resolver, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Resolve GitHub usernames through a local cache.
#[derive(Debug, Parser)]
#[command(name = "ghlookup", version, about)]
struct Cli {
    /// Usernames to resolve, in order.
    #[arg(required = true)]
    usernames: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Cache root directory.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Freshness window for cached profiles, in days.
    #[arg(long)]
    max_age_days: Option<u64>,

    /// Freshness window for not-found markers, in days.
    #[arg(long)]
    negative_max_age_days: Option<u64>,

    /// Attempt ceiling per user.
    #[arg(long)]
    max_tries: Option<u32>,

    /// GitHub API root.
    #[arg(long)]
    api_base: Option<String>,
}

impl Cli {
    /// Layer command-line flags over environment configuration.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(dir) = &self.cache_dir {
            config.cache_dir = dir.clone();
        }
        if let Some(n) = self.max_age_days {
            config.max_age = days(n);
        }
        if let Some(n) = self.negative_max_age_days {
            config.negative_max_age = days(n);
        }
        if let Some(n) = self.max_tries {
            config.max_tries = n;
        }
        if let Some(base) = &self.api_base {
            config.api_base = base.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise 0 = warn, 1 = info, 2+ = debug
    let default_level = match cli.verbose {
        0 => "ghlookup=warn",
        1 => "ghlookup=info",
        _ => "ghlookup=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.apply(Config::from_env()?);
    info!(cache_dir = %config.cache_dir.display(), "resolving {} users", cli.usernames.len());

    let resolver = Resolver::from_config(&config)?;
    let profiles = resolver.resolve_all(&cli.usernames).await?;

    println!("{}", serde_json::to_string_pretty(&profiles)?);
    Ok(())
}
