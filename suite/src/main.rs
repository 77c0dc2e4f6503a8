//! Bookstore contract suite.
//!
//! # Usage
//!
//! ```bash
//! # Against the public deployment (BOOKSTORE_BASE_URL or https://demoqa.com)
//! cargo run -p bookstore-suite
//!
//! # Against an in-process mock, deleting the created user afterwards
//! cargo run -p bookstore-suite -- --mock --cleanup
//! ```
//!
//! Exits 0 when every step passes, exits 1 when any fail.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bookstore_core::BookStore;
use bookstore_suite::{resolve, Options, Overrides, Reporter, Scenario};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Run the Bookstore account and book scenario")]
struct Args {
    /// Base URL of the service; overrides BOOKSTORE_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// JSON file with the fixture users; overrides BOOKSTORE_FIXTURES
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Start the mock service on an ephemeral port and run against it
    #[arg(long, conflicts_with = "base_url")]
    mock: bool,

    /// Delete the created user once the scenario finishes
    #[arg(long)]
    cleanup: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let listener = if args.mock {
        Some(TcpListener::bind("127.0.0.1:0").await?)
    } else {
        None
    };
    let mock_url = match &listener {
        Some(listener) => Some(format!("http://{}", listener.local_addr()?)),
        None => None,
    };
    let overrides = Overrides {
        base_url: mock_url.as_deref().or(args.base_url.as_deref()),
        fixtures: args.fixtures.as_deref(),
    };
    let config =
        resolve(overrides, |key| std::env::var(key).ok()).context("loading configuration")?;

    if let Some(listener) = listener {
        info!(addr = %config.base_url, "mock service started");
        tokio::spawn(bookstore_mock::run(listener));
    }

    println!("Running scenario against {}", config.base_url);
    println!();

    let store = BookStore::new(&config);
    let mut reporter = Reporter::new();
    Scenario::new(&store, &config.users, Options { cleanup: args.cleanup })
        .run(&mut reporter)
        .await;

    reporter.print_summary();

    if reporter.all_passed() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
