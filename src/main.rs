//! # Course TA CLI (`ta`)
//!
//! ## Usage
//!
//! ```bash
//! ta --config ./config/ta.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ta ask "<question>"` | Answer a question from the loaded corpus |
//! | `ta stats` | Show corpus counts and data file locations |
//! | `ta serve` | Start the HTTP API |
//!
//! Logs go to stderr. `RUST_LOG` overrides the default filter and
//! `LOG_FORMAT=json` switches to structured JSON output.

use anyhow::Result;
use clap::{Parser, Subcommand};
use course_ta::{ask, config, server, stats};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Course TA — answers course questions from scraped forum threads and
/// course pages.
#[derive(Parser)]
#[command(
    name = "ta",
    about = "Course TA — answers course questions from scraped forum threads and course pages",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/ta.toml`. When the file does not exist,
    /// built-in defaults are used.
    #[arg(long, global = true, default_value = "./config/ta.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question.
    ///
    /// Curated answers take precedence; otherwise the best-matching forum
    /// threads and course pages are quoted and linked.
    Ask {
        /// The question text.
        question: String,

        /// Print the answer as JSON (`{"answer", "links"}`).
        #[arg(long)]
        json: bool,

        /// Also show which path produced the answer and the ranked documents.
        #[arg(long)]
        explain: bool,
    },

    /// Show corpus statistics.
    Stats,

    /// Start the HTTP API.
    ///
    /// Binds to `[server].bind` and serves `POST /api/`.
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve => "info,course_ta=debug",
        _ => "warn",
    };
    init_tracing(default_filter)?;

    let cfg = config::load_or_minimal(&cli.config)?;

    match cli.command {
        Commands::Ask {
            question,
            json,
            explain,
        } => {
            ask::run_ask(&cfg, &question, json, explain)?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}

fn init_tracing(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}
