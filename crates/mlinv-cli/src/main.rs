mod classify;
mod ndjson;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mlinv-cli")]
#[command(about = "Classify scraped marketplace listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify NDJSON listing fragments into cards and print batch stats.
    ///
    /// Filter toggles come from `MLINV_ALLOW_REFURBISHED`,
    /// `MLINV_ALLOW_BUNDLES` and `MLINV_ALLOW_LOCKED`; all three are required.
    Classify {
        /// NDJSON file of fragments, each with a `source_type` field.
        #[arg(long)]
        input: PathBuf,
        /// Where to write card NDJSON. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Recompute batch stats from previously classified card NDJSON.
    Stats {
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MLINV_LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Classify { input, output } => {
            let config = mlinv_core::load_app_config()?;
            classify::run_classify(&config, &input, output.as_deref())
        }
        Commands::Stats { input } => classify::run_stats(&input),
    }
}
