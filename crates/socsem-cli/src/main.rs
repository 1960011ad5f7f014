// crates/socsem-cli/src/main.rs
//
// CLI entrypoint for socsem, semantic-change analysis over community
// embedding models.
//
// Provides subcommands for aligning two models, measuring per-token distances,
// ranking change candidates, comparing nearest neighbours, projecting
// tokens onto semantic axes, and summarizing training corpora.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use commands::align::AlignCmd;
use commands::axis::AxisCmd;
use commands::candidates::CandidatesCmd;
use commands::corpus::CorpusCmd;
use commands::distances::DistancesCmd;
use commands::neighbours::NeighboursCmd;
use commands::Context;
use output::OutputFormat;

use socsem_core::AnalysisConfig;

/// socsem: compare word meaning across community embedding models.
#[derive(Parser, Debug)]
#[command(
    name = "socsem",
    version = "0.1.0",
    about = "Semantic-change analysis across community embedding models"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "socsem.toml")]
    config: String,

    /// Directory holding `{name}.model` files (overrides the config file).
    #[arg(long, global = true)]
    models_dir: Option<String>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Procrustes-align one model onto another.
    Align(AlignCmd),

    /// Cosine distance of every shared token between two models.
    Distances(DistancesCmd),

    /// Tokens whose meaning differs most between two models.
    Candidates(CandidatesCmd),

    /// Nearest neighbours of a token in two models.
    Neighbours(NeighboursCmd),

    /// Similarity of tokens to a semantic axis across models.
    Axis(AxisCmd),

    /// Clean a text file into a training corpus and summarize it.
    Corpus(CorpusCmd),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The log level fallback comes from the config file, so load it first and
    // report a failure once tracing is up.
    let loaded = AnalysisConfig::load(&cli.config);
    let log_level = match &loaded {
        Ok(cfg) => cfg.log_level.clone(),
        Err(_) => AnalysisConfig::default().log_level,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match loaded {
        Ok(cfg) => {
            tracing::debug!("Loaded configuration from {}", cli.config);
            cfg
        }
        Err(e) => {
            tracing::warn!("Could not load config from {}: {}. Using defaults.", cli.config, e);
            AnalysisConfig::default()
        }
    };

    // CLI --models-dir flag overrides the config file value.
    if let Some(dir) = &cli.models_dir {
        config.models_dir = dir.clone();
    }

    let ctx = Context {
        config,
        format: cli.format,
    };

    match &cli.command {
        Commands::Align(cmd) => commands::align::run(&ctx, cmd)?,
        Commands::Distances(cmd) => commands::distances::run(&ctx, cmd)?,
        Commands::Candidates(cmd) => commands::candidates::run(&ctx, cmd)?,
        Commands::Neighbours(cmd) => commands::neighbours::run(&ctx, cmd)?,
        Commands::Axis(cmd) => commands::axis::run(&ctx, cmd)?,
        Commands::Corpus(cmd) => commands::corpus::run(&ctx, cmd)?,
    }

    Ok(())
}
