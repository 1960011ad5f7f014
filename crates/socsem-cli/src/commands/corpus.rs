// crates/socsem-cli/src/commands/corpus.rs
//
// `socsem corpus <FILE>`: clean a plain-text file (one document per line) the
// way community corpora are prepared for training, and summarize the result.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use socsem_core::{expand_tilde, AnalysisConfig, SocsemError};

use super::{print_rows, Context};

/// Summarize the corpus a text file would yield.
#[derive(Debug, Args)]
pub struct CorpusCmd {
    /// Text file with one document per line.
    #[arg()]
    pub file: String,

    /// Documents need more tokens than this (default from config).
    #[arg(long)]
    pub min_doc_tokens: Option<usize>,

    /// Vocabulary cut-off passed to trainers (default from the `[training]` section).
    #[arg(long)]
    pub min_count: Option<u64>,
}

#[derive(Debug, Serialize)]
struct CorpusSummary {
    documents_read: usize,
    documents_kept: usize,
    tokens: usize,
    vocabulary: usize,
    min_count: u64,
}

#[derive(Tabled)]
struct CorpusRow {
    #[tabled(rename = "Read")]
    documents_read: usize,
    #[tabled(rename = "Kept")]
    documents_kept: usize,
    #[tabled(rename = "Tokens")]
    tokens: usize,
    #[tabled(rename = "Vocabulary")]
    vocabulary: usize,
    #[tabled(rename = "Min count")]
    min_count: u64,
}

/// Run the corpus command.
pub fn run(ctx: &Context, cmd: &CorpusCmd) -> Result<(), Box<dyn std::error::Error>> {
    let path = expand_tilde(&cmd.file);
    let text = std::fs::read_to_string(&path)
        .map_err(|e| SocsemError::MissingResource(format!("{}: {}", path, e)))?;

    let summary = summarize(&ctx.config, cmd, text.lines().collect());

    print_rows(ctx.format, std::slice::from_ref(&summary), |s| CorpusRow {
        documents_read: s.documents_read,
        documents_kept: s.documents_kept,
        tokens: s.tokens,
        vocabulary: s.vocabulary,
        min_count: s.min_count,
    });

    Ok(())
}

fn summarize(config: &AnalysisConfig, cmd: &CorpusCmd, lines: Vec<&str>) -> CorpusSummary {
    let mut config = config.clone();
    if let Some(n) = cmd.min_doc_tokens {
        config.min_doc_tokens = n;
    }
    let min_count = cmd.min_count.unwrap_or(config.training.min_count);

    let documents_read = lines.len();
    let corpus = config.build_corpus(lines);

    CorpusSummary {
        documents_read,
        documents_kept: corpus.len(),
        tokens: corpus.token_total(),
        vocabulary: corpus.token_counts(min_count).len(),
        min_count,
    }
}
