// crates/socsem-cli/src/commands/align.rs
//
// `socsem align --base A --other B`: Procrustes-align B onto A.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use socsem_core::expand_tilde;
use socsem_drift::{linalg::orthogonality_error, procrustes_align};
use socsem_store::save_model;

use super::{load_pair, print_rows, Context};

/// Align one model onto another.
#[derive(Debug, Args)]
pub struct AlignCmd {
    /// Model whose coordinate frame is kept.
    #[arg(long)]
    pub base: String,

    /// Model rotated into the base frame.
    #[arg(long)]
    pub other: String,

    /// Fit the rotation on these words only (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub words: Option<Vec<String>>,

    /// Directory to save the aligned models into.
    #[arg(long)]
    pub out: Option<String>,
}

#[derive(Debug, Serialize)]
struct AlignReport {
    base: String,
    other: String,
    shared_vocabulary: usize,
    base_vocabulary: usize,
    other_vocabulary: usize,
    orthogonality_error: f64,
    saved: Vec<PathBuf>,
}

#[derive(Tabled)]
struct AlignRow {
    #[tabled(rename = "Base")]
    base: String,
    #[tabled(rename = "Other")]
    other: String,
    #[tabled(rename = "Shared")]
    shared: usize,
    #[tabled(rename = "Base vocab")]
    base_vocabulary: usize,
    #[tabled(rename = "Other vocab")]
    other_vocabulary: usize,
    #[tabled(rename = "|RᵀR - I|")]
    orthogonality_error: String,
}

/// Run the align command.
pub fn run(ctx: &Context, cmd: &AlignCmd) -> Result<(), Box<dyn std::error::Error>> {
    let (base, other) = load_pair(ctx, &cmd.base, &cmd.other)?;
    let words: Option<HashSet<String>> = cmd
        .words
        .as_ref()
        .map(|w| w.iter().map(|s| s.trim().to_string()).collect());

    let alignment = procrustes_align(base, other, words.as_ref())?;

    let mut saved = Vec::new();
    if let Some(out) = &cmd.out {
        let dir = PathBuf::from(expand_tilde(out));
        saved.push(save_model(&dir, &alignment.base)?);
        saved.push(save_model(&dir, &alignment.other)?);
        tracing::info!("Saved aligned models to {}", dir.display());
    }

    let report = AlignReport {
        base: alignment.base.name().to_string(),
        other: alignment.other.name().to_string(),
        shared_vocabulary: alignment.shared_vocabulary,
        base_vocabulary: alignment.base.len(),
        other_vocabulary: alignment.other.len(),
        orthogonality_error: orthogonality_error(&alignment.rotation),
        saved,
    };

    print_rows(ctx.format, std::slice::from_ref(&report), |r| AlignRow {
        base: r.base.clone(),
        other: r.other.clone(),
        shared: r.shared_vocabulary,
        base_vocabulary: r.base_vocabulary,
        other_vocabulary: r.other_vocabulary,
        orthogonality_error: format!("{:.2e}", r.orthogonality_error),
    });

    Ok(())
}
