// crates/socsem-cli/src/commands/neighbours.rs
//
// `socsem neighbours <LEX> --base A --other B`: nearest neighbours of one
// token in two communities, side by side.

use clap::Args;
use tabled::Tabled;

use socsem_core::Neighbour;
use socsem_drift::get_nearest_neighbours_models;

use super::{comparison_pair, print_rows, Context};

/// Compare the nearest neighbours of a token in two models.
#[derive(Debug, Args)]
pub struct NeighboursCmd {
    /// The token to look up.
    #[arg()]
    pub lex: String,

    /// First model.
    #[arg(long)]
    pub base: String,

    /// Second model.
    #[arg(long)]
    pub other: String,

    /// Neighbours must occur more often than this (default from config).
    #[arg(long)]
    pub freq_min: Option<u64>,

    /// Similar tokens scanned per model before filtering (default from config).
    #[arg(long)]
    pub topn: Option<usize>,

    /// Neighbours reported per model (default from config).
    #[arg(short = 'k', long)]
    pub k: Option<usize>,

    /// Use the models as stored, without Procrustes alignment.
    #[arg(long)]
    pub no_align: bool,
}

#[derive(Tabled)]
struct NeighbourDisplay {
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Word")]
    word: String,
    #[tabled(rename = "SemDist")]
    sem_dist: String,
    #[tabled(rename = "Freq")]
    freq: u64,
}

/// Run the neighbours command.
pub fn run(ctx: &Context, cmd: &NeighboursCmd) -> Result<(), Box<dyn std::error::Error>> {
    let freq_min = cmd.freq_min.unwrap_or(ctx.config.freq_min);
    let topn = cmd.topn.unwrap_or(ctx.config.neighbours_topn);
    let k = cmd.k.unwrap_or(ctx.config.neighbours_k);

    let (base, other) = comparison_pair(ctx, &cmd.base, &cmd.other, cmd.no_align)?;

    let (first, second) = get_nearest_neighbours_models(&cmd.lex, freq_min, &base, &other, topn, k)?;
    let rows: Vec<Neighbour> = first.into_iter().chain(second).collect();

    print_rows(ctx.format, &rows, |n| NeighbourDisplay {
        model: if n.model == 1 { base.name() } else { other.name() }.to_string(),
        word: n.word.clone(),
        sem_dist: format!("{:.2}", n.sem_dist),
        freq: n.freq,
    });

    Ok(())
}
