// crates/socsem-cli/src/commands/distances.rs
//
// `socsem distances --base A --other B`: per-token cosine distance.

use clap::Args;
use tabled::Tabled;

use socsem_drift::{measure_distances_with, MissingTokenPolicy};

use super::{comparison_pair, print_rows, Context};

/// Measure per-token distances between two models.
#[derive(Debug, Args)]
pub struct DistancesCmd {
    /// First model; rows follow its rank order.
    #[arg(long)]
    pub base: String,

    /// Second model.
    #[arg(long)]
    pub other: String,

    /// Compare the models as stored, without Procrustes alignment.
    #[arg(long)]
    pub no_align: bool,

    /// Leave out tokens the second model lacks instead of failing.
    #[arg(long)]
    pub skip_missing: bool,
}

#[derive(Tabled)]
struct DistanceDisplay {
    #[tabled(rename = "Lex")]
    lex: String,
    #[tabled(rename = "DistSem")]
    dist_sem: String,
    #[tabled(rename = "Freq 1")]
    freq_1: u64,
    #[tabled(rename = "Freq 2")]
    freq_2: u64,
}

/// Run the distances command.
pub fn run(ctx: &Context, cmd: &DistancesCmd) -> Result<(), Box<dyn std::error::Error>> {
    let (base, other) = comparison_pair(ctx, &cmd.base, &cmd.other, cmd.no_align)?;
    let policy = if cmd.skip_missing {
        MissingTokenPolicy::Skip
    } else {
        MissingTokenPolicy::Propagate
    };

    let rows = measure_distances_with(&base, &other, policy)?;

    print_rows(ctx.format, &rows, |r| DistanceDisplay {
        lex: r.lex.clone(),
        dist_sem: format!("{:.4}", r.dist_sem),
        freq_1: r.freq_1,
        freq_2: r.freq_2,
    });

    Ok(())
}
