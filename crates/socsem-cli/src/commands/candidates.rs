// crates/socsem-cli/src/commands/candidates.rs
//
// `socsem candidates --base A --other B`: tokens most likely to have shifted
// meaning between two communities.

use clap::{ArgAction, Args};
use tabled::Tabled;

use socsem_core::{Blacklist, SocsemError};
use socsem_drift::{get_change_candidates, measure_distances_with, MissingTokenPolicy};
use socsem_store::load_blacklist;

use super::{comparison_pair, print_rows, Context};

/// Rank semantic-change candidates between two models.
#[derive(Debug, Args)]
pub struct CandidatesCmd {
    /// First model.
    #[arg(long)]
    pub base: String,

    /// Second model.
    #[arg(long)]
    pub other: String,

    /// Number of candidates (default from config).
    #[arg(short = 'k', long)]
    pub k: Option<usize>,

    /// Tokens must occur more often than this in both models (default from config).
    #[arg(long)]
    pub freq_min: Option<u64>,

    /// `true` applies only explicit blacklist exclusions; `false` also drops
    /// proper nouns.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub prop_nouns: bool,

    /// Compare the models as stored, without Procrustes alignment.
    #[arg(long)]
    pub no_align: bool,
}

#[derive(Tabled)]
struct CandidateDisplay {
    #[tabled(rename = "Lex")]
    lex: String,
    #[tabled(rename = "DistSem")]
    dist_sem: String,
}

/// Run the candidates command.
pub fn run(ctx: &Context, cmd: &CandidatesCmd) -> Result<(), Box<dyn std::error::Error>> {
    let k = cmd.k.unwrap_or(ctx.config.candidates_k);
    let freq_min = cmd.freq_min.unwrap_or(ctx.config.freq_min);

    let blacklist = match load_blacklist(&ctx.config.blacklist_file()) {
        Ok(b) => b,
        Err(SocsemError::MissingResource(msg)) => {
            tracing::warn!("No blacklist ({}). Continuing without exclusions.", msg);
            Blacklist::default()
        }
        Err(e) => return Err(e.into()),
    };

    let (base, other) = comparison_pair(ctx, &cmd.base, &cmd.other, cmd.no_align)?;
    // Unaligned models may not share a vocabulary.
    let policy = if cmd.no_align {
        MissingTokenPolicy::Skip
    } else {
        MissingTokenPolicy::Propagate
    };
    let distances = measure_distances_with(&base, &other, policy)?;
    let candidates = get_change_candidates(k, &distances, freq_min, &blacklist, cmd.prop_nouns);

    print_rows(ctx.format, &candidates, |c| CandidateDisplay {
        lex: c.lex.clone(),
        dist_sem: format!("{:.2}", c.dist_sem),
    });

    Ok(())
}
