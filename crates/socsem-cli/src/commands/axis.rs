// crates/socsem-cli/src/commands/axis.rs
//
// `socsem axis --lex w1,w2 --models a,b --poles p1,p2`: similarity of tokens
// to a semantic axis in each community, optionally pivoted per token.

use clap::Args;
use tabled::Tabled;

use socsem_axis::{aggregate_proj_sims, get_axis_sims};
use socsem_core::SocsemError;
use socsem_store::CsvPoleWordSource;

use super::{load_models, print_rows, Context};
use crate::output::{format_json, format_opt, format_records, OutputFormat};

/// Project tokens onto the axis between two pole words.
#[derive(Debug, Args)]
pub struct AxisCmd {
    /// Tokens to project (comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    pub lex: Vec<String>,

    /// Community models (comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    pub models: Vec<String>,

    /// The two pole seed words, positive pole first (comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    pub poles: Vec<String>,

    /// Pole words averaged into each pole (default from config).
    #[arg(short = 'k', long)]
    pub k: Option<usize>,

    /// One row per token with a `SimDiff` column between the reference models.
    #[arg(long)]
    pub aggregate: bool,
}

#[derive(Tabled)]
struct AxisSimDisplay {
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Lex")]
    lex: String,
    #[tabled(rename = "Sim")]
    sim: String,
}

/// Run the axis command.
pub fn run(ctx: &Context, cmd: &AxisCmd) -> Result<(), Box<dyn std::error::Error>> {
    let [pole_1, pole_2] = cmd.poles.as_slice() else {
        return Err(SocsemError::InvalidInput(format!(
            "--poles takes exactly two words, got {}",
            cmd.poles.len()
        ))
        .into());
    };
    let k = cmd.k.unwrap_or(ctx.config.pole_k);

    let models = load_models(ctx, &cmd.models)?;
    let source = CsvPoleWordSource::new(ctx.config.pole_words_path());
    let rows = get_axis_sims(
        cmd.lex.as_slice(),
        models.iter(),
        (pole_1.as_str(), pole_2.as_str()),
        &source,
        k,
    )?;

    if !cmd.aggregate {
        print_rows(ctx.format, &rows, |r| AxisSimDisplay {
            model: r.model.clone(),
            lex: r.lex.clone(),
            sim: format!("{:.3}", r.sim),
        });
        return Ok(());
    }

    let (minuend, subtrahend) = &ctx.config.reference_models;
    let table = aggregate_proj_sims(&rows, (minuend.as_str(), subtrahend.as_str()))?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&table)),
        OutputFormat::Table => {
            let mut header = vec!["Lex".to_string()];
            header.extend(table.models.iter().cloned());
            header.push("SimDiff".to_string());

            let records = table
                .rows
                .iter()
                .map(|row| {
                    let mut record = vec![row.lex.clone()];
                    record.extend(
                        table
                            .models
                            .iter()
                            .map(|m| format_opt(row.sims.get(m).copied().flatten(), 3)),
                    );
                    record.push(format_opt(row.sim_diff, 3));
                    record
                })
                .collect();
            println!("{}", format_records(header, records));
        }
    }

    Ok(())
}
