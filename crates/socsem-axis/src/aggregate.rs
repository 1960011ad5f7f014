// crates/socsem-axis/src/aggregate.rs
//
// Pivot of per-model axis similarities into one row per token, with the
// difference between two reference communities.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use socsem_core::{AxisSimRow, ProjSimRow, ProjSimTable, SocsemError};

/// Pivot `rows` to one row per token and rank by `sim[minuend] - sim[subtrahend]`.
///
/// Model columns are sorted by name and tokens start in lexical order. A token
/// without a score in either reference model gets no `SimDiff` and sorts last.
pub fn aggregate_proj_sims(
    rows: &[AxisSimRow],
    reference: (&str, &str),
) -> Result<ProjSimTable, SocsemError> {
    let (minuend, subtrahend) = reference;

    let mut scores: BTreeMap<&str, BTreeMap<&str, f64>> = BTreeMap::new();
    let mut models: BTreeSet<&str> = BTreeSet::new();

    for row in rows {
        models.insert(row.model.as_str());
        let by_model = scores.entry(row.lex.as_str()).or_default();
        if by_model.insert(row.model.as_str(), row.sim).is_some() {
            return Err(SocsemError::InvalidInput(format!(
                "duplicate similarity for '{}' in model '{}'",
                row.lex, row.model
            )));
        }
    }

    for name in [minuend, subtrahend] {
        if !models.contains(name) {
            return Err(SocsemError::InvalidInput(format!(
                "reference model '{}' has no similarities",
                name
            )));
        }
    }

    let mut table: Vec<ProjSimRow> = scores
        .into_iter()
        .map(|(lex, by_model)| {
            let sim_diff = match (by_model.get(minuend), by_model.get(subtrahend)) {
                (Some(a), Some(b)) => Some(a - b),
                _ => None,
            };
            let sims = models
                .iter()
                .map(|m| (m.to_string(), by_model.get(m).copied()))
                .collect();
            ProjSimRow {
                lex: lex.to_string(),
                sims,
                sim_diff,
            }
        })
        .collect();

    table.sort_by(|a, b| compare_diff_desc(a.sim_diff, b.sim_diff));

    debug!(tokens = table.len(), models = models.len(), "Aggregated axis similarities");
    Ok(ProjSimTable {
        models: models.into_iter().map(str::to_string).collect(),
        rows: table,
    })
}

fn compare_diff_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.filter(|x| !x.is_nan());
    let b = b.filter(|x| !x.is_nan());
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
