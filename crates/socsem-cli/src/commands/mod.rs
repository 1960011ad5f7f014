// crates/socsem-cli/src/commands/mod.rs
//
// Command module declarations for the socsem CLI, plus the model loading and
// alignment steps the commands share.

pub mod align;
pub mod axis;
pub mod candidates;
pub mod corpus;
pub mod distances;
pub mod neighbours;

use serde::Serialize;
use tabled::Tabled;

use socsem_core::{AnalysisConfig, EmbeddingModel, SocsemError};
use socsem_drift::procrustes_align;
use socsem_store::ModelStore;

use crate::output::{format_json, format_table, OutputFormat};

/// Settings resolved from the config file and global flags.
#[derive(Debug)]
pub struct Context {
    pub config: AnalysisConfig,
    pub format: OutputFormat,
}

/// Load the named models, failing if any of them is missing.
pub fn load_models(ctx: &Context, names: &[String]) -> Result<Vec<EmbeddingModel>, SocsemError> {
    let mut store = ModelStore::load(ctx.config.models_path(), names)?;
    names
        .iter()
        .map(|name| {
            store.remove(name).ok_or_else(|| {
                SocsemError::MissingResource(format!(
                    "model '{}' in '{}'",
                    name, ctx.config.models_dir
                ))
            })
        })
        .collect()
}

/// Load a base and an other model.
pub fn load_pair(
    ctx: &Context,
    base: &str,
    other: &str,
) -> Result<(EmbeddingModel, EmbeddingModel), SocsemError> {
    if base == other {
        return Err(SocsemError::InvalidInput(format!(
            "cannot compare model '{}' with itself",
            base
        )));
    }
    let mut models = load_models(ctx, &[base.to_string(), other.to_string()])?.into_iter();
    match (models.next(), models.next()) {
        (Some(b), Some(o)) => Ok((b, o)),
        _ => Err(SocsemError::MissingResource(format!("models '{}' and '{}'", base, other))),
    }
}

/// Load a pair and, unless `no_align`, rotate `other` onto `base` and reduce
/// both to their shared vocabulary.
pub fn comparison_pair(
    ctx: &Context,
    base: &str,
    other: &str,
    no_align: bool,
) -> Result<(EmbeddingModel, EmbeddingModel), SocsemError> {
    let (base, other) = load_pair(ctx, base, other)?;
    if no_align {
        return Ok((base, other));
    }
    let aligned = procrustes_align(base, other, None)?.into_aligned_pair()?;
    Ok(aligned.into_parts())
}

/// Print rows as a table or as JSON.
///
/// `rows` are serialized for JSON; `display` maps them to table rows.
pub fn print_rows<R, T, F>(format: OutputFormat, rows: &[R], display: F)
where
    R: Serialize,
    T: Tabled,
    F: Fn(&R) -> T,
{
    match format {
        OutputFormat::Json => println!("{}", format_json(&rows)),
        OutputFormat::Table => {
            let table: Vec<T> = rows.iter().map(display).collect();
            println!("{}", format_table(&table));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socsem_core::TokenRecord;
    use socsem_drift::get_nearest_neighbours_models;
    use socsem_store::save_model;
    use uuid::Uuid;

    fn model(name: &str, entries: &[(&str, u64, [f32; 2])]) -> EmbeddingModel {
        let records = entries
            .iter()
            .map(|(t, c, v)| TokenRecord::new(*t, *c, v.to_vec()))
            .collect();
        EmbeddingModel::new(name, 2, records).unwrap()
    }

    /// Two models on disk; "conspiracy" also knows "plandemic", which sits
    /// right next to "vaccine".
    fn context_with_models() -> (Context, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("socsem_cli_test_{}", Uuid::now_v7()));
        let base = model(
            "Coronavirus",
            &[
                ("vaccine", 500, [1.0, 0.0]),
                ("mask", 400, [0.0, 1.0]),
                ("booster", 300, [0.7, 0.7]),
            ],
        );
        let other = model(
            "conspiracy",
            &[
                ("vaccine", 500, [0.0, 1.0]),
                ("mask", 400, [-1.0, 0.0]),
                ("booster", 300, [-0.7, 0.7]),
                ("plandemic", 900, [0.05, 1.0]),
            ],
        );
        save_model(&dir, &base).unwrap();
        save_model(&dir, &other).unwrap();

        let mut config = AnalysisConfig::default();
        config.models_dir = dir.to_string_lossy().to_string();
        (
            Context {
                config,
                format: OutputFormat::Json,
            },
            dir,
        )
    }

    #[test]
    fn aligned_comparison_pair_shares_one_vocabulary() {
        let (ctx, dir) = context_with_models();
        let (base, other) = comparison_pair(&ctx, "Coronavirus", "conspiracy", false).unwrap();

        let base_tokens: Vec<&str> = base.tokens().collect();
        let other_tokens: Vec<&str> = other.tokens().collect();
        assert_eq!(base_tokens, other_tokens);
        assert!(!other.contains("plandemic"));

        let (_, second) =
            get_nearest_neighbours_models("vaccine", 0, &base, &other, 100, 10).unwrap();
        assert!(second.iter().all(|n| base.contains(&n.word)));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unaligned_pair_keeps_stored_vocabularies() {
        let (ctx, dir) = context_with_models();
        let (base, other) = comparison_pair(&ctx, "Coronavirus", "conspiracy", true).unwrap();
        assert_eq!(base.len(), 3);
        assert!(other.contains("plandemic"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn pair_with_itself_is_invalid() {
        let (ctx, dir) = context_with_models();
        assert!(matches!(
            load_pair(&ctx, "Coronavirus", "Coronavirus"),
            Err(SocsemError::InvalidInput(_))
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
