// crates/socsem-drift/tests/pipeline.rs
//
// End-to-end tests of the comparison workflow: models saved to and loaded
// from disk, Procrustes-aligned, compared token by token, and ranked as
// change candidates against a blacklist file.

use std::collections::HashSet;
use std::path::PathBuf;

use uuid::Uuid;

use socsem_core::{EmbeddingModel, SocsemError, TokenRecord};
use socsem_drift::{
    get_change_candidates, get_nearest_neighbours_models, linalg::orthogonality_error,
    measure_distances, procrustes_align,
};
use socsem_store::{load_blacklist, save_model, ModelStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a temporary directory path using UUID to avoid conflicts.
fn temp_dir_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("socsem_test_{}_{}", label, Uuid::now_v7()))
}

const BASE: [(&str, u64, [f32; 3]); 7] = [
    ("vaccine", 900, [0.9, 0.1, 0.2]),
    ("mask", 800, [0.1, 0.8, 0.3]),
    ("lockdown", 700, [0.2, 0.3, 0.9]),
    ("science", 600, [0.7, 0.6, 0.1]),
    ("virus", 500, [0.3, 0.2, 0.6]),
    ("fauci", 400, [0.5, 0.1, 0.7]),
    ("agenda", 300, [0.6, 0.5, 0.4]),
];

/// The base space turned a quarter around the third axis: (x, y, z) -> (-y, x, z).
fn quarter_turn(v: [f32; 3]) -> [f32; 3] {
    [-v[1], v[0], v[2]]
}

fn base_model() -> EmbeddingModel {
    let records = BASE
        .iter()
        .map(|(t, c, v)| TokenRecord::new(*t, *c, v.to_vec()))
        .collect();
    EmbeddingModel::new("Coronavirus", 3, records).unwrap()
}

/// Same space rotated, except that "agenda" points the opposite way and
/// "mask" is rare. Also carries a token the base model lacks.
fn other_model() -> EmbeddingModel {
    let mut records: Vec<TokenRecord> = BASE
        .iter()
        .map(|(t, c, v)| {
            let count = if *t == "mask" { 50 } else { *c + 100 };
            let mut rotated = quarter_turn(*v);
            if *t == "agenda" {
                rotated.iter_mut().for_each(|x| *x = -*x);
            }
            TokenRecord::new(*t, count, rotated.to_vec())
        })
        .collect();
    records.push(TokenRecord::new("plandemic", 250, vec![0.2, 0.2, 0.2]));
    EmbeddingModel::new("conspiracy", 3, records).unwrap()
}

/// Write both models and a blacklist into a fresh directory.
fn write_fixture(label: &str) -> PathBuf {
    let dir = temp_dir_path(label);
    save_model(&dir, &base_model()).unwrap();
    save_model(&dir, &other_model()).unwrap();
    std::fs::write(
        dir.join("blacklist_lex.csv"),
        "Lex,Excl,Category\nvirus,True,\nfauci,False,propNoun\n",
    )
    .unwrap();
    dir
}

fn load_both(dir: &PathBuf) -> (EmbeddingModel, EmbeddingModel) {
    let mut store = ModelStore::load(dir, &["Coronavirus", "conspiracy"]).unwrap();
    let base = store.remove("Coronavirus").unwrap();
    let other = store.remove("conspiracy").unwrap();
    (base, other)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn test_store_skips_missing_models() {
    let dir = write_fixture("store");
    let store = ModelStore::load(&dir, &["Coronavirus", "NoNewNormal", "conspiracy"]).unwrap();
    assert_eq!(store.names(), vec!["Coronavirus", "conspiracy"]);
    assert_eq!(store.get("conspiracy").unwrap().len(), 8);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_alignment_recovers_rotation_from_disk() {
    let dir = write_fixture("align");
    let (base, other) = load_both(&dir);

    let alignment = procrustes_align(base, other, None).unwrap();
    assert_eq!(alignment.shared_vocabulary, 7);
    assert_eq!(alignment.base.len(), 7);
    assert_eq!(alignment.other.len(), 8);
    assert!(orthogonality_error(&alignment.rotation) < 1e-9);

    // The other model's own token is rotated too.
    let plandemic = alignment.other.vector("plandemic").unwrap();
    for (got, want) in plandemic.iter().zip([0.2f32, -0.2, 0.2]) {
        assert!((got - want).abs() < 1e-5, "{:?}", plandemic);
    }

    // Aligning the saved result again changes nothing.
    let saved = temp_dir_path("align_saved");
    save_model(&saved, &alignment.base).unwrap();
    save_model(&saved, &alignment.other).unwrap();
    let (base, other) = load_both(&saved);
    let again = procrustes_align(base, other, None).unwrap();
    for i in 0..3 {
        for j in 0..3 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((again.rotation[[i, j]] - expected).abs() < 1e-5);
        }
    }

    let _ = std::fs::remove_dir_all(&dir);
    let _ = std::fs::remove_dir_all(&saved);
}

#[test]
fn test_distances_and_candidates_after_alignment() {
    let dir = write_fixture("candidates");
    let (base, other) = load_both(&dir);

    let pair = procrustes_align(base, other, None).unwrap().into_aligned_pair().unwrap();
    assert_eq!(pair.len(), 7);
    assert!(pair.tokens().all(|t| t != "plandemic"));

    let rows = measure_distances(pair.base(), pair.other()).unwrap();
    assert_eq!(rows.len(), 7);
    for row in &rows {
        if row.lex == "agenda" {
            assert!(row.dist_sem > 1.99, "{:?}", row);
        } else {
            assert!(row.dist_sem < 1e-5, "{:?}", row);
        }
    }

    let blacklist = load_blacklist(&dir.join("blacklist_lex.csv")).unwrap();

    let candidates = get_change_candidates(10, &rows, 100, &blacklist, true);
    let lexes: HashSet<&str> = candidates.iter().map(|c| c.lex.as_str()).collect();
    assert_eq!(candidates[0].lex, "agenda");
    assert_eq!(candidates[0].dist_sem, 2.0);
    assert_eq!(
        lexes,
        HashSet::from(["agenda", "vaccine", "lockdown", "science", "fauci"])
    );

    let without_names = get_change_candidates(10, &rows, 100, &blacklist, false);
    assert_eq!(without_names.len(), 4);
    assert!(without_names.iter().all(|c| c.lex != "fauci"));

    let top = get_change_candidates(1, &rows, 100, &blacklist, true);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].lex, "agenda");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_neighbours_in_aligned_models() {
    let dir = write_fixture("neighbours");
    let (base, other) = load_both(&dir);
    let alignment = procrustes_align(base, other, None).unwrap();

    let (first, second) =
        get_nearest_neighbours_models("vaccine", 100, &alignment.base, &alignment.other, 100, 3)
            .unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 3);
    assert!(second.iter().all(|n| n.word != "mask"));
    for pair in first.windows(2) {
        assert!(pair[0].sem_dist <= pair[1].sem_dist);
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_disjoint_models_cannot_be_aligned() {
    let base = base_model();
    let other = EmbeddingModel::new(
        "NoNewNormal",
        3,
        vec![TokenRecord::new("sheeple", 300, vec![1.0, 0.0, 0.0])],
    )
    .unwrap();
    assert!(matches!(
        procrustes_align(base, other, None),
        Err(SocsemError::DegenerateAlignment(_))
    ));
}
