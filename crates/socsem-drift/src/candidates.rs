// crates/socsem-drift/src/candidates.rs
//
// Ranking of semantic-change candidates from a distance table.

use std::cmp::Ordering;

use socsem_core::{round2, Blacklist, ChangeCandidate, DistanceRow};

/// Shortest token (in characters) that can be a candidate, exclusive.
const MIN_TOKEN_CHARS: usize = 3;

/// The `k` most-shifted tokens, most distant first.
///
/// A row qualifies when both frequencies exceed `freq_min`, the token is purely
/// alphabetic and longer than three characters, and the blacklist does not
/// exclude it. `prop_nouns == true` applies only the blacklist's explicit
/// exclusions; `false` also drops proper nouns. Distances are rounded to two
/// decimals; equal distances keep table order.
pub fn get_change_candidates(
    k: usize,
    distances: &[DistanceRow],
    freq_min: u64,
    blacklist: &Blacklist,
    prop_nouns: bool,
) -> Vec<ChangeCandidate> {
    let excluded = blacklist.excluded(prop_nouns);

    let mut kept: Vec<&DistanceRow> = distances
        .iter()
        .filter(|r| r.freq_1 > freq_min && r.freq_2 > freq_min)
        .filter(|r| is_alphabetic(&r.lex))
        .filter(|r| r.lex.chars().count() > MIN_TOKEN_CHARS)
        .filter(|r| !excluded.contains(r.lex.as_str()))
        .filter(|r| !r.dist_sem.is_nan())
        .collect();

    kept.sort_by(|a, b| b.dist_sem.partial_cmp(&a.dist_sem).unwrap_or(Ordering::Equal));

    kept.into_iter()
        .take(k)
        .map(|r| ChangeCandidate {
            lex: r.lex.clone(),
            dist_sem: round2(r.dist_sem),
        })
        .collect()
}

fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use socsem_core::{BlacklistEntry, PROPER_NOUN_CATEGORY};

    fn row(lex: &str, dist_sem: f64, freq_1: u64, freq_2: u64) -> DistanceRow {
        DistanceRow {
            lex: lex.to_string(),
            dist_sem,
            freq_1,
            freq_2,
        }
    }

    fn table() -> Vec<DistanceRow> {
        vec![
            row("vaccine", 0.42, 500, 300),
            row("the", 1.90, 9000, 9000),
            row("covid19", 1.50, 800, 800),
            row("mask", 0.80, 400, 400),
            row("shot", 1.20, 100, 100),
            row("plandemic", 1.10, 150, 40),
            row("lockdown", 0.957, 200, 250),
            row("fauci", 1.30, 300, 300),
            row("agenda", 0.333, 120, 130),
        ]
    }

    #[test]
    fn filters_frequency_shape_and_blacklist() {
        let blacklist = Blacklist::from_words(["the"]);
        let out = get_change_candidates(10, &table(), 100, &blacklist, true);
        let lexes: Vec<&str> = out.iter().map(|c| c.lex.as_str()).collect();
        assert_eq!(lexes, vec!["fauci", "lockdown", "mask", "vaccine", "agenda"]);
        assert_eq!(out[1].dist_sem, 0.96);
        assert_eq!(out[4].dist_sem, 0.33);
    }

    #[test]
    fn blacklisted_token_excluded_regardless_of_rank() {
        let blacklist = Blacklist::from_words(["the"]);
        let out = get_change_candidates(3, &table(), 0, &blacklist, true);
        assert!(out.iter().all(|c| c.lex != "the"));
    }

    #[test]
    fn proper_nouns_dropped_when_flag_false() {
        let blacklist = Blacklist::new(vec![BlacklistEntry {
            lex: "fauci".into(),
            excl: false,
            category: Some(PROPER_NOUN_CATEGORY.into()),
        }]);
        let kept = get_change_candidates(10, &table(), 100, &blacklist, true);
        assert!(kept.iter().any(|c| c.lex == "fauci"));
        let dropped = get_change_candidates(10, &table(), 100, &blacklist, false);
        assert!(dropped.iter().all(|c| c.lex != "fauci"));
    }

    #[test]
    fn never_more_than_k_and_all_rows_qualify() {
        let blacklist = Blacklist::default();
        for k in 0..5 {
            let out = get_change_candidates(k, &table(), 110, &blacklist, true);
            assert!(out.len() <= k);
            for c in &out {
                let source = table().into_iter().find(|r| r.lex == c.lex).unwrap();
                assert!(source.freq_1 > 110 && source.freq_2 > 110);
                assert!(c.lex.chars().all(char::is_alphabetic));
                assert!(c.lex.chars().count() > 3);
            }
        }
    }

    #[test]
    fn sorted_descending() {
        let out = get_change_candidates(10, &table(), 0, &Blacklist::default(), true);
        for pair in out.windows(2) {
            assert!(pair[0].dist_sem >= pair[1].dist_sem);
        }
    }
}
