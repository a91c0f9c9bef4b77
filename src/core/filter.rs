//! Fuzzy filtering of the workspace catalog.
//!
//! Uses the skim matcher from the fuzzy_matcher crate, run in-process over the already
//! loaded catalog. Matching is case-insensitive and runs against the full directory name, date prefix included.

use crate::core::WorkspaceEntry;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Catalog filter. Cheap to construct, pure and safe to call on every keystroke.
pub struct Filter {
    matcher: SkimMatcherV2,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }
}

impl Filter {
    /// Score a single name against the query. None means no match.
    pub fn score(&self, name: &str, query: &str) -> Option<i64> {
        self.matcher.fuzzy_match(name, query)
    }

    /// Returns the entries matching `query`, best match first.
    ///
    /// An empty query returns the catalog unchanged (recency order). Entries with equal
    /// scores keep their catalog order.
    pub fn apply(&self, query: &str, entries: &[WorkspaceEntry]) -> Vec<WorkspaceEntry> {
        if query.is_empty() {
            return entries.to_vec();
        }

        let mut scored: Vec<(i64, &WorkspaceEntry)> = entries
            .iter()
            .filter_map(|e| self.score(e.name(), query).map(|s| (s, e)))
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, e)| e.clone()).collect()
    }
}

/// Convenience wrapper over [Filter::apply] with a default matcher.
pub fn filter_entries(query: &str, entries: &[WorkspaceEntry]) -> Vec<WorkspaceEntry> {
    Filter::default().apply(query, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    fn catalog(names: &[&str]) -> Vec<WorkspaceEntry> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| {
                WorkspaceEntry::new(
                    *n,
                    PathBuf::from("/w").join(n),
                    SystemTime::UNIX_EPOCH + Duration::from_secs(1000 - i as u64),
                )
            })
            .collect()
    }

    fn is_subsequence(needle: &str, hay: &str) -> bool {
        let hay = hay.to_lowercase();
        let mut it = hay.chars();
        needle
            .to_lowercase()
            .chars()
            .all(|c| it.by_ref().any(|h| h == c))
    }

    #[test]
    fn empty_query_is_identity() {
        let entries = catalog(&["2024-05-01-b", "2024-04-01-a", "zeta"]);
        assert_eq!(filter_entries("", &entries), entries);
    }

    #[test]
    fn non_matches_are_dropped() {
        let entries = catalog(&["2024-05-01-rust-tui", "2024-04-01-go-web", "notes"]);
        let out = filter_entries("rst", &entries);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name(), "2024-05-01-rust-tui");
    }

    #[test]
    fn matches_are_case_insensitive() {
        let entries = catalog(&["2024-05-01-Parser", "2024-04-01-lexer"]);
        let out = filter_entries("PARS", &entries);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label(), "Parser");
    }

    #[test]
    fn date_prefix_is_searchable() {
        let entries = catalog(&["2024-05-01-a", "2023-01-09-b"]);
        let out = filter_entries("2023", &entries);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name(), "2023-01-09-b");
    }

    #[test]
    fn results_are_subsequences_ordered_by_score() {
        let mut names = vec![
            "2024-05-01-api",
            "2024-05-02-apple-pie",
            "2024-05-03-a-p-i",
            "2024-05-04-graph",
            "2024-05-05-map-index",
            "capital",
            "nothing",
        ];
        names.shuffle(&mut rand::rng());
        let entries = catalog(&names);

        let filter = Filter::default();
        for query in ["api", "ap", "x", "pi", "2024api"] {
            let out = filter.apply(query, &entries);
            let scores: Vec<i64> = out
                .iter()
                .map(|e| {
                    assert!(is_subsequence(query, e.name()), "{query} vs {}", e.name());
                    filter.score(e.name(), query).unwrap_or(i64::MIN)
                })
                .collect();
            assert!(
                scores.windows(2).all(|w| w[0] >= w[1]),
                "scores not descending for {query}: {scores:?}"
            );
        }
    }
}
