// src/filters/ranker.rs
use crate::symbols::catalog::{CatalogEntry, CatalogIndex};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEARCH_LIMIT: usize = 8;

/// How a catalog entry matched the query, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    ExactSymbol,
    SymbolPrefix,
    SymbolContains,
    NamePrefix,
    NameWordPrefix,
    NameContains,
}

impl MatchKind {
    pub const fn score(self) -> u32 {
        match self {
            MatchKind::ExactSymbol => 1000,
            MatchKind::SymbolPrefix => 900,
            MatchKind::SymbolContains => 700,
            MatchKind::NamePrefix => 600,
            MatchKind::NameWordPrefix => 500,
            MatchKind::NameContains => 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub symbol: String,
    pub display_name: String,
    pub score: u32,
}

pub struct Ranker;

impl Ranker {
    /// Scores every catalog entry against `query` and returns the best `limit`
    /// matches. Equal scores keep catalog order.
    pub fn search(query: &str, catalog: &CatalogIndex, limit: usize) -> Vec<RankedCandidate> {
        let needle = query.trim().to_uppercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<RankedCandidate> = catalog
            .iter()
            .filter_map(|entry| {
                Self::classify(entry, &needle).map(|kind| RankedCandidate {
                    symbol: entry.symbol.clone(),
                    display_name: entry.display_name.clone(),
                    score: kind.score(),
                })
            })
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(limit);
        ranked
    }

    /// `needle` must already be trimmed and uppercased.
    pub fn classify(entry: &CatalogEntry, needle: &str) -> Option<MatchKind> {
        let symbol = entry.symbol.to_uppercase();
        if symbol == needle {
            return Some(MatchKind::ExactSymbol);
        }
        if symbol.starts_with(needle) {
            return Some(MatchKind::SymbolPrefix);
        }
        if symbol.contains(needle) {
            return Some(MatchKind::SymbolContains);
        }

        let name = entry.display_name.to_uppercase();
        if name.starts_with(needle) {
            return Some(MatchKind::NamePrefix);
        }
        if name.split_whitespace().any(|word| word.starts_with(needle)) {
            return Some(MatchKind::NameWordPrefix);
        }
        if name.contains(needle) {
            return Some(MatchKind::NameContains);
        }
        None
    }
}
