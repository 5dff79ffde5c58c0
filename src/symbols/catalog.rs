// src/symbols/catalog.rs
use crate::error::SelectorError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub symbol: String,
    #[serde(alias = "name")]
    pub display_name: String,
}

impl CatalogEntry {
    pub fn new(symbol: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: display_name.into(),
        }
    }
}

/// Read-only lookup over the known symbols.
///
/// Entries keep the order they were first supplied in; the ranker relies on
/// that order to break score ties. Lookups are keyed by the uppercased symbol.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    entries: Vec<CatalogEntry>,
    by_symbol: HashMap<String, usize>,
}

impl CatalogIndex {
    /// Builds the index. A later entry with the same symbol (case-insensitive)
    /// replaces the earlier one in place.
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut index = Self::default();
        for entry in entries {
            let key = symbol_key(&entry.symbol);
            match index.by_symbol.get(&key) {
                Some(&slot) => {
                    debug!("Catalog entry {} overwritten by later duplicate", key);
                    index.entries[slot] = entry;
                }
                None => {
                    index.by_symbol.insert(key, index.entries.len());
                    index.entries.push(entry);
                }
            }
        }
        index
    }

    pub fn from_json_str(json: &str) -> Result<Self, SelectorError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::build(entries))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SelectorError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let index = Self::from_json_str(&raw)?;
        if index.is_empty() {
            return Err(SelectorError::Catalog(format!(
                "catalog file {} contains no entries",
                path.display()
            )));
        }
        Ok(index)
    }

    pub fn get(&self, symbol: &str) -> Option<&CatalogEntry> {
        self.by_symbol
            .get(&symbol_key(symbol))
            .map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(&symbol_key(symbol))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn symbol_key(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = CatalogIndex::build(vec![CatalogEntry::new("AAPL", "Apple Inc.")]);
        assert_eq!(catalog.get("aapl").map(|e| e.display_name.as_str()), Some("Apple Inc."));
        assert!(catalog.contains(" Aapl "));
        assert!(catalog.get("MSFT").is_none());
    }

    #[test]
    fn later_duplicate_overwrites_in_place() {
        let catalog = CatalogIndex::build(vec![
            CatalogEntry::new("AAPL", "Apple"),
            CatalogEntry::new("MSFT", "Microsoft"),
            CatalogEntry::new("aapl", "Apple Inc."),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("AAPL").unwrap().display_name, "Apple Inc.");
        let order: Vec<_> = catalog.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(order, vec!["Apple Inc.", "Microsoft"]);
    }

    #[test]
    fn loads_entries_from_json() {
        let raw = r#"[
            {"symbol": "SQM-B.SN", "name": "SQM"},
            {"symbol": "MS", "display_name": "Morgan Stanley"}
        ]"#;
        let catalog = CatalogIndex::from_json_str(raw).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("sqm-b.sn").unwrap().display_name, "SQM");
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = CatalogIndex::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, SelectorError::Serialization(_)));
    }
}
