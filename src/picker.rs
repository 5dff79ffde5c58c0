// src/picker.rs
use crate::config::SelectorConfig;
use crate::error::{AddError, SelectorError};
use crate::filters::ranker::{RankedCandidate, Ranker};
use crate::selection::navigation::{NavigationKey, SuggestionList};
use crate::selection::state::{BulkLoadReport, SelectionStateMachine};
use crate::symbols::catalog::CatalogIndex;
use crate::symbols::presets::resolve_preset;
use std::sync::Arc;

/// Result of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Highlighted(Option<usize>),
    Added(String),
    Rejected(AddError),
    Dismissed,
    Ignored,
}

/// One search box wired to one selection: pending query, ranked suggestions,
/// keyboard highlight and the state machine they feed.
#[derive(Debug)]
pub struct TickerPicker {
    catalog: Arc<CatalogIndex>,
    selection: SelectionStateMachine,
    suggestions: SuggestionList,
    query: String,
    search_limit: usize,
}

impl TickerPicker {
    pub fn new(catalog: Arc<CatalogIndex>, config: &SelectorConfig) -> Self {
        let selection = SelectionStateMachine::new(config.limits);
        Self::with_selection(catalog, selection, config.search_limit)
    }

    pub fn with_selection(
        catalog: Arc<CatalogIndex>,
        selection: SelectionStateMachine,
        search_limit: usize,
    ) -> Self {
        Self {
            catalog,
            selection,
            suggestions: SuggestionList::default(),
            query: String::new(),
            search_limit,
        }
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionStateMachine {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionStateMachine {
        &mut self.selection
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &SuggestionList {
        &self.suggestions
    }

    /// Updates the pending query and re-ranks.
    pub fn set_query(&mut self, text: &str) -> &[RankedCandidate] {
        self.query = text.to_string();
        let ranked = Ranker::search(&self.query, &self.catalog, self.search_limit);
        self.suggestions.replace(ranked);
        self.suggestions.candidates()
    }

    pub fn press(&mut self, key: NavigationKey) -> KeyOutcome {
        match key {
            NavigationKey::Down => KeyOutcome::Highlighted(self.suggestions.move_next()),
            NavigationKey::Up => KeyOutcome::Highlighted(self.suggestions.move_previous()),
            NavigationKey::Escape => {
                self.suggestions.clear();
                KeyOutcome::Dismissed
            }
            NavigationKey::Enter => {
                let raw = match self.suggestions.highlighted() {
                    Some(candidate) => candidate.symbol.clone(),
                    None if !self.query.trim().is_empty() => self.query.clone(),
                    None => return KeyOutcome::Ignored,
                };
                match self.pick(&raw) {
                    Ok(symbol) => KeyOutcome::Added(symbol),
                    Err(err) => KeyOutcome::Rejected(err),
                }
            }
        }
    }

    /// Adds a symbol chosen from a suggestion, a quick pick or typed raw.
    /// On success the query and suggestions are cleared.
    pub fn pick(&mut self, raw: &str) -> Result<String, AddError> {
        self.selection.add(raw)?;
        self.query.clear();
        self.suggestions.clear();
        // add() only appends, so the new symbol is last
        Ok(self.selection.symbols().last().cloned().unwrap_or_default())
    }

    pub fn remove(&mut self, symbol: &str) -> bool {
        self.selection.remove(symbol)
    }

    /// Whether a quick-pick button for `symbol` should be clickable.
    pub fn quick_pick_enabled(&self, symbol: &str) -> bool {
        !self.selection.is_full() && !self.selection.contains(symbol)
    }

    pub fn load_preset(&mut self, key: &str) -> Result<BulkLoadReport, SelectorError> {
        let preset =
            resolve_preset(key).ok_or_else(|| SelectorError::UnknownPreset(key.to_string()))?;
        self.suggestions.clear();
        Ok(self.selection.bulk_load(preset.symbols.iter()))
    }
}
