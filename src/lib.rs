// src/lib.rs
pub mod config;
pub mod error;
pub mod filters;
pub mod picker;
pub mod render;
pub mod selection;
pub mod server;
pub mod symbols;
pub mod types;

pub use config::{SelectionLimits, SelectorConfig};
pub use error::{AddError, FormatError, SelectorError, SubmissionError};
pub use filters::{FormatValidator, RankedCandidate, Ranker};
pub use picker::{KeyOutcome, TickerPicker};
pub use render::{Messages, RenderAdapter, SelectionView};
pub use selection::{
    NavigationKey, SelectionChange, SelectionSnapshot, SelectionStateMachine, SelectionStatus,
};
pub use server::{configure, AppState};
pub use symbols::{default_catalog, CatalogEntry, CatalogIndex};

use std::sync::Arc;

/// Loads the catalog named by `config.catalog_path`, or the built-in one.
pub fn load_catalog(config: &SelectorConfig) -> Result<Arc<CatalogIndex>, SelectorError> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = CatalogIndex::from_path(path)?;
            log::info!("Loaded {} catalog entries from {}", catalog.len(), path.display());
            Ok(Arc::new(catalog))
        }
        None => Ok(Arc::new(default_catalog().clone())),
    }
}
