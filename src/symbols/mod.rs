pub mod catalog;
pub mod presets;
pub mod stock_symbol;

pub use catalog::{CatalogEntry, CatalogIndex};
pub use presets::{resolve_preset, IndexPreset, POPULAR_QUICK_PICKS, PRESETS};
pub use stock_symbol::default_catalog;
