pub mod navigation;
pub mod serialize;
pub mod state;
pub mod status;

pub use navigation::{NavigationKey, SuggestionList};
pub use serialize::{join_symbols, parse_tickers, SYMBOL_SEPARATOR};
pub use state::{
    BulkLoadReport, SelectionChange, SelectionObserver, SelectionSnapshot, SelectionStateMachine,
    StatusReport, SubscriptionId,
};
pub use status::{BandPolicy, SelectionStatus, StatusPolicy};
