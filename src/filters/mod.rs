pub mod ranker;
pub mod validator;

pub use ranker::{MatchKind, RankedCandidate, Ranker, DEFAULT_SEARCH_LIMIT};
pub use validator::{FormatValidator, MAX_SYMBOL_LEN, MIN_SYMBOL_LEN};
