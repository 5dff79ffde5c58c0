// src/config.rs
use crate::error::SelectorError;
use crate::filters::ranker::DEFAULT_SEARCH_LIMIT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MIN_SELECTION: usize = 5;
pub const DEFAULT_MAX_SELECTION: usize = 30;
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(3000);

/// Cardinality bounds for a selection. Both positive, `min_selection <= max_selection`.
/// Only constructible through [`SelectionLimits::new`], including when deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLimits")]
pub struct SelectionLimits {
    min_selection: usize,
    max_selection: usize,
}

#[derive(Deserialize)]
struct RawLimits {
    min_selection: usize,
    max_selection: usize,
}

impl TryFrom<RawLimits> for SelectionLimits {
    type Error = SelectorError;

    fn try_from(raw: RawLimits) -> Result<Self, Self::Error> {
        Self::new(raw.min_selection, raw.max_selection)
    }
}

impl SelectionLimits {
    pub fn new(min_selection: usize, max_selection: usize) -> Result<Self, SelectorError> {
        if min_selection == 0 || max_selection == 0 {
            return Err(SelectorError::Config(format!(
                "selection bounds must be positive (min={}, max={})",
                min_selection, max_selection
            )));
        }
        if min_selection > max_selection {
            return Err(SelectorError::Config(format!(
                "min_selection ({}) exceeds max_selection ({})",
                min_selection, max_selection
            )));
        }
        Ok(Self { min_selection, max_selection })
    }

    pub fn min_selection(&self) -> usize {
        self.min_selection
    }

    pub fn max_selection(&self) -> usize {
        self.max_selection
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min_selection..=self.max_selection).contains(&count)
    }
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            min_selection: DEFAULT_MIN_SELECTION,
            max_selection: DEFAULT_MAX_SELECTION,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SelectorConfig {
    pub limits: SelectionLimits,
    pub search_limit: usize,
    /// How long a transient warning stays on screen before the status line comes back.
    pub notice_duration: Duration,
    /// JSON catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            limits: SelectionLimits::default(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            notice_duration: DEFAULT_NOTICE_DURATION,
            catalog_path: None,
        }
    }
}

impl SelectorConfig {
    pub fn new(min_selection: usize, max_selection: usize) -> Result<Self, SelectorError> {
        Ok(Self {
            limits: SelectionLimits::new(min_selection, max_selection)?,
            ..Self::default()
        })
    }

    pub fn from_env() -> Result<Self> {
        let min_selection = env_usize("TICKER_MIN_SELECTION", DEFAULT_MIN_SELECTION)?;
        let max_selection = env_usize("TICKER_MAX_SELECTION", DEFAULT_MAX_SELECTION)?;
        let search_limit = env_usize("TICKER_SEARCH_LIMIT", DEFAULT_SEARCH_LIMIT)?;
        let default_notice_ms = DEFAULT_NOTICE_DURATION.as_millis() as usize;
        let notice_ms = env_usize("TICKER_NOTICE_MS", default_notice_ms)?;

        Ok(Self {
            limits: SelectionLimits::new(min_selection, max_selection)?,
            search_limit,
            notice_duration: Duration::from_millis(notice_ms as u64),
            catalog_path: std::env::var("TICKER_CATALOG_PATH").ok().map(PathBuf::from),
        })
    }
}

fn env_usize(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a non-negative integer, got {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        assert!(matches!(SelectionLimits::new(10, 5), Err(SelectorError::Config(_))));
        assert!(matches!(SelectionLimits::new(0, 5), Err(SelectorError::Config(_))));
        assert!(SelectionLimits::new(5, 5).is_ok());
    }

    #[test]
    fn default_bounds_match_observed_policy() {
        let limits = SelectionLimits::default();
        assert_eq!((limits.min_selection(), limits.max_selection()), (5, 30));
        assert!(!limits.contains(4));
        assert!(limits.contains(5));
        assert!(limits.contains(30));
        assert!(!limits.contains(31));
    }

    #[test]
    fn deserialized_bounds_are_validated() {
        let limits: SelectionLimits =
            serde_json::from_str(r#"{"min_selection":3,"max_selection":8}"#).unwrap();
        assert_eq!(limits, SelectionLimits::new(3, 8).unwrap());
        for raw in [
            r#"{"min_selection":0,"max_selection":8}"#,
            r#"{"min_selection":9,"max_selection":8}"#,
        ] {
            assert!(serde_json::from_str::<SelectionLimits>(raw).is_err(), "{}", raw);
        }
    }
}
