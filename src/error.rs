// src/error.rs
use serde::Serialize;
use thiserror::Error;

/// Why a raw symbol failed the format check.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatError {
    #[error("Ticker cannot be empty")]
    EmptySymbol,

    #[error("Ticker must be between 1 and 15 characters")]
    LengthOutOfRange,

    #[error("Ticker can only contain letters, numbers, periods, hyphens or underscores")]
    InvalidCharacters,
}

impl FormatError {
    pub fn code(&self) -> &'static str {
        match self {
            FormatError::EmptySymbol => "empty_symbol",
            FormatError::LengthOutOfRange => "length_out_of_range",
            FormatError::InvalidCharacters => "invalid_characters",
        }
    }
}

/// Rejection reasons for a single `add`. The selection is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddError {
    #[error("Invalid ticker: {0}")]
    InvalidFormat(#[from] FormatError),

    #[error("{0} is already in the list")]
    Duplicate(String),

    #[error("Maximum {max} tickers allowed")]
    CapacityExceeded { max: usize },
}

impl AddError {
    pub fn code(&self) -> &'static str {
        match self {
            AddError::InvalidFormat(reason) => reason.code(),
            AddError::Duplicate(_) => "duplicate",
            AddError::CapacityExceeded { .. } => "capacity_exceeded",
        }
    }
}

/// Raised when the selection is handed to the downstream computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Minimum {min} tickers required, got {count}")]
    BelowMinimum { count: usize, min: usize },

    #[error("Maximum {max} tickers allowed, got {count}")]
    AboveMaximum { count: usize, max: usize },

    #[error("Invalid ticker {symbol}: {reason}")]
    InvalidSymbol { symbol: String, reason: FormatError },
}

impl SubmissionError {
    pub fn code(&self) -> &'static str {
        match self {
            SubmissionError::BelowMinimum { .. } => "below_minimum",
            SubmissionError::AboveMaximum { .. } => "above_maximum",
            SubmissionError::InvalidSymbol { reason, .. } => reason.code(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error(transparent)]
    Add(#[from] AddError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
