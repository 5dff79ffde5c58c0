// src/filters/validator.rs
use crate::error::FormatError;
use regex::Regex;
use std::sync::OnceLock;

pub const MIN_SYMBOL_LEN: usize = 1;
pub const MAX_SYMBOL_LEN: usize = 15;

static SYMBOL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Syntax check for ticker symbols. Never looks at the catalog, so free-text
/// symbols are accepted as long as they are well formed.
pub struct FormatValidator;

impl FormatValidator {
    /// Trim and uppercase.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// Returns the normalized symbol, or the first rule it breaks
    /// (empty, then length, then character set).
    pub fn validate(raw: &str) -> Result<String, FormatError> {
        let normalized = Self::normalize(raw);

        if normalized.is_empty() {
            return Err(FormatError::EmptySymbol);
        }

        let len = normalized.chars().count();
        if !(MIN_SYMBOL_LEN..=MAX_SYMBOL_LEN).contains(&len) {
            return Err(FormatError::LengthOutOfRange);
        }

        let symbol_regex = SYMBOL_REGEX.get_or_init(|| {
            Regex::new(r"^[A-Z0-9._-]+$").expect("symbol pattern is a valid regex")
        });
        if !symbol_regex.is_match(&normalized) {
            return Err(FormatError::InvalidCharacters);
        }

        Ok(normalized)
    }

    pub fn is_valid(raw: &str) -> bool {
        Self::validate(raw).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(FormatValidator::validate("  aapl \n"), Ok("AAPL".to_string()));
        assert_eq!(FormatValidator::validate("brk-b"), Ok("BRK-B".to_string()));
        assert_eq!(FormatValidator::validate("sqm-b.sn"), Ok("SQM-B.SN".to_string()));
        assert_eq!(FormatValidator::validate("a_b"), Ok("A_B".to_string()));
    }

    #[test]
    fn empty_after_trim_is_empty_symbol() {
        assert_eq!(FormatValidator::validate(""), Err(FormatError::EmptySymbol));
        assert_eq!(FormatValidator::validate("   \t"), Err(FormatError::EmptySymbol));
    }

    #[test]
    fn length_is_bounded_to_fifteen_characters() {
        assert!(FormatValidator::validate("ABCDEFGHIJKLMNO").is_ok());
        assert_eq!(
            FormatValidator::validate("ABCDEFGHIJKLMNOP"),
            Err(FormatError::LengthOutOfRange)
        );
    }

    #[test]
    fn length_is_checked_before_characters() {
        assert_eq!(
            FormatValidator::validate("!!!!!!!!!!!!!!!!!!!!"),
            Err(FormatError::LengthOutOfRange)
        );
    }

    #[test]
    fn rejects_characters_outside_the_symbol_alphabet() {
        assert_eq!(FormatValidator::validate("BAD!!!"), Err(FormatError::InvalidCharacters));
        assert_eq!(FormatValidator::validate("M&M"), Err(FormatError::InvalidCharacters));
        assert_eq!(FormatValidator::validate("AA PL"), Err(FormatError::InvalidCharacters));
        assert_eq!(FormatValidator::validate("ÑU"), Err(FormatError::InvalidCharacters));
    }
}
