// src/selection/serialize.rs
use std::collections::HashSet;

pub const SYMBOL_SEPARATOR: &str = ", ";

/// The hidden form value: symbols in insertion order joined by `", "`.
pub fn join_symbols<S: AsRef<str>>(symbols: &[S]) -> String {
    symbols
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(SYMBOL_SEPARATOR)
}

/// Splits free text on commas, semicolons, tabs, newlines and spaces,
/// uppercases each piece and drops empties and repeats (first one wins).
///
/// No format validation happens here; callers that need it run each symbol
/// through the validator.
pub fn parse_tickers(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .map(|piece| piece.trim().to_uppercase())
        .filter(|symbol| !symbol.is_empty())
        .filter(|symbol| seen.insert(symbol.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_comma_space() {
        assert_eq!(join_symbols(&["AAPL", "MSFT", "BRK-B"]), "AAPL, MSFT, BRK-B");
        assert_eq!(join_symbols::<&str>(&[]), "");
    }

    #[test]
    fn parses_mixed_separators() {
        assert_eq!(
            parse_tickers("aapl, msft;nvda\ttsla\n  jpm  "),
            vec!["AAPL", "MSFT", "NVDA", "TSLA", "JPM"]
        );
    }

    #[test]
    fn parse_drops_repeats_keeping_first_position() {
        assert_eq!(parse_tickers("MSFT aapl msft AAPL ko"), vec!["MSFT", "AAPL", "KO"]);
    }

    #[test]
    fn join_then_parse_round_trips() {
        let symbols = vec!["SQM-B.SN".to_string(), "AAPL".to_string(), "BRK-B".to_string()];
        assert_eq!(parse_tickers(&join_symbols(&symbols)), symbols);
    }
}
