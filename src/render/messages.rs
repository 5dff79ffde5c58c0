// src/render/messages.rs
use crate::config::SelectionLimits;
use crate::error::{AddError, FormatError, SelectorError, SubmissionError};
use crate::selection::status::SelectionStatus;
use serde::{Deserialize, Serialize};

/// User-facing strings. `{min}`, `{max}` and `{symbol}` are substituted at
/// render time so the bounds are never baked into the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    pub empty_ticker: String,
    pub ticker_length: String,
    pub ticker_format: String,
    pub already_in_list: String,
    pub max_allowed: String,
    pub min_required: String,
    pub min_reached: String,
    pub optimal_diversification: String,
    pub almost_full: String,
    pub max_reached: String,
    pub max_placeholder: String,
    pub input_placeholder: String,
    pub no_results: String,
    pub select_range: String,
    pub remove_ticker: String,
    pub counter_suffix: String,
    pub no_tickers: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

impl Messages {
    pub fn english() -> Self {
        Self {
            empty_ticker: "Ticker cannot be empty".into(),
            ticker_length: "Ticker must be between 1 and 15 characters".into(),
            ticker_format: "Ticker can only contain letters, numbers, periods, hyphens or underscores".into(),
            already_in_list: "{symbol} is already in the list".into(),
            max_allowed: "Maximum {max} tickers allowed".into(),
            min_required: "Minimum {min} tickers required".into(),
            min_reached: "Minimum reached".into(),
            optimal_diversification: "Optimal diversification".into(),
            almost_full: "Almost full".into(),
            max_reached: "Maximum reached".into(),
            max_placeholder: "Maximum of {max} tickers reached".into(),
            input_placeholder: "Type a ticker (e.g. AAPL) and press Enter...".into(),
            no_results: "No results found".into(),
            select_range: "You must select between {min} and {max} tickers.".into(),
            remove_ticker: "Remove".into(),
            counter_suffix: "of {min}-{max} tickers selected".into(),
            no_tickers: "No tickers selected".into(),
        }
    }

    pub fn spanish() -> Self {
        Self {
            empty_ticker: "El ticker no puede estar vacío".into(),
            ticker_length: "El ticker debe tener entre 1 y 15 caracteres".into(),
            ticker_format: "El ticker solo puede contener letras, números, puntos, guiones o guiones bajos".into(),
            already_in_list: "{symbol} ya está en la lista".into(),
            max_allowed: "Máximo {max} tickers permitidos".into(),
            min_required: "Mínimo {min} tickers requeridos".into(),
            min_reached: "Mínimo alcanzado".into(),
            optimal_diversification: "Diversificación óptima".into(),
            almost_full: "Casi lleno".into(),
            max_reached: "Máximo alcanzado".into(),
            max_placeholder: "Máximo de {max} tickers alcanzado".into(),
            input_placeholder: "Escribe un ticker (ej: AAPL) y presiona Enter...".into(),
            no_results: "No se encontraron resultados".into(),
            select_range: "Debes seleccionar entre {min} y {max} tickers.".into(),
            remove_ticker: "Remover".into(),
            counter_suffix: "de {min}-{max} tickers seleccionados".into(),
            no_tickers: "Sin tickers seleccionados".into(),
        }
    }

    /// `"en"` or `"es"`; anything else falls back to English.
    pub fn for_language(lang: &str) -> Self {
        match lang.trim().to_ascii_lowercase().as_str() {
            "es" => Self::spanish(),
            _ => Self::english(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SelectorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn format_error(&self, err: &FormatError) -> String {
        match err {
            FormatError::EmptySymbol => self.empty_ticker.clone(),
            FormatError::LengthOutOfRange => self.ticker_length.clone(),
            FormatError::InvalidCharacters => self.ticker_format.clone(),
        }
    }

    pub fn add_error(&self, err: &AddError, limits: &SelectionLimits) -> String {
        match err {
            AddError::InvalidFormat(reason) => self.format_error(reason),
            AddError::Duplicate(symbol) => self.already_in_list.replace("{symbol}", symbol),
            AddError::CapacityExceeded { .. } => fill(&self.max_allowed, limits),
        }
    }

    pub fn submission_error(&self, err: &SubmissionError, limits: &SelectionLimits) -> String {
        match err {
            SubmissionError::InvalidSymbol { symbol, reason } => {
                format!("{}: {}", symbol, self.format_error(reason))
            }
            SubmissionError::BelowMinimum { .. } | SubmissionError::AboveMaximum { .. } => {
                fill(&self.select_range, limits)
            }
        }
    }

    pub fn status_label(&self, status: SelectionStatus, limits: &SelectionLimits) -> String {
        match status {
            SelectionStatus::BelowMinimum => fill(&self.min_required, limits),
            SelectionStatus::MinimumReached => self.min_reached.clone(),
            SelectionStatus::OptimalRange => self.optimal_diversification.clone(),
            SelectionStatus::NearCapacity => self.almost_full.clone(),
            SelectionStatus::CapacityReached => self.max_reached.clone(),
        }
    }

    pub fn counter(&self, count: usize, limits: &SelectionLimits) -> String {
        format!("{} {}", count, fill(&self.counter_suffix, limits))
    }

    pub fn placeholder(&self, at_capacity: bool, limits: &SelectionLimits) -> String {
        if at_capacity {
            fill(&self.max_placeholder, limits)
        } else {
            self.input_placeholder.clone()
        }
    }
}

fn fill(template: &str, limits: &SelectionLimits) -> String {
    template
        .replace("{min}", &limits.min_selection().to_string())
        .replace("{max}", &limits.max_selection().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_substituted() {
        let limits = SelectionLimits::new(5, 20).unwrap();
        let messages = Messages::english();
        assert_eq!(messages.counter(7, &limits), "7 of 5-20 tickers selected");
        assert_eq!(
            messages.add_error(&AddError::CapacityExceeded { max: 20 }, &limits),
            "Maximum 20 tickers allowed"
        );
        assert_eq!(messages.placeholder(true, &limits), "Maximum of 20 tickers reached");
    }

    #[test]
    fn duplicate_message_names_the_symbol() {
        let messages = Messages::spanish();
        let text =
            messages.add_error(&AddError::Duplicate("AAPL".into()), &SelectionLimits::default());
        assert_eq!(text, "AAPL ya está en la lista");
    }

    #[test]
    fn status_labels_cover_every_bucket() {
        let messages = Messages::english();
        let limits = SelectionLimits::default();
        assert_eq!(
            messages.status_label(SelectionStatus::BelowMinimum, &limits),
            "Minimum 5 tickers required"
        );
        assert_eq!(messages.status_label(SelectionStatus::NearCapacity, &limits), "Almost full");
    }

    #[test]
    fn tables_load_from_json() {
        let json = serde_json::to_string(&Messages::spanish()).unwrap();
        assert_eq!(Messages::from_json_str(&json).unwrap(), Messages::spanish());
        assert!(Messages::from_json_str(r#"{"empty_ticker": "x"}"#).is_err());
    }
}
