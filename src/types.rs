// src/types.rs
use crate::filters::ranker::RankedCandidate;
use crate::selection::state::SelectionSnapshot;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<RankedCandidate>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateQuery {
    pub symbol: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddSymbolRequest {
    pub symbol: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PresetRequest {
    pub preset: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// The serialized selection, e.g. `"AAPL, MSFT, NVDA"`.
    pub tickers: String,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub session_id: Uuid,
    pub selection: SelectionSnapshot,
    pub hidden_value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RejectedSymbol {
    pub symbol: String,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}
