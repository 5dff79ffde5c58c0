// src/server.rs
use crate::config::SelectorConfig;
use crate::error::SubmissionError;
use crate::filters::ranker::Ranker;
use crate::filters::validator::FormatValidator;
use crate::render::messages::Messages;
use crate::selection::serialize::parse_tickers;
use crate::selection::state::{
    SelectionChange, SelectionObserver, SelectionSnapshot, SelectionStateMachine,
};
use crate::symbols::catalog::CatalogIndex;
use crate::symbols::presets::{resolve_preset, PRESETS};
use crate::types::{
    AddSymbolRequest, ApiError, PresetRequest, RejectedSymbol, SearchQuery, SearchResponse,
    SelectionResponse, SubmitRequest, ValidateQuery,
};
use actix_web::http::Method;
use actix_web::{web, Either, HttpRequest, HttpResponse, Resource, Result};
use actix_web_lab::sse::{Data, Event, Sse};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio_stream::wrappers::ReceiverStream;
use uuid::Uuid;

pub const MAX_SEARCH_LIMIT: usize = 50;
const EVENT_BUFFER: usize = 32;

pub type EventStream = Sse<ReceiverStream<Result<Event, Infallible>>>;

#[derive(Debug)]
pub struct AppState {
    pub config: SelectorConfig,
    pub catalog: Arc<CatalogIndex>,
    pub messages: Messages,
    pub sessions: Arc<RwLock<HashMap<Uuid, SelectionStateMachine>>>,
    /// Identifies this server process in `/health`.
    pub instance_id: Uuid,
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: SelectorConfig, catalog: Arc<CatalogIndex>, messages: Messages) -> Self {
        Self {
            config,
            catalog,
            messages,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            instance_id: Uuid::new_v4(),
            start_time: Utc::now(),
        }
    }
}

/// Registers every route on an actix `App`. Pair it with
/// `App::default_service(web::to(not_found_handler))` so unknown paths get a 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(resource("/health").route(web::get().to(health_check)))
        .service(resource("/search").route(web::get().to(search_tickers)))
        .service(resource("/validate").route(web::get().to(validate_symbol)))
        .service(resource("/presets").route(web::get().to(list_presets)))
        .service(resource("/submit").route(web::post().to(submit_selection)))
        .service(resource("/selections").route(web::post().to(create_selection)))
        .service(
            resource("/selections/{id}")
                .route(web::get().to(get_selection))
                .route(web::delete().to(close_selection)),
        )
        .service(resource("/selections/{id}/symbols").route(web::post().to(add_symbol)))
        .service(
            resource("/selections/{id}/symbols/{symbol}").route(web::delete().to(remove_symbol)),
        )
        .service(resource("/selections/{id}/preset").route(web::post().to(load_preset)))
        .service(resource("/selections/{id}/events").route(web::get().to(selection_events)));
}

/// A known path hit with a method it does not serve answers 405, except CORS preflight.
fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(method_not_allowed_handler))
}

pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    let open_sessions = state.sessions.read().await.len();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "ticker-selector",
        "instance_id": state.instance_id,
        "uptime_seconds": (Utc::now() - state.start_time).num_seconds(),
        "version": env!("CARGO_PKG_VERSION"),
        "catalog_size": state.catalog.len(),
        "open_selections": open_sessions,
    })))
}

pub fn cors_preflight() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .insert_header(("Access-Control-Allow-Methods", "POST, GET, DELETE, OPTIONS"))
        .insert_header(("Access-Control-Allow-Headers", "Content-Type"))
        .finish()
}

pub async fn not_found_handler(req: HttpRequest) -> HttpResponse {
    if *req.method() == Method::OPTIONS {
        return cors_preflight();
    }
    HttpResponse::NotFound().json(ApiError {
        code: "not_found".to_string(),
        message: format!("No route for {} {}", req.method(), req.path()),
    })
}

pub async fn method_not_allowed_handler(req: HttpRequest) -> HttpResponse {
    if *req.method() == Method::OPTIONS {
        return cors_preflight();
    }
    HttpResponse::MethodNotAllowed().json(ApiError {
        code: "method_not_allowed".to_string(),
        message: format!("{} is not supported on {}", req.method(), req.path()),
    })
}

pub async fn search_tickers(
    query: web::Query<SearchQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let text = query.q.clone().unwrap_or_default();
    let limit = query
        .limit
        .unwrap_or(state.config.search_limit)
        .min(MAX_SEARCH_LIMIT);
    let results = Ranker::search(&text, &state.catalog, limit);

    Ok(HttpResponse::Ok().json(SearchResponse {
        query: text,
        count: results.len(),
        results,
    }))
}

pub async fn validate_symbol(
    query: web::Query<ValidateQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let body = match FormatValidator::validate(&query.symbol) {
        Ok(normalized) => serde_json::json!({
            "ok": true,
            "normalized": normalized,
            "in_catalog": state.catalog.contains(&normalized),
        }),
        Err(reason) => serde_json::json!({
            "ok": false,
            "reason": reason,
            "message": state.messages.format_error(&reason),
        }),
    };
    Ok(HttpResponse::Ok().json(body))
}

pub async fn list_presets() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "presets": PRESETS,
        "count": PRESETS.len(),
    })))
}

pub async fn create_selection(state: web::Data<AppState>) -> Result<HttpResponse> {
    let id = Uuid::new_v4();
    let machine = SelectionStateMachine::new(state.config.limits);
    let response = selection_response(id, &machine);

    state.sessions.write().await.insert(id, machine);
    info!("Opened selection {}", id);

    Ok(HttpResponse::Created().json(response))
}

pub async fn get_selection(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let sessions = state.sessions.read().await;
    Ok(match sessions.get(&id) {
        Some(machine) => HttpResponse::Ok().json(selection_response(id, machine)),
        None => unknown_session(id),
    })
}

/// Drops the selection and every event stream attached to it.
pub async fn close_selection(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let Some(machine) = state.sessions.write().await.remove(&id) else {
        return Ok(unknown_session(id));
    };
    info!("Closed selection {}", id);
    Ok(HttpResponse::Ok().json(selection_response(id, &machine)))
}

pub async fn add_symbol(
    path: web::Path<Uuid>,
    body: web::Json<AddSymbolRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let mut sessions = state.sessions.write().await;
    let Some(machine) = sessions.get_mut(&id) else {
        return Ok(unknown_session(id));
    };

    Ok(match machine.add(&body.symbol) {
        Ok(()) => HttpResponse::Ok().json(selection_response(id, machine)),
        Err(err) => HttpResponse::UnprocessableEntity().json(ApiError {
            code: err.code().to_string(),
            message: state.messages.add_error(&err, &machine.limits()),
        }),
    })
}

pub async fn remove_symbol(
    path: web::Path<(Uuid, String)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (id, symbol) = path.into_inner();
    let mut sessions = state.sessions.write().await;
    let Some(machine) = sessions.get_mut(&id) else {
        return Ok(unknown_session(id));
    };

    machine.remove(&symbol);
    Ok(HttpResponse::Ok().json(selection_response(id, machine)))
}

pub async fn load_preset(
    path: web::Path<Uuid>,
    body: web::Json<PresetRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let Some(preset) = resolve_preset(&body.preset) else {
        return Ok(HttpResponse::NotFound().json(ApiError {
            code: "unknown_preset".to_string(),
            message: format!("Unknown preset: {}", body.preset),
        }));
    };

    let mut sessions = state.sessions.write().await;
    let Some(machine) = sessions.get_mut(&id) else {
        return Ok(unknown_session(id));
    };

    let report = machine.bulk_load(preset.symbols.iter());
    let limits = machine.limits();
    let rejected: Vec<RejectedSymbol> = report
        .rejected
        .iter()
        .map(|(symbol, err)| RejectedSymbol {
            symbol: symbol.clone(),
            code: err.code().to_string(),
            message: state.messages.add_error(err, &limits),
        })
        .collect();
    info!(
        "Selection {} loaded preset {} ({} kept, {} dropped)",
        id,
        preset.key,
        report.loaded.len(),
        rejected.len()
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "preset": preset.key,
        "loaded": report.loaded,
        "rejected": rejected,
        "session_id": id,
        "selection": machine.snapshot(),
        "hidden_value": machine.serialized(),
    })))
}

/// Re-validates a serialized selection on the way to the downstream computation.
pub async fn submit_selection(
    body: web::Json<SubmitRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let limits = state.config.limits;
    match validate_serialized(&body.tickers, &state.config) {
        Ok(tickers) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "tickers": tickers,
            "count": tickers.len(),
        }))),
        Err(err) => {
            warn!("Rejected submission {:?}: {}", body.tickers, err);
            Ok(HttpResponse::UnprocessableEntity().json(ApiError {
                code: err.code().to_string(),
                message: state.messages.submission_error(&err, &limits),
            }))
        }
    }
}

pub async fn selection_events(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Either<HttpResponse, EventStream> {
    let id = path.into_inner();
    let mut sessions = state.sessions.write().await;
    let Some(machine) = sessions.get_mut(&id) else {
        return Either::Left(unknown_session(id));
    };

    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(EVENT_BUFFER);
    machine.prune_observers();
    let initial = serde_json::json!({ "selection": machine.snapshot() });
    let _ = tx.try_send(Ok(Event::Data(Data::new(initial.to_string()).event("snapshot"))));
    machine.subscribe(EventForwarder { tx });

    Either::Right(Sse::from_stream(ReceiverStream::new(rx)))
}

/// Parses, normalizes and bounds-checks a serialized ticker list.
pub fn validate_serialized(
    raw: &str,
    config: &SelectorConfig,
) -> Result<Vec<String>, SubmissionError> {
    let mut tickers = Vec::new();
    for symbol in parse_tickers(raw) {
        match FormatValidator::validate(&symbol) {
            Ok(normalized) => tickers.push(normalized),
            Err(reason) => return Err(SubmissionError::InvalidSymbol { symbol, reason }),
        }
    }

    let count = tickers.len();
    if count < config.limits.min_selection() {
        return Err(SubmissionError::BelowMinimum {
            count,
            min: config.limits.min_selection(),
        });
    }
    if count > config.limits.max_selection() {
        return Err(SubmissionError::AboveMaximum {
            count,
            max: config.limits.max_selection(),
        });
    }
    Ok(tickers)
}

/// Pushes change notifications into an SSE channel. A full channel drops the
/// event; a closed one marks the forwarder inactive so the machine drops it.
struct EventForwarder {
    tx: mpsc::Sender<Result<Event, Infallible>>,
}

impl SelectionObserver for EventForwarder {
    fn on_change(&self, change: &SelectionChange, snapshot: &SelectionSnapshot) {
        let payload = serde_json::json!({ "change": change, "selection": snapshot });
        let _ = self
            .tx
            .try_send(Ok(Event::Data(Data::new(payload.to_string()).event("selection"))));
    }

    fn is_active(&self) -> bool {
        !self.tx.is_closed()
    }
}

fn selection_response(id: Uuid, machine: &SelectionStateMachine) -> SelectionResponse {
    SelectionResponse {
        session_id: id,
        selection: machine.snapshot(),
        hidden_value: machine.serialized(),
    }
}

fn unknown_session(id: Uuid) -> HttpResponse {
    HttpResponse::NotFound().json(ApiError {
        code: "unknown_session".to_string(),
        message: format!("No selection with id {}", id),
    })
}
