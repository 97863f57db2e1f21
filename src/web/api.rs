use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use uuid::Uuid;

use crate::network::{parser::parse_network, DeviceRoute, EngineKind, TieBreakPolicy};
use crate::web::models::*;
use crate::Error;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub max_sessions: usize,
    pub default_tie_break: TieBreakPolicy,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_limits(1000, TieBreakPolicy::default())
    }

    pub fn with_limits(max_sessions: usize, default_tie_break: TieBreakPolicy) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions,
            default_tie_break,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Session>>, ApiError> {
        self.sessions.lock().map_err(|_| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "state_poisoned",
                "Session store is unavailable".to_string(),
            )
        })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/networks", post(create_network))
        .route("/api/networks/:session_id", get(get_network))
        .route("/api/networks/:session_id/routes", post(compute_routes))
        .route("/api/networks/:session_id/hosts/route", post(host_route))
        .route("/api/sessions", get(list_sessions))
        .route("/api/health", get(health_check))
}

fn api_error(status: StatusCode, error: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
        }),
    )
}

fn from_error(err: Error) -> ApiError {
    let (status, code) = match &err {
        Error::Parse { .. } => (StatusCode::BAD_REQUEST, "invalid_network"),
        Error::UnknownDevice(_) => (StatusCode::BAD_REQUEST, "unknown_device"),
        Error::UnknownHost(_) => (StatusCode::BAD_REQUEST, "unknown_host"),
        Error::DuplicateDevice(_) => (StatusCode::BAD_REQUEST, "duplicate_device"),
        Error::SelfLoop(_) => (StatusCode::BAD_REQUEST, "self_loop"),
        Error::InvalidTieBreak(_) | Error::InvalidEngine(_) => {
            (StatusCode::BAD_REQUEST, "invalid_parameter")
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "routing_failed"),
    };
    api_error(status, code, err.to_string())
}

/// Request tie-break, falling back to the server default
fn tie_break_or_default(
    requested: Option<&str>,
    default: TieBreakPolicy,
) -> Result<TieBreakPolicy, ApiError> {
    requested
        .map_or(Ok(default), |raw| raw.parse())
        .map_err(from_error)
}

fn session_not_found() -> ApiError {
    api_error(
        StatusCode::NOT_FOUND,
        "session_not_found",
        "Session not found".to_string(),
    )
}

/// Parse and store a new network
pub async fn create_network(
    State(state): State<AppState>,
    Json(request): Json<NetworkRequest>,
) -> Result<Json<NetworkSession>, ApiError> {
    let network = parse_network(&request.description).map_err(from_error)?;
    let session = Session::new(network);
    let view = session.view();

    let mut sessions = state.lock()?;
    if sessions.len() >= state.max_sessions {
        return Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "session_limit",
            format!("At most {} sessions are kept", state.max_sessions),
        ));
    }
    info!(
        "session {} created with {} devices",
        session.id,
        view.devices.len()
    );
    sessions.insert(session.id, session);

    Ok(Json(view))
}

/// Get a stored network
pub async fn get_network(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<NetworkSession>, ApiError> {
    let sessions = state.lock()?;
    sessions
        .get(&session_id)
        .map(|session| Json(session.view()))
        .ok_or_else(session_not_found)
}

/// Compute routes from one device of a stored network
pub async fn compute_routes(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<RoutesRequest>,
) -> Result<Json<RoutesResponse>, ApiError> {
    let network = {
        let sessions = state.lock()?;
        sessions
            .get(&session_id)
            .map(|session| session.network.clone())
            .ok_or_else(session_not_found)?
    };

    let tie_break = tie_break_or_default(request.tie_break.as_deref(), state.default_tie_break)?;
    let engine = request
        .engine
        .as_deref()
        .map_or(Ok(EngineKind::default()), |raw| raw.parse())
        .map_err(from_error)?;

    let start_time = Instant::now();
    let report = network
        .routes_from_with(&request.source, tie_break, engine)
        .map_err(from_error)?;
    let execution_time = start_time.elapsed();
    debug!(
        "session {}: routes from {} in {:?}",
        session_id, request.source, execution_time
    );

    let response = RoutesResponse {
        execution_id: Uuid::new_v4(),
        source: report.source,
        tie_break,
        engine,
        execution_time_ms: execution_time.as_secs_f64() * 1000.0,
        routes: report.routes,
    };

    let mut sessions = state.lock()?;
    if let Some(session) = sessions.get_mut(&session_id) {
        session.last_result = Some(response.clone());
    }

    Ok(Json(response))
}

/// Route between two hosts of a stored network
pub async fn host_route(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<HostRouteRequest>,
) -> Result<Json<DeviceRoute>, ApiError> {
    let network = {
        let sessions = state.lock()?;
        sessions
            .get(&session_id)
            .map(|session| session.network.clone())
            .ok_or_else(session_not_found)?
    };

    let tie_break = tie_break_or_default(request.tie_break.as_deref(), state.default_tie_break)?;
    network
        .host_route(&request.from, &request.to, tie_break)
        .map(Json)
        .map_err(from_error)
}

/// List all sessions
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionSummary>>, ApiError> {
    let sessions = state.lock()?;
    let mut summaries: Vec<SessionSummary> = sessions.values().map(Session::summary).collect();
    summaries.sort_by_key(|summary| summary.created_at);
    Ok(Json(summaries))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "netroute",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now()
    }))
}
