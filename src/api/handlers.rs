//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, warn};

use crate::state::{AppState, SessionError};
use super::responses::{ApiResponse, HealthResponse, StartSessionRequest, StatusResponse};

fn status_code(e: &SessionError) -> StatusCode {
    match e {
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        SessionError::AlreadySubmitted(_) => StatusCode::CONFLICT,
        SessionError::Lock(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle POST /sessions - Open an exam page and start its countdown.
///
/// An empty body opens a default-length exam. A body that is not a valid
/// request is rejected rather than falling back to the default.
pub async fn start_session_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse>, StatusCode> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        StartSessionRequest::default()
    } else {
        serde_json::from_slice::<StartSessionRequest>(&body).map_err(|e| {
            warn!("Rejected malformed session request: {}", e);
            StatusCode::BAD_REQUEST
        })?
    };

    match state.start_session(request.raw_duration()) {
        Ok(session) => {
            let message = if session.guard_active {
                "Exam session started".to_string()
            } else {
                "Exam session opened without a countdown".to_string()
            };
            Ok(Json(ApiResponse::for_session(message, session)))
        }
        Err(e) => {
            error!("Failed to start exam session: {}", e);
            Err(status_code(&e))
        }
    }
}

/// Handle GET /sessions/:id - Current countdown and submission state
pub async fn session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse>, StatusCode> {
    state
        .session(id)
        .map(|session| Json(ApiResponse::for_session("Exam session status".to_string(), session)))
        .map_err(|e| status_code(&e))
}

/// Handle POST /sessions/:id/submit - The user submits the exam
pub async fn submit_session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.submit_session(id) {
        Ok(session) => Ok(Json(ApiResponse::inactive(
            "Exam submitted".to_string(),
            session,
        ))),
        Err(e) => {
            warn!("Rejected submission: {}", e);
            Err(status_code(&e))
        }
    }
}

/// Handle DELETE /sessions/:id - Tear down an exam page
pub async fn end_session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> StatusCode {
    match state.end_session(id) {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => {
            warn!("Failed to end exam session: {}", e);
            status_code(&e)
        }
    }
}

/// Handle GET /status - Return current server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let (active_sessions, total_sessions) = match state.session_counts() {
        Ok(counts) => counts,
        Err(e) => {
            error!("Failed to count exam sessions: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        exam_duration_minutes: state.exam_duration_minutes,
        active_sessions,
        total_sessions,
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
