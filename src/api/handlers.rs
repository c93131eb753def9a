//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    ChatRequest, ChatResponse, CreateSessionResponse, ErrorResponse, SessionResponse,
    SuccessResponse,
};
use super::AppState;
use crate::runtime::RuntimeError;
use crate::state_machine::Event;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Widget opened for the first time
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session))
        // SSE streaming
        .route("/api/sessions/:id/stream", get(stream_session))
        // User actions
        .route("/api/sessions/:id/messages", post(send_message))
        .route("/api/sessions/:id/open", post(open_window))
        .route("/api/sessions/:id/close", post(close_window))
        // Lifecycle
        .route("/api/sessions/:id/end", post(end_session))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Sessions
// ============================================================

async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AppError> {
    let session_id = state.runtime.create_session().await?;
    let active_sessions = state.runtime.session_count().await;
    tracing::info!(session_id = %session_id, active_sessions, "Session created");
    Ok((StatusCode::CREATED, Json(CreateSessionResponse { session_id })))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let snapshot = state.runtime.snapshot(&id).await?;
    Ok(Json(SessionResponse {
        session_id: snapshot.session_id,
        dialog_state: snapshot.dialog_state,
        messages: snapshot.messages,
    }))
}

async fn stream_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (init_event, broadcast_rx) = state.runtime.subscribe(&id).await?;
    Ok(sse_stream(
        init_event,
        broadcast_rx,
        state.runtime.shutdown_token(),
    ))
}

async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.runtime.end_session(&id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// User Actions
// ============================================================

async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload?;
    // Blank text is still queued; the session drops it silently
    state
        .runtime
        .send_event(&id, Event::UserMessage { text: req.text })
        .await?;
    Ok(Json(ChatResponse { queued: true }))
}

async fn open_window(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.runtime.send_event(&id, Event::WindowOpened).await?;
    Ok(Json(SuccessResponse { success: true }))
}

async fn close_window(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.runtime.send_event(&id, Event::WindowClosed).await?;
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> impl IntoResponse {
    Json(serde_json::json!({ "version": env!("CARGO_PKG_VERSION") }))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    /// The session existed but its actor has stopped
    Gone(String),
}

impl From<RuntimeError> for AppError {
    fn from(e: RuntimeError) -> Self {
        match e {
            RuntimeError::SessionNotFound(_) => AppError::NotFound(e.to_string()),
            RuntimeError::SessionClosed(_) => AppError::Gone(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Gone(msg) => (StatusCode::GONE, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
