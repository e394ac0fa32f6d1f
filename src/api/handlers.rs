//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{
    ChatRequest, ErrorResponse, ExamplesResponse, SessionResponse, StatsResponse,
};
use super::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

/// Longest accepted symptom description, in characters
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Shortcuts offered under the chat input
pub const EXAMPLE_PROMPTS: &[&str] = &[
    "I have fever and body aches",
    "I have a severe headache",
    "Persistent cough and congestion",
    "Skin rash with itching",
    "Stomach pain with diarrhea",
];

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the chat page
        .route("/", get(serve_index))
        .route("/assets/*path", get(serve_static))
        .route("/api/examples", get(list_examples))
        .route("/api/stats", get(community_stats))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session))
        .route("/api/sessions/:id/chat", post(send_chat))
        .route("/api/sessions/:id/clear", post(clear_session))
        .route("/version", get(get_version))
        .with_state(state)
}

async fn serve_index() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - chat page not found</h1>".to_string()),
        )
            .into_response(),
    }
}

async fn list_examples() -> Json<ExamplesResponse> {
    Json(ExamplesResponse {
        examples: EXAMPLE_PROMPTS,
    })
}

async fn community_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let engine = state.sessions.engine();
    let community = engine.community_stats().snapshot();
    Json(StatsResponse {
        mode: engine.mode(),
        active_sessions: state.sessions.len(),
        stats_summary: community.summary(),
        community,
    })
}

// ============================================================
// Sessions
// ============================================================

async fn create_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let (id, session) = state.sessions.create();
    let view = session.lock().await.view();
    Json(SessionResponse::new(id, view))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.get(id).ok_or(AppError::SessionNotFound(id))?;
    let view = session.lock().await.view();
    Ok(Json(SessionResponse::new(id, view)))
}

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    check_length("Message", &req.message)?;
    for (index, turn) in req.history.iter().flatten().enumerate() {
        check_length(&format!("History turn {index}"), &turn.content)?;
    }

    let session = state.sessions.get(id).ok_or(AppError::SessionNotFound(id))?;
    let mut session = session.lock().await;
    let view = match req.history {
        Some(history) => session.submit_with_history(&req.message, history).await,
        None => session.submit(&req.message).await,
    };

    Ok(Json(SessionResponse::new(id, view)))
}

fn check_length(what: &str, text: &str) -> Result<(), AppError> {
    let length = text.chars().count();
    if length > MAX_MESSAGE_CHARS {
        return Err(AppError::BadRequest(format!(
            "{what} is {length} characters; the limit is {MAX_MESSAGE_CHARS}"
        )));
    }
    Ok(())
}

async fn clear_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.get(id).ok_or(AppError::SessionNotFound(id))?;
    let view = session.lock().await.clear();
    Ok(Json(SessionResponse::new(id, view)))
}

async fn get_version() -> &'static str {
    concat!("village-doctor ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    SessionNotFound(Uuid),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::SessionNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Session not found: {id}"))
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
