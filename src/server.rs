//! HTTP API for the answer engine.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/` | Answer a question: `{"question": "...", "image": "<base64>"?}` |
//! | `GET`  | `/health` | Health check with version and corpus counts |
//! | `POST` | `/admin/reload` | Reload the corpus from disk |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "question must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `internal` (500).
//!
//! # Concurrency
//!
//! Every request answers against a snapshot of the [`SharedStore`]. A
//! reload builds the new store off the async runtime and publishes it in a
//! single swap, so in-flight requests never observe a half-loaded corpus.

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use course_ta_core::models::Answer;
use course_ta_core::pipeline::AnswerEngine;
use course_ta_core::store::{InMemoryStore, SharedStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::Config;
use crate::corpus::{self, CorpusCounts};
use crate::preprocess::process_question;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    engine: Arc<AnswerEngine>,
    store: Arc<SharedStore>,
}

impl AppState {
    /// State serving `store` with limits from `config`.
    pub fn new(config: Config, store: InMemoryStore) -> Self {
        let engine = AnswerEngine::new(config.answer.params());
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            store: Arc::new(SharedStore::new(store)),
        }
    }
}

/// Routes with CORS open to all origins.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/", post(handle_answer))
        .route("/api", post(handle_answer))
        .route("/health", get(handle_health))
        .route("/admin/reload", post(handle_reload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Load the corpus and serve until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();

    let cfg = config.clone();
    let store = tokio::task::spawn_blocking(move || corpus::load_store(&cfg))
        .await
        .context("corpus loading task failed")?;
    let app = build_router(AppState::new(config.clone(), store));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!(addr = %bind_addr, "listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request",
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal",
        message: message.into(),
    }
}

// ============ POST /api/ ============

/// Request body for `POST /api/`.
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub question: String,
    /// Base64 screenshot attached by some clients. Accepted, not analysed.
    #[serde(default)]
    pub image: Option<String>,
}

async fn handle_answer(
    State(state): State<AppState>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<Answer>, AppError> {
    let Json(req) =
        payload.map_err(|e| bad_request(format!("invalid request body: {}", e.body_text())))?;
    if req.question.trim().is_empty() {
        return Err(bad_request("question must not be empty"));
    }

    let processed = process_question(&req.question);
    let store = state.store.snapshot();
    let trace = state.engine.explain(&processed, store.as_ref());

    debug!(
        question_type = %processed.question_type,
        keywords = ?processed.keywords,
        has_image = req.image.is_some(),
        path = ?trace.path,
        "answered question"
    );

    Ok(Json(trace.answer))
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    topics: usize,
    pages: usize,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let counts = CorpusCounts::of(&state.store.snapshot());
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        topics: counts.topics,
        pages: counts.pages,
    })
}

// ============ POST /admin/reload ============

async fn handle_reload(State(state): State<AppState>) -> Result<Json<CorpusCounts>, AppError> {
    let config = state.config.clone();
    let store = state.store.clone();
    let counts = tokio::task::spawn_blocking(move || corpus::reload(&config, &store))
        .await
        .map_err(|e| internal(format!("reload failed: {}", e)))?;
    info!(
        topics = counts.topics,
        posts = counts.posts,
        pages = counts.pages,
        "corpus reloaded"
    );
    Ok(Json(counts))
}
