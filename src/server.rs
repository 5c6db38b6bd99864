//! HTTP chat server.
//!
//! Exposes the retrieval-augmented chat pipeline via a JSON HTTP API and
//! serves the bundled chat page.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/chat` | Answer a query using retrieved help articles |
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/` | The chat page |
//!
//! # Error Contract
//!
//! Error responses are a flat JSON object:
//!
//! ```json
//! { "message": "query must not be empty" }
//! ```
//!
//! `400` covers malformed bodies and missing/empty query fields; `500`
//! covers generation failures and unexpected faults. Retrieval failures
//! never fail a request — the pipeline degrades to an empty context
//! instead (see [`crate::retrieval`]).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the page can be
//! served from elsewhere during development.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use sqlx::MySqlPool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::llm::{self, GenerationClient};
use crate::models::{ChatRequest, ChatResponse};
use crate::prompt;
use crate::retrieval::{ArticleRetriever, KeywordRetriever};

/// Shared application state passed to all route handlers via Axum's `State`
/// extractor.
///
/// The retriever and generation client are constructed once at startup and
/// injected here, so handlers never reach for ambient globals and tests can
/// substitute stub implementations.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub retriever: Arc<dyn ArticleRetriever>,
    pub llm: Arc<dyn GenerationClient>,
}

/// Starts the chat HTTP server.
///
/// Binds to the address configured in `[server].bind` and runs until the
/// process is terminated. The pool is handed to the keyword retriever; the
/// generation client is chosen from the `[model]` section.
pub async fn run_server(config: &Config, pool: MySqlPool) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let config = Arc::new(config.clone());

    let retriever = KeywordRetriever::new(pool, config.retrieval.max_articles);
    let client = llm::create_client(&config.model)?;

    let state = AppState {
        config,
        retriever: Arc::new(retriever),
        llm: Arc::from(client),
    };

    let app = app(state);

    println!("Chat server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the router. Split out from [`run_server`] so integration tests
/// can drive it in-process with stubbed state.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_chat_page))
        .route("/chat", post(handle_chat))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

/// Constructs a 500 Internal Server Error with a generic message. The real
/// cause stays in the server log.
fn internal_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.into(),
    }
}

// ============ GET / ============

/// Handler for `GET /`. Serves the bundled single-page chat UI.
async fn handle_chat_page() -> Html<&'static str> {
    Html(include_str!("../assets/chat.html"))
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Handler for `GET /health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /chat ============

/// Handler for `POST /chat`.
///
/// Stages: parse, retrieve, compose, generate, respond. Parsing failures
/// reject with 400 before any downstream work. Retrieval cannot fail the
/// request. A generation failure maps to a generic 500 and is logged with
/// its original error server-side; no partial payload is returned.
async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;

    if request.query.trim().is_empty() {
        return Err(bad_request("query must not be empty"));
    }

    let articles = state.retriever.retrieve(&request.query).await;

    let instruction = prompt::compose(&request.query, &articles);

    let answer = state.llm.generate(&instruction).await.map_err(|e| {
        eprintln!("Error: generation failed: {:#}", e);
        internal_error("Failed to generate an answer")
    })?;

    let context_used = articles.into_iter().map(|a| a.title).collect();

    Ok(Json(ChatResponse {
        answer,
        context_used,
    }))
}
