//! HTTP surface: liveness, health, metrics and the Telegram webhook
//!
//! - `GET /` - plain liveness text
//! - `GET /health` - JSON status with the account count
//! - `GET /metrics` - Prometheus text format
//! - `POST /<bot token>` - Telegram update delivery

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use coincore::metrics::record_failure;
use coincore::{Engine, Reply};
use prometheus::{Encoder, TextEncoder};
use secrecy::{ExposeSecret, SecretString};
use teloxide::types::Update;
use tokio::net::TcpListener;

use crate::error::BotResult;
use crate::telegram::{incoming_from_update, ReplySink};

pub const ROOT_TEXT: &str = "✅ Bot is running!";

/// Shared state of the webhook server
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub sink: Arc<dyn ReplySink>,
    pub token: Arc<SecretString>,
}

impl AppState {
    pub fn new(engine: Arc<Engine>, sink: Arc<dyn ReplySink>, token: SecretString) -> Self {
        Self {
            engine,
            sink,
            token: Arc::new(token),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/{token}", post(webhook_handler))
        .with_state(state)
}

/// Serves until `shutdown` resolves.
pub async fn serve(
    state: AppState,
    port: u16,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> BotResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Starting webhook server on http://{}", addr);
    tracing::info!("  /        - liveness");
    tracing::info!("  /health  - health check (JSON)");
    tracing::info!("  /metrics - Prometheus metrics");

    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

async fn root_handler() -> &'static str {
    ROOT_TEXT
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let status = serde_json::json!({
        "status": "ok",
        "accounts": state.engine.store().len(),
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(status))
}

async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    match encoder.encode(&prometheus::gather(), &mut buffer) {
        Ok(()) => ([(header::CONTENT_TYPE, encoder.format_type().to_string())], buffer).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to encode metrics: {}", e)).into_response()
        }
    }
}

/// Compares the path token with the configured one in time independent of
/// where they differ. Only the length can leak.
pub fn token_matches(expected: &str, candidate: &str) -> bool {
    let (expected, candidate) = (expected.as_bytes(), candidate.as_bytes());
    if expected.len() != candidate.len() {
        return false;
    }
    expected
        .iter()
        .zip(candidate)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

async fn webhook_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
    body: Result<Json<Update>, JsonRejection>,
) -> (StatusCode, &'static str) {
    if !token_matches(state.token.expose_secret(), &token) {
        return (StatusCode::NOT_FOUND, "Not Found");
    }

    let update = match body {
        Ok(Json(update)) => update,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected webhook body");
            return (StatusCode::BAD_REQUEST, "Invalid JSON");
        }
    };

    process_update(&state, update).await;
    (StatusCode::OK, "OK")
}

/// Routes one update and sends the reply.
///
/// Never fails: handler panics become a generic reply, delivery errors are
/// logged. Telegram retries anything that is not acknowledged with 200, so
/// the webhook always acknowledges.
pub async fn process_update(state: &AppState, update: Update) {
    let update_id = update.id.0;
    let Some(incoming) = incoming_from_update(update) else {
        tracing::debug!(update_id, "Ignoring update without routable content");
        return;
    };

    if let Some(query) = &incoming.callback {
        if let Err(e) = state.sink.ack_callback(query).await {
            tracing::warn!(update_id, error = %e, "Failed to answer callback query");
        }
    }

    // Run the handler in its own task so a panic only loses this update.
    let engine = Arc::clone(&state.engine);
    let inbound = incoming.inbound.clone();
    let reply = match tokio::spawn(async move { engine.handle(&inbound) }).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(update_id, user_id = incoming.inbound.sender, error = %e, "Handler panicked");
            record_failure("panic");
            Reply::internal_error()
        }
    };

    if let Err(e) = state.sink.send(incoming.chat_id, &reply).await {
        tracing::error!(update_id, chat_id = incoming.chat_id.0, error = %e, "Failed to send reply");
    }
}
