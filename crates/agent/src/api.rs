//! HTTP surface of the agent host: health check plus a streaming chat
//! endpoint.

use crate::agent::{Agent, AgentEvent};
use anyhow::Result;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use futures::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<Agent>,
}

pub async fn serve(addr: &str, agent: Arc<Agent>) -> Result<()> {
    let app = create_router(AppState { agent });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("agent host listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "daybrief-agent",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

/// One conversational turn, streamed as server-sent events. The agent task
/// notices a dropped stream (client disconnect) through the closed channel
/// and stops generating.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel::<AgentEvent>(32);

    let agent = state.agent.clone();
    tokio::spawn(async move {
        agent.run(&request.message, tx).await;
    });

    let stream = ReceiverStream::new(rx).map(|event| {
        let sse = Event::default().event(event.kind());
        Ok(sse
            .json_data(&event)
            .unwrap_or_else(|_| Event::default().event("error").data("serialization failed")))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
