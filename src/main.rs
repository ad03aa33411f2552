//! Hit-Song Quiz · Backend
//!
//! - Axum HTTP API (`POST /api/quiz`, `GET /api/health`)
//! - Dify workflow integration (via environment variables)
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   DIFY_API_KEY      : bearer token for the Dify workflow app (required for quizzes)
//!   DIFY_BASE_URL     : default "https://api.dify.ai/v1"
//!   DIFY_TIMEOUT_SECS : upstream timeout, default 30
//!   QUIZ_CONFIG_PATH  : path to TOML config (prompt template + messages)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use hitsong_quiz_backend::routes::build_router;
use hitsong_quiz_backend::state::AppState;
use hitsong_quiz_backend::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Read-only state: prompts, messages, Dify client.
  let state = Arc::new(AppState::new());

  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "hitsong_quiz", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "hitsong_quiz", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "hitsong_quiz", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
}
