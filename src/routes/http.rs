//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs basic result info.

use std::sync::Arc;
use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::domain::Quiz;
use crate::error::QuizError;
use crate::logic::handle_quiz_request;
use crate::protocol::HealthOut;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

/// The body is taken as raw bytes so malformed JSON reaches the same error path
/// as every other failure instead of axum's extractor rejection.
#[instrument(level = "info", skip(state, body), fields(body_len = body.len()))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<Json<Quiz>, QuizError> {
  let quiz = handle_quiz_request(&state, &body).await?;
  info!(target: "quiz", hints = quiz.hints.len(), "HTTP quiz served");
  Ok(Json(quiz))
}
