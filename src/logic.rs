//! Core quiz behavior behind `POST /api/quiz`: validate the year, build the
//! prompt, call the workflow, and normalize its output.

use serde_json::Value;
use tracing::{info, instrument};

use crate::domain::Quiz;
use crate::error::QuizError;
use crate::normalize::normalize_quiz;
use crate::state::AppState;
use crate::util::{display_value, fill_template, is_truthy};

/// Handle one quiz request body. Every failure comes back as a `QuizError`.
#[instrument(level = "info", skip(state, body), fields(body_len = body.len()))]
pub async fn handle_quiz_request(state: &AppState, body: &[u8]) -> Result<Quiz, QuizError> {
  let body: Value = serde_json::from_slice(body).map_err(|e| QuizError::Internal(e.to_string()))?;

  let year = match body.get("year").filter(|v| is_truthy(v)) {
    Some(v) => display_value(v),
    None => return Err(QuizError::Validation(state.messages.year_missing.clone())),
  };

  let dify = state
    .dify
    .as_ref()
    .ok_or_else(|| QuizError::Internal("DIFY_API_KEY is not configured".into()))?;

  let query = fill_template(&state.prompts.query_template, &[("year", &year)]);
  info!(target: "quiz", %year, "Calling Dify workflow");
  let raw = dify.run_workflow(&query).await?;

  let quiz = normalize_quiz(&raw);
  info!(
    target: "quiz",
    %year,
    has_problem = !quiz.problem.is_empty(),
    hints = quiz.hints.len(),
    has_answer = !quiz.answer.is_empty(),
    "Quiz normalized"
  );
  Ok(quiz)
}
