//! Error taxonomy of the quiz proxy and its mapping onto HTTP responses.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;
use tracing::warn;

use crate::protocol::ErrorOut;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
  /// Client input rejected before any network call.
  #[error("{0}")]
  Validation(String),

  /// The workflow service answered with a non-success status or timed out.
  #[error("Dify API error: {status} - {body}")]
  Upstream { status: u16, body: String },

  #[error("Server error: {0}")]
  Internal(String),
}

impl QuizError {
  pub fn status(&self) -> StatusCode {
    match self {
      QuizError::Validation(_) => StatusCode::BAD_REQUEST,
      QuizError::Upstream { status, .. } => {
        StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
      }
      QuizError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for QuizError {
  fn into_response(self) -> Response {
    let status = self.status();
    warn!(target: "quiz", %status, error = %self, "Quiz request failed");
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}
