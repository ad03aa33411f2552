//! Domain models: the year request sent by the client and the normalized quiz.

use serde::{Deserialize, Serialize};

/// Earliest year the client accepts.
pub const MIN_YEAR: i32 = 1950;
/// Latest year the client accepts.
pub const MAX_YEAR: i32 = 2024;

/// Request body the client sends to `POST /api/quiz`.
/// The range `MIN_YEAR..=MAX_YEAR` is enforced client-side only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
  pub year: i32,
}

/// Fixed three-field quiz shape produced from whatever the workflow returned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
  /// Image URL, or empty when the workflow produced none.
  #[serde(default)] pub problem: String,
  #[serde(default)] pub hints: Vec<String>,
  #[serde(default)] pub answer: String,
}
