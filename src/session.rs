//! Client-side quiz view model: year input, request lifecycle, and progressive
//! disclosure of hints and the answer. Rendering is left to the caller.
//!
//! ```text
//! Idle --submit(valid)--> Loading --success--> Ready --reset--> Idle
//!   ^                        |
//!   +---- Error <--failure---+        (Error --submit--> Loading)
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::Messages;
use crate::domain::{Quiz, QuizRequest, MAX_YEAR, MIN_YEAR};
use crate::protocol::ErrorOut;

/// Year prefilled in the input and restored on reset.
pub const DEFAULT_YEAR: &str = "1980";

/// Where quizzes come from. `ProxyClient` is the HTTP implementation.
#[async_trait]
pub trait QuizSource {
  /// Fetch one quiz. `Err` carries a message to show verbatim.
  async fn fetch_quiz(&self, req: QuizRequest) -> Result<Quiz, String>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
  /// Waiting for input. `error` holds a local validation message.
  Idle { error: Option<String> },
  Loading,
  Ready {
    quiz: Quiz,
    /// Number of hints shown so far; never exceeds `quiz.hints.len()`.
    revealed: usize,
    answer_revealed: bool,
  },
  /// A request failed; same as `Idle` plus a visible message.
  Error { message: String },
}

#[derive(Clone, Debug)]
pub struct QuizSession {
  year: String,
  phase: Phase,
  messages: Messages,
}

impl Default for QuizSession {
  fn default() -> Self {
    Self::new(Messages::default())
  }
}

impl QuizSession {
  pub fn new(messages: Messages) -> Self {
    Self { year: DEFAULT_YEAR.into(), phase: Phase::Idle { error: None }, messages }
  }

  pub fn phase(&self) -> &Phase { &self.phase }

  pub fn year(&self) -> &str { &self.year }

  pub fn is_loading(&self) -> bool { matches!(self.phase, Phase::Loading) }

  /// Message to show in the error banner, if any.
  pub fn error(&self) -> Option<&str> {
    match &self.phase {
      Phase::Idle { error } => error.as_deref(),
      Phase::Error { message } => Some(message),
      _ => None,
    }
  }

  pub fn quiz(&self) -> Option<&Quiz> {
    match &self.phase {
      Phase::Ready { quiz, .. } => Some(quiz),
      _ => None,
    }
  }

  /// Hints currently shown, in order.
  pub fn revealed_hints(&self) -> &[String] {
    match &self.phase {
      Phase::Ready { quiz, revealed, .. } => &quiz.hints[..*revealed],
      _ => &[],
    }
  }

  /// Index of the last revealed hint; `None` before the first one.
  pub fn current_hint_index(&self) -> Option<usize> {
    match &self.phase {
      Phase::Ready { revealed, .. } => revealed.checked_sub(1),
      _ => None,
    }
  }

  /// Same as `current_hint_index`, with -1 meaning no hint shown.
  pub fn revealed_hint_count(&self) -> isize {
    self.current_hint_index().map_or(-1, |i| i as isize)
  }

  pub fn answer_revealed(&self) -> bool {
    matches!(self.phase, Phase::Ready { answer_revealed: true, .. })
  }

  pub fn can_reveal_next_hint(&self) -> bool {
    match &self.phase {
      Phase::Ready { quiz, revealed, answer_revealed } => !answer_revealed && *revealed < quiz.hints.len(),
      _ => false,
    }
  }

  /// Edit the year input. Only possible while the input is visible.
  pub fn set_year(&mut self, year: impl Into<String>) -> bool {
    match self.phase {
      Phase::Idle { .. } | Phase::Error { .. } => {
        self.year = year.into();
        true
      }
      _ => false,
    }
  }

  /// Validate the year and enter `Loading`. Returns the request to dispatch,
  /// or `None` if nothing should be sent (invalid year, busy, or a quiz is shown).
  pub fn begin_submit(&mut self) -> Option<QuizRequest> {
    match self.phase {
      Phase::Idle { .. } | Phase::Error { .. } => {}
      Phase::Loading => {
        debug!(target: "quiz", "Submit ignored: request already in flight");
        return None;
      }
      Phase::Ready { .. } => {
        debug!(target: "quiz", "Submit ignored: reset before requesting a new quiz");
        return None;
      }
    }

    match parse_year(&self.year) {
      Some(year) => {
        self.phase = Phase::Loading;
        Some(QuizRequest { year })
      }
      None => {
        self.phase = Phase::Idle { error: Some(self.messages.year_out_of_range.clone()) };
        None
      }
    }
  }

  /// Apply the outcome of the request started by `begin_submit`.
  /// Ignored unless a request is in flight.
  pub fn complete(&mut self, outcome: Result<Quiz, String>) {
    if !self.is_loading() {
      warn!(target: "quiz", "Completion ignored: no request in flight");
      return;
    }
    self.phase = match outcome {
      Ok(quiz) => Phase::Ready { quiz, revealed: 0, answer_revealed: false },
      Err(message) => Phase::Error { message },
    };
  }

  /// Validate, fetch from `source`, and store the result.
  #[instrument(level = "info", skip(self, source), fields(year = %self.year))]
  pub async fn submit<S: QuizSource + Sync + ?Sized>(&mut self, source: &S) {
    let Some(req) = self.begin_submit() else { return };
    let outcome = source.fetch_quiz(req).await;
    if let Err(e) = &outcome {
      warn!(target: "quiz", error = %e, "Quiz fetch failed");
    }
    self.complete(outcome);
  }

  /// Show one more hint. No-op at the last hint or once the answer is shown.
  pub fn reveal_next_hint(&mut self) -> bool {
    if !self.can_reveal_next_hint() {
      return false;
    }
    if let Phase::Ready { revealed, .. } = &mut self.phase {
      *revealed += 1;
    }
    true
  }

  /// Show the answer. Idempotent.
  pub fn reveal_answer(&mut self) -> bool {
    match &mut self.phase {
      Phase::Ready { answer_revealed, .. } => {
        *answer_revealed = true;
        true
      }
      _ => false,
    }
  }

  /// Back to `Idle` with the default year. Not allowed mid-request.
  pub fn reset(&mut self) -> bool {
    if self.is_loading() {
      return false;
    }
    self.year = DEFAULT_YEAR.into();
    self.phase = Phase::Idle { error: None };
    true
  }
}

/// Parse the year input; `None` unless it is an integer in the accepted range.
pub fn parse_year(input: &str) -> Option<i32> {
  input
    .trim()
    .parse::<i32>()
    .ok()
    .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
}

/// `QuizSource` that calls the proxy's `POST /api/quiz` over HTTP.
#[derive(Clone)]
pub struct ProxyClient {
  pub client: reqwest::Client,
  pub endpoint: String,
}

impl ProxyClient {
  /// `base_url` is the proxy origin, e.g. `http://localhost:3000`.
  pub fn new(client: reqwest::Client, base_url: &str) -> Self {
    Self { client, endpoint: format!("{}/api/quiz", base_url.trim_end_matches('/')) }
  }
}

/// Success body as the client accepts it: `hints` may arrive as one string.
#[derive(Deserialize)]
struct QuizWire {
  #[serde(default)] problem: String,
  #[serde(default)] hints: HintsWire,
  #[serde(default)] answer: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HintsWire {
  Many(Vec<String>),
  One(String),
}

impl Default for HintsWire {
  fn default() -> Self { HintsWire::Many(Vec::new()) }
}

impl From<QuizWire> for Quiz {
  fn from(w: QuizWire) -> Self {
    let hints = match w.hints {
      HintsWire::Many(v) => v,
      HintsWire::One(s) => vec![s],
    };
    Quiz { problem: w.problem, hints, answer: w.answer }
  }
}

#[async_trait]
impl QuizSource for ProxyClient {
  #[instrument(level = "info", skip(self), fields(endpoint = %self.endpoint))]
  async fn fetch_quiz(&self, req: QuizRequest) -> Result<Quiz, String> {
    let res = self.client.post(&self.endpoint).json(&req).send().await.map_err(|e| e.to_string())?;

    let status = res.status();
    if !status.is_success() {
      let msg = res
        .json::<ErrorOut>()
        .await
        .map(|e| e.error)
        .unwrap_or_else(|_| format!("API error: {}", status.as_u16()));
      return Err(msg);
    }

    let quiz: Quiz = res.json::<QuizWire>().await.map_err(|e| e.to_string())?.into();
    info!(target: "quiz", hints = quiz.hints.len(), "Quiz received");
    Ok(quiz)
  }
}
