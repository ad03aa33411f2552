//! Minimal Dify client: one blocking-mode workflow run per quiz.
//!
//! Calls are instrumented and log status codes, latencies, and response sizes.
//! Raw bodies only appear truncated at debug level.
//!
//! NOTE: We never log the API key.

use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::error::QuizError;
use crate::protocol::{WorkflowInputs, WorkflowRunRequest};
use crate::util::trunc_for_log;

pub const DEFAULT_BASE_URL: &str = "https://api.dify.ai/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct Dify {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub timeout: Duration,
}

impl Dify {
  /// Construct the client if we find DIFY_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("DIFY_API_KEY").ok().filter(|k| !k.trim().is_empty())?;
    let base_url = std::env::var("DIFY_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
    let timeout_secs = std::env::var("DIFY_TIMEOUT_SECS")
      .ok()
      .and_then(|s| s.parse::<u64>().ok())
      .unwrap_or(DEFAULT_TIMEOUT_SECS);

    match Self::new(api_key, base_url, Duration::from_secs(timeout_secs)) {
      Ok(d) => Some(d),
      Err(e) => {
        error!(target: "hitsong_quiz", error = %e, "Failed to build HTTP client for Dify");
        None
      }
    }
  }

  pub fn new(
    api_key: impl Into<String>,
    base_url: impl Into<String>,
    timeout: Duration,
  ) -> Result<Self, reqwest::Error> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Ok(Self { client, api_key: api_key.into(), base_url, timeout })
  }

  /// Run the quiz workflow in blocking mode and return its raw JSON response.
  #[instrument(level = "info", skip(self, query), fields(query_len = query.len()))]
  pub async fn run_workflow(&self, query: &str) -> Result<Value, QuizError> {
    let url = format!("{}/workflows/run", self.base_url);
    let req = WorkflowRunRequest {
      inputs: WorkflowInputs { query },
      response_mode: "blocking",
      user: format!("user-{}", Uuid::new_v4()),
    };

    let start = Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "hitsong-quiz-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| self.map_transport_error(e))?;

    let status = res.status();
    let body = res.text().await.map_err(|e| self.map_transport_error(e))?;
    let elapsed = start.elapsed();
    info!(%status, ?elapsed, body_len = body.len(), user = %req.user, "Dify response received");

    if !status.is_success() {
      error!(%status, body = %trunc_for_log(&body, 200), "Dify API error");
      return Err(QuizError::Upstream { status: status.as_u16(), body });
    }

    debug!(body = %trunc_for_log(&body, 2000), "Dify raw response");
    serde_json::from_str::<Value>(&body).map_err(|e| QuizError::Internal(format!("JSON parse error: {}", e)))
  }

  fn map_transport_error(&self, e: reqwest::Error) -> QuizError {
    if e.is_timeout() {
      error!(timeout = ?self.timeout, "Dify request timed out");
      QuizError::Upstream {
        status: 504,
        body: format!("upstream request timed out after {}s", self.timeout.as_secs()),
      }
    } else {
      error!(error = %e, "Dify request failed");
      QuizError::Internal(e.to_string())
    }
  }
}
