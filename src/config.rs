//! Loading quiz configuration (prompt template + user-facing messages) from TOML.
//!
//! Everything is optional; see `QuizConfig` for the expected schema:
//!
//! ```toml
//! [prompts]
//! query_template = "{year}年のヒット曲クイズを作成してください"
//!
//! [messages]
//! year_missing = "年代が指定されていません"
//! year_out_of_range = "1950年から2024年の間で年代を入力してください"
//! ```

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuizConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub messages: Messages,
}

/// Prompt sent to the workflow. `{year}` is replaced with the requested year.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub query_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self { query_template: "{year}年のヒット曲クイズを作成してください".into() }
  }
}

/// Localized validation messages shown to the user.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Messages {
  /// Server side: request body without a usable `year`.
  pub year_missing: String,
  /// Client side: year input outside the accepted range.
  pub year_out_of_range: String,
}

impl Default for Messages {
  fn default() -> Self {
    Self {
      year_missing: "年代が指定されていません".into(),
      year_out_of_range: "1950年から2024年の間で年代を入力してください".into(),
    }
  }
}

/// Parse a TOML document into `QuizConfig`.
pub fn parse_quiz_config(s: &str) -> Result<QuizConfig, toml::de::Error> {
  toml::from_str::<QuizConfig>(s)
}

/// Attempt to load `QuizConfig` from QUIZ_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_quiz_config_from_env() -> Option<QuizConfig> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_quiz_config(&s) {
      Ok(cfg) => {
        info!(target: "hitsong_quiz", %path, "Loaded quiz config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "hitsong_quiz", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "hitsong_quiz", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
