//! Application state: prompts, messages, and the optional Dify client.
//!
//! Nothing here is mutated after startup, so handlers share it through an `Arc`
//! without locks.

use tracing::{error, info, instrument};

use crate::config::{load_quiz_config_from_env, Messages, Prompts, QuizConfig};
use crate::dify::Dify;

#[derive(Clone)]
pub struct AppState {
    pub dify: Option<Dify>,
    pub prompts: Prompts,
    pub messages: Messages,
}

impl AppState {
    /// Build state from env: load TOML config, init the Dify client.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_quiz_config_from_env().unwrap_or_default();

        let dify = Dify::from_env();
        if let Some(d) = &dify {
            info!(target: "hitsong_quiz", base_url = %d.base_url, timeout = ?d.timeout, "Dify enabled.");
        } else {
            error!(target: "hitsong_quiz", "DIFY_API_KEY not set; quiz generation will fail until it is configured.");
        }

        Self::with_parts(dify, cfg)
    }

    pub fn with_parts(dify: Option<Dify>, cfg: QuizConfig) -> Self {
        Self {
            dify,
            prompts: cfg.prompts,
            messages: cfg.messages,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
