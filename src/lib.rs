//! Hit-Song Quiz backend library.
//!
//! - `POST /api/quiz` proxy in front of a Dify workflow (`routes`, `logic`, `dify`)
//! - tolerant normalization of the workflow output (`normalize`)
//! - client-side quiz view model and HTTP client for the proxy (`session`)

pub mod config;
pub mod dify;
pub mod domain;
pub mod error;
pub mod logic;
pub mod normalize;
pub mod protocol;
pub mod routes;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod util;
