//! Public protocol structs for the HTTP endpoints and the outbound workflow call.
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

/// Error body for every non-200 response of `POST /api/quiz`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

//
// Dify workflow DTOs
//

/// Body of `POST /workflows/run`.
#[derive(Debug, Serialize)]
pub struct WorkflowRunRequest<'a> {
    pub inputs: WorkflowInputs<'a>,
    pub response_mode: &'static str,
    pub user: String,
}

#[derive(Debug, Serialize)]
pub struct WorkflowInputs<'a> {
    pub query: &'a str,
}
