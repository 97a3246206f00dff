pub mod http;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::ERROR_MESSAGE;

/// Body sent to the solver service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskRequest {
    pub text: String,
}

/// What the solver service answered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverAnswer {
    /// The `answer` field, empty when the service left it out.
    pub answer: String,
    /// Retrieved material the service based its answer on, if it sent any.
    pub context: Option<String>,
}

impl SolverAnswer {
    /// Extract the answer from a decoded response body.
    ///
    /// Only `answer` and `context` are looked at, and neither is required.
    /// A string is taken verbatim; `null` or a missing field is empty; any
    /// other JSON value is shown as its JSON text.
    pub fn from_json(body: &serde_json::Value) -> Self {
        let answer = match body.get("answer") {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        let context = body
            .get("context")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        Self { answer, context }
    }
}

/// Why a solve attempt failed.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The request could not be sent or its body could not be read.
    #[error("request to solver failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not JSON.
    #[error("solver response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// A scripted failure (used by [`mock::MockSolver`]).
    #[error("solver rejected the question: {0}")]
    Rejected(String),
}

impl SolveError {
    /// The text shown to the user. Every failure looks the same.
    pub fn user_message(&self) -> &'static str {
        ERROR_MESSAGE
    }
}

/// Anything that turns a question into an answer. The HTTP service in
/// production, a script in tests.
#[async_trait]
pub trait Solver: Send + Sync {
    async fn solve(&self, question: &str) -> Result<SolverAnswer, SolveError>;
}
