use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, warn};

use super::{AskRequest, SolveError, Solver, SolverAnswer};
use crate::config::FormConfig;

/// A solver that posts the question to the remote math service.
pub struct HttpSolver {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSolver {
    pub fn new(config: &FormConfig) -> anyhow::Result<Self> {
        Ok(Self::with_client(reqwest::Client::new(), config.endpoint()?))
    }

    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Solver for HttpSolver {
    async fn solve(&self, question: &str) -> Result<SolverAnswer, SolveError> {
        debug!(endpoint = %self.endpoint, "asking solver");

        let resp = self
            .client
            .post(self.endpoint.clone())
            .header("content-type", "application/json")
            .json(&AskRequest {
                text: question.to_string(),
            })
            .send()
            .await?;

        // The body is read as JSON whatever the status says.
        let status = resp.status();
        if !status.is_success() {
            warn!(%status, "solver returned non-success status");
        }

        let bytes = resp.bytes().await?;
        let body: serde_json::Value = serde_json::from_slice(&bytes)?;

        Ok(SolverAnswer::from_json(&body))
    }
}
