use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::{SolveError, Solver, SolverAnswer};

/// What the mock does for one question.
#[derive(Debug, Clone)]
enum Script {
    Answer(SolverAnswer),
    Fail(String),
}

/// A scripted solver for tests. Replies per question, optionally after a
/// delay, and records every question it was asked.
#[derive(Default)]
pub struct MockSolver {
    scripts: HashMap<String, Script>,
    delays: HashMap<String, Duration>,
    asked: Mutex<Vec<String>>,
}

impl MockSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `question` with `answer`.
    pub fn answer(mut self, question: &str, answer: &str) -> Self {
        self.scripts.insert(
            question.to_string(),
            Script::Answer(SolverAnswer {
                answer: answer.to_string(),
                context: None,
            }),
        );
        self
    }

    /// Reply to `question` with a full [`SolverAnswer`].
    pub fn reply(mut self, question: &str, reply: SolverAnswer) -> Self {
        self.scripts
            .insert(question.to_string(), Script::Answer(reply));
        self
    }

    /// Fail `question` with [`SolveError::Rejected`].
    pub fn fail(mut self, question: &str, reason: &str) -> Self {
        self.scripts
            .insert(question.to_string(), Script::Fail(reason.to_string()));
        self
    }

    /// Hold the reply to `question` for `delay`.
    pub fn delay(mut self, question: &str, delay: Duration) -> Self {
        self.delays.insert(question.to_string(), delay);
        self
    }

    /// Questions received so far, in call order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.asked.lock().unwrap().len()
    }
}

#[async_trait]
impl Solver for MockSolver {
    async fn solve(&self, question: &str) -> Result<SolverAnswer, SolveError> {
        self.asked.lock().unwrap().push(question.to_string());

        if let Some(delay) = self.delays.get(question) {
            tokio::time::sleep(*delay).await;
        }

        match self.scripts.get(question) {
            Some(Script::Answer(answer)) => Ok(answer.clone()),
            Some(Script::Fail(reason)) => Err(SolveError::Rejected(reason.clone())),
            None => Err(SolveError::Rejected(format!(
                "MockSolver: no script for {question:?}"
            ))),
        }
    }
}
