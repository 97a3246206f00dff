//! The question form view-model.
//!
//! Two fields, question text and answer text, changed only through the
//! methods below. Asking is split in two so several requests can be in
//! flight at once: [`QuestionForm::on_ask`] hands out an [`AskTicket`], the
//! ticket is sent to a [`Solver`] anywhere (another task, say), and the
//! resulting [`Completion`] is given back to [`QuestionForm::complete`].
//!
//! Completions are ordered by sequence number, not arrival. One that comes
//! back after a newer request was issued is dropped.

use tracing::{debug, warn};

use crate::events::{EventBus, FormEvent};
use crate::render::FormView;
use crate::solver::{SolveError, Solver, SolverAnswer};

/// A request the form has issued but not yet seen the result of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskTicket {
    pub seq: u64,
    pub question: String,
}

impl AskTicket {
    /// Make exactly one solver call for this ticket.
    pub async fn send(self, solver: &dyn Solver) -> Completion {
        let outcome = solver.solve(&self.question).await;
        Completion {
            seq: self.seq,
            outcome,
        }
    }
}

/// The result of a sent ticket, ready to be applied to the form.
#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    pub outcome: Result<SolverAnswer, SolveError>,
}

/// What [`QuestionForm::complete`] did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

#[derive(Debug, Default)]
pub struct QuestionForm {
    question: String,
    answer: String,
    context: Option<String>,
    latest_seq: u64,
    in_flight: usize,
    events: EventBus,
}

impl QuestionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Context the solver sent with the current answer, if any.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Sequence number of the newest issued request (0 before the first).
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Requests issued whose completions have not come back yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    pub fn view(&self) -> FormView<'_> {
        FormView {
            question: &self.question,
            answer: &self.answer,
        }
    }

    /// Replace question text verbatim.
    pub fn on_question_change(&mut self, text: impl Into<String>) {
        self.question = text.into();
        self.events.emit(FormEvent::QuestionChanged {
            text: self.question.clone(),
        });
    }

    /// Issue a request for the current question, or nothing if it is empty.
    pub fn on_ask(&mut self) -> Option<AskTicket> {
        if self.question.is_empty() {
            return None;
        }
        self.latest_seq += 1;
        self.in_flight += 1;
        debug!(seq = self.latest_seq, "question submitted");
        Some(AskTicket {
            seq: self.latest_seq,
            question: self.question.clone(),
        })
    }

    /// Apply a completion unless a newer request has been issued since.
    pub fn complete(&mut self, completion: Completion) -> Resolution {
        let Completion { seq, outcome } = completion;
        self.in_flight = self.in_flight.saturating_sub(1);

        if seq < self.latest_seq {
            debug!(seq, latest = self.latest_seq, "discarding stale completion");
            self.events.emit(FormEvent::StaleDiscarded {
                seq,
                latest: self.latest_seq,
            });
            return Resolution::Stale;
        }

        match outcome {
            Ok(reply) => {
                self.answer = reply.answer;
                self.context = reply.context;
            }
            Err(e) => {
                warn!(seq, error = %e, "ask failed");
                self.answer = e.user_message().to_string();
                self.context = None;
            }
        }

        self.events.emit(FormEvent::AnswerChanged {
            seq,
            answer: self.answer.clone(),
        });
        Resolution::Applied
    }

    /// Submit, wait for the solver, and apply. `None` when nothing was sent.
    pub async fn ask(&mut self, solver: &dyn Solver) -> Option<Resolution> {
        let ticket = self.on_ask()?;
        let completion = ticket.send(solver).await;
        Some(self.complete(completion))
    }
}
