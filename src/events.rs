//! Change notifications for the question form.
//!
//! The form emits via [`EventBus::emit`] whenever one of its fields changes;
//! the render side subscribes via [`EventBus::subscribe`]. Built on
//! [`tokio::sync::broadcast`] so several listeners can react independently.

use tokio::sync::broadcast;

/// Events that flow out of a [`QuestionForm`](crate::form::QuestionForm).
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Question text was replaced.
    QuestionChanged { text: String },
    /// A completion was applied and answer text was replaced.
    AnswerChanged { seq: u64, answer: String },
    /// A completion arrived after a newer request was issued and was dropped.
    StaleDiscarded { seq: u64, latest: u64 },
}

/// A broadcast channel that any component can emit to or subscribe from.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<FormEvent>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all current subscribers.
    /// Returns the number of receivers that will see it.
    pub fn emit(&self, event: FormEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events. Returns a receiver that yields all
    /// future events (does not replay past ones).
    pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
