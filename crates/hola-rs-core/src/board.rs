//! Form and list view model.
//!
//! [`Board`] owns the greeting store together with the two form fields and
//! the pending flag. Submitting is split into [`Board::begin_submit`], which
//! validates and enters the pending state, and [`Board::complete_submit`],
//! which is called once the simulated latency has elapsed.

use crate::error::SubmitRejected;
use crate::model::Greeting;
use crate::store::GreetingStore;
use chrono::{DateTime, Utc};
use log::{debug, info};

/// Form field that receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Author,
    Body,
}

impl Field {
    /// The other field.
    pub fn toggle(self) -> Self {
        match self {
            Field::Author => Field::Body,
            Field::Body => Field::Author,
        }
    }
}

/// Snapshot of the form taken when a submission starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    ticket: u64,
    author: String,
    body: String,
}

impl Submission {
    /// Ticket identifying this submission.
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// View model for the greeting board.
#[derive(Debug, Clone, Default)]
pub struct Board {
    store: GreetingStore,
    author: String,
    body: String,
    pending: Option<u64>,
    next_ticket: u64,
}

impl Board {
    /// Create a board around an existing store.
    pub fn new(store: GreetingStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    /// Create a board holding the seed records.
    pub fn with_seed(now: DateTime<Utc>) -> Self {
        Self::new(GreetingStore::seeded(now))
    }

    pub fn store(&self) -> &GreetingStore {
        &self.store
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether a submission is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Append a character to a field.
    pub fn push_char(&mut self, field: Field, ch: char) {
        self.field_mut(field).push(ch);
    }

    /// Remove the last character of a field.
    pub fn pop_char(&mut self, field: Field) {
        self.field_mut(field).pop();
    }

    /// Current text of a field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Author => &self.author,
            Field::Body => &self.body,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Author => &mut self.author,
            Field::Body => &mut self.body,
        }
    }

    /// Validate the form and enter the pending state.
    ///
    /// On success the returned [`Submission`] must be handed back to
    /// [`Board::complete_submit`] after the latency elapses.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitRejected> {
        if self.pending.is_some() {
            debug!("submit ignored: already pending");
            return Err(SubmitRejected::Pending);
        }
        let author = self.author.trim();
        if author.is_empty() {
            debug!("submit ignored: empty author");
            return Err(SubmitRejected::EmptyAuthor);
        }
        let body = self.body.trim();
        if body.is_empty() {
            debug!("submit ignored: empty body");
            return Err(SubmitRejected::EmptyBody);
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending = Some(ticket);
        info!(
            "submission pending (ticket={}, author_len={}, body_len={})",
            ticket,
            author.len(),
            body.len()
        );
        Ok(Submission {
            ticket,
            author: author.to_string(),
            body: body.to_string(),
        })
    }

    /// Apply a pending submission: prepend the record, clear the body and
    /// leave the pending state.
    ///
    /// Returns `None` when `submission` is not the one currently pending.
    pub fn complete_submit(
        &mut self,
        submission: Submission,
        now: DateTime<Utc>,
    ) -> Option<&Greeting> {
        if self.pending != Some(submission.ticket) {
            debug!(
                "ignoring stale submission (ticket={}, pending={:?})",
                submission.ticket, self.pending
            );
            return None;
        }
        self.pending = None;
        self.body.clear();
        let greeting = Greeting::new(submission.author, submission.body, now);
        info!(
            "submission completed (ticket={}, id={})",
            submission.ticket,
            greeting.id()
        );
        Some(self.store.prepend(greeting))
    }
}
