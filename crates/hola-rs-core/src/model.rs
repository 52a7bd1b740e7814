//! Greeting record model.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Author of the first seed record.
pub const SEED_SYSTEM_AUTHOR: &str = "System";
/// Author of the second seed record.
pub const SEED_DEVELOPER_AUTHOR: &str = "Developer";

/// A single submitted greeting.
///
/// Fields are only reachable through getters, so a record cannot change once
/// it has been built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    id: Uuid,
    created_at: DateTime<Utc>,
    author: String,
    body: String,
}

impl Greeting {
    /// Build a record with a fresh random id.
    pub fn new(
        author: impl Into<String>,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            author: author.into(),
            body: body.into(),
        }
    }

    /// Record identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Author name as submitted.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Message body as submitted.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// The two records a fresh board starts with, newest first.
pub fn seed_greetings(now: DateTime<Utc>) -> Vec<Greeting> {
    vec![
        Greeting::new(
            SEED_SYSTEM_AUTHOR,
            "Welcome! This is a demo board without any database.",
            now,
        ),
        Greeting::new(
            SEED_DEVELOPER_AUTHOR,
            "All state lives in local memory and disappears on exit.",
            now - Duration::minutes(5),
        ),
    ]
}
