//! Error types for board submissions.

use thiserror::Error;

/// Reasons a submit request did not start.
///
/// These never reach the user; the form simply does nothing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Author field is empty after trimming.
    #[error("author is empty")]
    EmptyAuthor,
    /// Body field is empty after trimming.
    #[error("body is empty")]
    EmptyBody,
    /// Another submission is still in flight.
    #[error("a submission is already pending")]
    Pending,
}
