//! Core view model for the Hola greeting board.
//!
//! Holds the in-memory greeting store, the form/list [`Board`], the
//! simulated-latency task, and the pure list projection used by front-ends.

pub mod board;
pub mod error;
pub mod latency;
pub mod model;
pub mod store;
pub mod view;

/// Form/list view model and submission snapshot.
pub use board::{Board, Field, Submission};
/// Submission rejection reasons.
pub use error::SubmitRejected;
/// Delayed delivery handle.
pub use latency::{DEFAULT_SUBMIT_DELAY, LatencyTask};
/// Greeting record.
pub use model::Greeting;
/// Greeting store.
pub use store::GreetingStore;
/// List projection.
pub use view::{DEFAULT_TIME_FORMAT, EMPTY_PLACEHOLDER, GreetingView, project};
