//! TUI event types.

use crossterm::event::KeyEvent;
use hola_rs_core::Submission;

/// Event delivered to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event.
    Input(KeyEvent),
    /// Periodic tick driving the pending spinner.
    Tick,
    /// Scroll event in the greeting list.
    Scroll(i16),
    /// Simulated latency elapsed for a submission.
    SubmissionReady(Submission),
}
