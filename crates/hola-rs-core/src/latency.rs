//! Simulated network latency.
//!
//! A [`LatencyTask`] sleeps for a fixed delay and then posts a value back to
//! the owning event loop. The task is aborted when the handle is dropped, so
//! an owner that goes away mid-delay never receives a late update.

use log::debug;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default artificial delay applied to submissions.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(800);

/// Handle to a delayed delivery, cancelled on drop.
#[derive(Debug)]
pub struct LatencyTask {
    handle: JoinHandle<()>,
}

impl LatencyTask {
    /// Spawn a task delivering `value` on `sender` after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<T>(delay: Duration, value: T, sender: mpsc::Sender<T>) -> Self
    where
        T: Send + 'static,
    {
        debug!("scheduling delayed delivery (delay_ms={})", delay.as_millis());
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if sender.send(value).await.is_err() {
                debug!("delayed delivery dropped: receiver closed");
            }
        });
        Self { handle }
    }

    /// Whether the delivery has already happened (or the task was aborted).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the delivery explicitly.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for LatencyTask {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!("aborting pending delayed delivery");
            self.handle.abort();
        }
    }
}
