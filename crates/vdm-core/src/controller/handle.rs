//! Handle to the one in-flight job.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Owns the job thread and the cancel flag it polls.
///
/// Dropping the handle detaches the thread; the job still runs to its
/// `Finished` event.
pub struct JobHandle {
    cancel: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl JobHandle {
    pub(super) fn new(cancel: Arc<AtomicBool>, thread: JoinHandle<()>) -> Self {
        Self {
            cancel,
            thread: Some(thread),
        }
    }

    /// Ask the job to stop at the engine's next progress tick. Non-blocking
    /// and idempotent; the flag never goes back to false.
    pub fn cancel(&self) {
        if !self.cancel.swap(true, Ordering::AcqRel) {
            tracing::info!("cancel requested, waiting for engine to stop");
        }
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    /// True once the job thread has returned (its `Finished` event is queued).
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Block until the job thread returns.
    pub fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("job thread panicked outside the job boundary");
            }
        }
    }
}

impl fmt::Debug for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobHandle")
            .field("cancel_requested", &self.is_cancel_requested())
            .field("finished", &self.is_finished())
            .finish()
    }
}
