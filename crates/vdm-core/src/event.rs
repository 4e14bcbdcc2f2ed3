//! Events relayed from the job thread to the observer.
//!
//! The job thread only ever pushes into an unbounded channel, so a slow or
//! absent observer never stalls the engine. The observer drains [`JobEvents`]
//! on its own schedule: `recv().await` from async code, `blocking_recv()` from
//! a plain thread, or `try_recv()` from a UI loop.

use tokio::sync::mpsc;

/// One event of a job's event stream.
///
/// `Progress`, `Status` and `Log` may appear any number of times in any
/// order. `Finished` appears exactly once and is always last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Best-effort completion percentage, 0..=100.
    Progress { percent: u8 },
    /// Short human-readable status line (replaces the previous one).
    Status { text: String },
    /// Verbose line for an append-only log view.
    Log { text: String },
    /// Terminal outcome of the job.
    Finished { success: bool, message: String },
}

impl ProgressEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProgressEvent::Finished { .. })
    }
}

pub(crate) type EventSender = mpsc::UnboundedSender<ProgressEvent>;

/// Receiving half of a job's event stream. Yields `None` once `Finished`
/// has been delivered and the job thread has let go of its sender.
#[derive(Debug)]
pub struct JobEvents {
    rx: mpsc::UnboundedReceiver<ProgressEvent>,
}

pub(crate) fn channel() -> (EventSender, JobEvents) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, JobEvents { rx })
}

impl JobEvents {
    pub async fn recv(&mut self) -> Option<ProgressEvent> {
        self.rx.recv().await
    }

    /// Block the current thread until the next event. Must not be called
    /// from inside an async runtime.
    pub fn blocking_recv(&mut self) -> Option<ProgressEvent> {
        self.rx.blocking_recv()
    }

    /// Next queued event, or `None` if nothing is queued right now.
    pub fn try_recv(&mut self) -> Option<ProgressEvent> {
        self.rx.try_recv().ok()
    }

    /// Block until the stream ends and return every remaining event.
    pub fn collect_blocking(mut self) -> Vec<ProgressEvent> {
        let mut out = Vec::new();
        while let Some(ev) = self.blocking_recv() {
            out.push(ev);
        }
        out
    }
}
