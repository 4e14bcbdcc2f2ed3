//! Progress relay: turns raw engine hook ticks into [`ProgressEvent`]s.
//!
//! The relay lives on the job thread. It is the only place that reads the
//! cancel flag, and it is consumed by [`ProgressRelay::finish`] so nothing
//! can be sent after `Finished`.

mod format;

pub use format::{percent, percent_of, status_line};

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::engine::{HookAborted, Phase, ProgressUpdate};
use crate::event::{EventSender, ProgressEvent};

pub const COMPLETE_MESSAGE: &str = "download complete";

pub struct ProgressRelay {
    cancel: Arc<AtomicBool>,
    tx: EventSender,
    cancel_seen: bool,
}

impl ProgressRelay {
    pub(crate) fn new(cancel: Arc<AtomicBool>, tx: EventSender) -> Self {
        Self {
            cancel,
            tx,
            cancel_seen: false,
        }
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    // A dropped observer is not an error: the job still runs to completion.
    fn emit(&self, event: ProgressEvent) {
        let _ = self.tx.send(event);
    }

    pub fn progress(&self, percent: u8) {
        self.emit(ProgressEvent::Progress {
            percent: percent.min(100),
        });
    }

    pub fn status(&self, text: impl Into<String>) {
        self.emit(ProgressEvent::Status { text: text.into() });
    }

    pub fn log(&self, text: impl Into<String>) {
        self.emit(ProgressEvent::Log { text: text.into() });
    }

    /// `Err` once cancellation was requested. Logs the request once.
    pub fn check_cancel(&mut self) -> Result<(), HookAborted> {
        if !self.is_cancel_requested() {
            return Ok(());
        }
        if !self.cancel_seen {
            self.cancel_seen = true;
            tracing::info!("cancellation observed on job thread");
            self.log("cancellation requested, waiting for engine to stop");
        }
        Err(HookAborted)
    }

    /// Hook body: cancel check first, then map the tick to events.
    pub fn on_update(&mut self, update: &ProgressUpdate) -> Result<(), HookAborted> {
        self.check_cancel()?;
        match update.phase {
            Phase::Downloading => {
                // Unknown total: keep the last percentage, still report status.
                if let Some(pct) = percent(update) {
                    self.progress(pct);
                }
                self.status(status_line(update));
            }
            Phase::Finished => {
                self.progress(100);
                self.status("download finished, post-processing/merging...");
                self.log("file downloaded, waiting for post-processing");
            }
            Phase::Error | Phase::Other(_) => {}
        }
        Ok(())
    }

    /// Emit the single terminal event and close the stream.
    pub fn finish<E: fmt::Display>(self, outcome: Result<(), E>) {
        let event = match outcome {
            Ok(()) => ProgressEvent::Finished {
                success: true,
                message: COMPLETE_MESSAGE.to_string(),
            },
            Err(e) => ProgressEvent::Finished {
                success: false,
                message: e.to_string(),
            },
        };
        self.emit(event);
    }
}

impl fmt::Debug for ProgressRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressRelay")
            .field("cancel_requested", &self.is_cancel_requested())
            .field("cancel_seen", &self.cancel_seen)
            .finish()
    }
}
