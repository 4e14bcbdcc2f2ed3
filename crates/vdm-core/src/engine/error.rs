//! Engine error types.

use std::io;
use thiserror::Error;

/// Returned by the progress hook to make the engine stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("download cancelled by user")]
pub struct HookAborted;

/// Failure of a metadata fetch or download, surfaced to the observer as
/// the `Finished` message.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine binary could not be located.
    #[error("{0} not found on PATH; install it or set ytdlp_path in the config")]
    NotFound(String),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("engine I/O error: {0}")]
    Io(#[from] io::Error),

    /// Metadata output was not the expected JSON document.
    #[error("could not parse metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    /// Engine ran and reported failure (extraction, network, retries exhausted).
    #[error("{message}")]
    Failed { code: Option<i32>, message: String },

    /// The progress hook asked the engine to stop.
    #[error(transparent)]
    Aborted(#[from] HookAborted),
}

impl EngineError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, EngineError::Aborted(_))
    }
}
