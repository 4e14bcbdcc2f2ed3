//! Errors raised synchronously by `JobController::start`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Start failed; no job thread was launched and no event will be sent.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("URL must not be empty")]
    EmptyUrl,

    #[error("output directory must not be empty")]
    EmptyOutputDir,

    #[error("cannot create output directory {}: {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot start job thread: {0}")]
    Spawn(#[source] io::Error),
}
