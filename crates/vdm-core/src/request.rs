//! A single fetch request as entered by the user.

use std::path::PathBuf;

use crate::controller::StartError;

/// URL, output directory and optional cookies file for one job.
///
/// Copied into the job thread at start and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    /// Page URL handed to the engine (video, playlist or collection).
    pub url: String,
    /// Directory the engine writes into; created if absent.
    pub output_dir: PathBuf,
    /// Netscape-format cookies file for sites that need a login.
    pub cookies_file: Option<PathBuf>,
}

impl JobRequest {
    pub fn new(url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            output_dir: output_dir.into(),
            cookies_file: None,
        }
    }

    /// Attach a cookies file. An empty path means "no cookies".
    pub fn with_cookies_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.cookies_file = if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        };
        self
    }

    /// Reject requests that must never reach the job thread.
    pub fn validate(&self) -> Result<(), StartError> {
        if self.url.trim().is_empty() {
            return Err(StartError::EmptyUrl);
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(StartError::EmptyOutputDir);
        }
        Ok(())
    }
}
