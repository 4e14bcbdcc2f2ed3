//! Boundary to the external fetch engine.
//!
//! The engine does all site extraction, fragment retrieval and muxing. This
//! crate only hands it an [`EngineOptions`] bag and a progress hook, and
//! expects two blocking calls: fetch metadata, then download. An `Err` from
//! the hook must make `download` fail; that is how cancellation reaches the
//! engine.

mod error;
pub mod ytdlp;

pub use error::{EngineError, HookAborted};
pub use ytdlp::YtDlpEngine;

use std::path::PathBuf;

/// Configuration bag handed to the engine for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Output path template, e.g. `<dir>/%(title)s [%(id)s].%(ext)s`.
    pub output_template: PathBuf,
    /// Retries for a whole item.
    pub retries: u32,
    /// Retries for a single fragment.
    pub fragment_retries: u32,
    /// Fragments fetched concurrently.
    pub concurrent_fragments: u32,
    /// Container the streams are merged into (e.g. "mp4").
    pub merge_output_format: String,
    /// Only fetch the single item even if the URL points at a collection.
    pub no_playlist: bool,
    /// Cookies file injected into every engine request.
    pub cookies_file: Option<PathBuf>,
}

/// Phase reported by one hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Downloading,
    /// Raw download of one file is done; post-processing may follow.
    Finished,
    Error,
    Other(String),
}

impl Phase {
    pub fn parse(s: &str) -> Self {
        match s {
            "downloading" => Phase::Downloading,
            "finished" => Phase::Finished,
            "error" => Phase::Error,
            other => Phase::Other(other.to_string()),
        }
    }
}

/// Raw, best-effort progress snapshot as pushed by the engine.
///
/// Any field may be missing: live streams and chunked transfers have no
/// known size, and speed/ETA are only reported once the engine has samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub phase: Phase,
    pub filename: Option<String>,
    pub downloaded_bytes: Option<u64>,
    pub total_bytes: Option<u64>,
    pub total_bytes_estimate: Option<u64>,
    /// Bytes per second.
    pub speed: Option<f64>,
    /// Seconds remaining.
    pub eta: Option<u64>,
}

impl ProgressUpdate {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            filename: None,
            downloaded_bytes: None,
            total_bytes: None,
            total_bytes_estimate: None,
            speed: None,
            eta: None,
        }
    }

    /// A `downloading` tick with the two byte counters set.
    pub fn downloading(downloaded: u64, total: Option<u64>) -> Self {
        Self {
            downloaded_bytes: Some(downloaded),
            total_bytes: total,
            ..Self::new(Phase::Downloading)
        }
    }

    pub fn finished() -> Self {
        Self::new(Phase::Finished)
    }

    /// Exact total if known, else the engine's estimate. Zero counts as unknown.
    pub fn known_total(&self) -> Option<u64> {
        self.total_bytes
            .filter(|t| *t > 0)
            .or(self.total_bytes_estimate.filter(|t| *t > 0))
    }
}

/// What the metadata fetch learned about a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaInfo {
    pub title: Option<String>,
    pub id: Option<String>,
    /// Number of entries when the URL resolved to a playlist or collection.
    pub entry_count: Option<usize>,
}

/// Progress hook the engine invokes synchronously on the job thread.
pub type ProgressHook<'a> = dyn FnMut(&ProgressUpdate) -> Result<(), HookAborted> + 'a;

/// A media extraction and download engine.
///
/// Both calls block for the whole operation and run on the job thread,
/// never on the observer's.
pub trait Engine: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Resolve the URL without downloading, so bad URLs fail early.
    fn fetch_metadata(&self, opts: &EngineOptions, url: &str) -> Result<MediaInfo, EngineError>;

    /// Download (and merge) everything the URL resolves to, calling `hook`
    /// as progress is made. Must return `EngineError::Aborted` once the hook
    /// returns `Err`.
    fn download(
        &self,
        opts: &EngineOptions,
        url: &str,
        hook: &mut ProgressHook<'_>,
    ) -> Result<(), EngineError>;
}
