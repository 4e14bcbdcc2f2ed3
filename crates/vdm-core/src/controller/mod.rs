//! Job controller: turns a [`JobRequest`] into a running job thread.
//!
//! One job at a time. The controller does not queue or guard against a
//! second `start` while a job runs; the observer disables its start action
//! until `Finished` arrives.

mod error;
mod handle;
mod job;

pub use error::StartError;
pub use handle::JobHandle;

use std::fs;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;

use crate::config::VdmConfig;
use crate::engine::{Engine, EngineError, EngineOptions, YtDlpEngine};
use crate::event::{self, JobEvents};
use crate::relay::ProgressRelay;
use crate::request::JobRequest;

pub struct JobController {
    config: VdmConfig,
    engine: Arc<dyn Engine>,
}

impl JobController {
    pub fn new(config: VdmConfig, engine: Arc<dyn Engine>) -> Self {
        Self { config, engine }
    }

    /// Controller backed by the `yt-dlp` binary from config or `PATH`.
    pub fn with_ytdlp(config: VdmConfig) -> Result<Self, EngineError> {
        let engine = YtDlpEngine::locate(config.ytdlp_path.as_deref())?;
        tracing::debug!(program = %engine.program().display(), "using yt-dlp");
        Ok(Self::new(config, Arc::new(engine)))
    }

    pub fn config(&self) -> &VdmConfig {
        &self.config
    }

    /// Build the engine configuration bag for one request.
    pub fn engine_options(&self, request: &JobRequest) -> EngineOptions {
        EngineOptions {
            output_template: request.output_dir.join(&self.config.output_template),
            retries: self.config.retries,
            fragment_retries: self.config.fragment_retries,
            concurrent_fragments: self.config.concurrent_fragments.max(1),
            merge_output_format: self.config.merge_output_format.clone(),
            no_playlist: self.config.no_playlist,
            cookies_file: request.cookies_file.clone(),
        }
    }

    /// Validate, create the output directory, and launch the job thread.
    ///
    /// Returns immediately. Errors are synchronous and mean nothing was
    /// started; everything after that arrives as events, ending in
    /// exactly one `Finished`.
    pub fn start(&self, request: JobRequest) -> Result<(JobHandle, JobEvents), StartError> {
        request.validate()?;
        fs::create_dir_all(&request.output_dir).map_err(|source| StartError::CreateOutputDir {
            path: request.output_dir.clone(),
            source,
        })?;

        let opts = self.engine_options(&request);
        let cancel = Arc::new(AtomicBool::new(false));
        let (tx, events) = event::channel();
        let relay = ProgressRelay::new(Arc::clone(&cancel), tx);
        let engine = Arc::clone(&self.engine);
        let url = request.url.clone();

        let thread = thread::Builder::new()
            .name("vdm-job".into())
            .spawn(move || job::run_job(engine.as_ref(), &request, &opts, relay))
            .map_err(StartError::Spawn)?;

        tracing::info!(url = %url, engine = self.engine.name(), "job started");
        Ok((JobHandle::new(cancel, thread), events))
    }
}
