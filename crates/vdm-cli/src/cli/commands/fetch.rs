//! `vdm fetch <url>` – run one job and render its events on the terminal.
//!
//! Ctrl-C sets the job's cancel flag; the job then ends with a failed
//! `Finished` at the engine's next progress tick. A second Ctrl-C exits
//! right away without waiting for the job.

use anyhow::{bail, Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use vdm_core::config::VdmConfig;
use vdm_core::{JobController, JobRequest, ProgressEvent};

/// Terminal rendering state: one rewritten progress line, log lines above it.
#[derive(Debug, Default)]
pub(crate) struct ProgressView {
    percent: Option<u8>,
    status: String,
    line_open: bool,
}

impl ProgressView {
    /// `[ 51%] status`, or `[ --%] status` before the first percentage.
    pub(crate) fn progress_line(&self) -> String {
        match self.percent {
            Some(p) => format!("[{:>3}%] {}", p, self.status),
            None => format!("[ --%] {}", self.status),
        }
    }

    /// Apply one event; returns the terminal outcome for `Finished`.
    pub(crate) fn apply(
        &mut self,
        event: ProgressEvent,
        out: &mut impl Write,
    ) -> io::Result<Option<(bool, String)>> {
        match event {
            ProgressEvent::Progress { percent } => {
                self.percent = Some(percent);
                self.redraw(out)?;
            }
            ProgressEvent::Status { text } => {
                self.status = text;
                self.redraw(out)?;
            }
            ProgressEvent::Log { text } => {
                self.close_line(out)?;
                writeln!(out, "  {}", text)?;
            }
            ProgressEvent::Finished { success, message } => {
                self.close_line(out)?;
                let mark = if success { "done" } else { "failed" };
                writeln!(out, "{}: {}", mark, message)?;
                return Ok(Some((success, message)));
            }
        }
        out.flush()?;
        Ok(None)
    }

    fn redraw(&mut self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "\r\x1b[2K{}", self.progress_line())?;
        self.line_open = true;
        Ok(())
    }

    fn close_line(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.line_open {
            writeln!(out)?;
            self.line_open = false;
        }
        Ok(())
    }
}

/// Exit status for a forced quit, as a shell reports SIGINT.
const FORCE_QUIT_CODE: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CtrlC {
    Cancel,
    ForceQuit,
}

pub(crate) fn on_ctrl_c(cancel_sent: bool) -> CtrlC {
    if cancel_sent {
        CtrlC::ForceQuit
    } else {
        CtrlC::Cancel
    }
}

pub async fn run_fetch(
    cfg: VdmConfig,
    url: &str,
    out_dir: PathBuf,
    cookies: Option<PathBuf>,
) -> Result<()> {
    let mut request = JobRequest::new(url, out_dir);
    if let Some(path) = cookies {
        request = request.with_cookies_file(path);
    }

    let controller = JobController::with_ytdlp(cfg).context("cannot use yt-dlp")?;
    tracing::debug!(config = ?controller.config(), "controller ready");
    let (handle, mut events) = controller.start(request)?;

    let mut view = ProgressView::default();
    let mut stdout = io::stdout();
    let mut outcome = None;
    let mut cancel_sent = false;
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    if let Some(done) = view.apply(event, &mut stdout)? {
                        outcome = Some(done);
                    }
                }
                None => break,
            },
            res = tokio::signal::ctrl_c() => {
                res.context("listening for Ctrl-C")?;
                match on_ctrl_c(cancel_sent) {
                    CtrlC::Cancel => {
                        handle.cancel();
                        cancel_sent = true;
                        eprintln!("\ncancelling, waiting for yt-dlp to stop (Ctrl-C again to quit)...");
                    }
                    CtrlC::ForceQuit => {
                        tracing::warn!("second Ctrl-C, exiting without waiting for the job");
                        eprintln!("\naborted");
                        std::process::exit(FORCE_QUIT_CODE);
                    }
                }
            }
        }
    }

    tokio::task::spawn_blocking(move || handle.join())
        .await
        .context("job thread join")?;

    match outcome {
        Some((true, _)) => Ok(()),
        Some((false, message)) => bail!("download failed: {}", message),
        None => bail!("job ended without a result"),
    }
}
