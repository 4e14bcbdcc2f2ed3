//! yt-dlp subprocess engine.
//!
//! Runs `yt-dlp` once with `--dump-single-json` to resolve the URL, then
//! once more to download. Progress comes back over stdout through a
//! `--progress-template` line per tick; every other stdout line goes to
//! the debug log. When the hook asks to stop, the child's whole process
//! group is killed, so helpers it started (ffmpeg for HLS) go with it.

mod args;
mod parse;

use std::io::{BufRead, BufReader, Read};
#[cfg(unix)]
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;

use super::{Engine, EngineError, EngineOptions, MediaInfo, ProgressHook};

const PROGRAM: &str = "yt-dlp";

/// Engine backed by an installed `yt-dlp` binary.
#[derive(Debug, Clone)]
pub struct YtDlpEngine {
    program: PathBuf,
}

impl YtDlpEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use the configured binary, or find `yt-dlp` on `PATH`.
    pub fn locate(configured: Option<&Path>) -> Result<Self, EngineError> {
        match configured {
            Some(path) => Ok(Self::new(path)),
            None => which::which(PROGRAM)
                .map(Self::new)
                .map_err(|_| EngineError::NotFound(PROGRAM.to_string())),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.stdin(Stdio::null());
        #[cfg(unix)]
        cmd.process_group(0);
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> EngineError {
        EngineError::Spawn {
            program: self.program.display().to_string(),
            source,
        }
    }
}

fn failure(code: Option<i32>, stderr: &str) -> EngineError {
    let message = parse::error_summary(stderr).unwrap_or_else(|| match code {
        Some(c) => format!("{PROGRAM} exited with status {c}"),
        None => format!("{PROGRAM} was terminated by a signal"),
    });
    EngineError::Failed { code, message }
}

#[cfg(unix)]
fn kill_group(child: &Child) {
    if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
        // The child leads its own group (process_group(0)); a negative pid
        // signals every member.
        unsafe {
            libc::kill(-pgid, libc::SIGKILL);
        }
    }
}

#[cfg(not(unix))]
fn kill_group(_child: &Child) {}

/// Kill the child and its group, then reap it; errors mean it already exited.
fn stop_child(child: &mut Child) {
    kill_group(child);
    let _ = child.kill();
    let _ = child.wait();
}

impl Engine for YtDlpEngine {
    fn name(&self) -> &str {
        PROGRAM
    }

    fn fetch_metadata(&self, opts: &EngineOptions, url: &str) -> Result<MediaInfo, EngineError> {
        tracing::debug!(program = %self.program.display(), url, "resolving metadata");
        let output = self
            .command()
            .args(args::metadata_args(opts, url))
            .output()
            .map_err(|e| self.spawn_error(e))?;
        if !output.status.success() {
            return Err(failure(
                output.status.code(),
                &String::from_utf8_lossy(&output.stderr),
            ));
        }
        let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        Ok(parse::media_info(&value))
    }

    fn download(
        &self,
        opts: &EngineOptions,
        url: &str,
        hook: &mut ProgressHook<'_>,
    ) -> Result<(), EngineError> {
        let mut child = self
            .command()
            .args(args::download_args(opts, url))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;
        tracing::debug!(pid = child.id(), url, "yt-dlp download started");

        let (Some(stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take()) else {
            stop_child(&mut child);
            return Err(EngineError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "child pipes not captured",
            )));
        };

        // Drain stderr concurrently so a chatty child never blocks on a full pipe.
        // On abort the drainer is detached, not joined: a grandchild may still
        // hold the pipe open.
        let stderr_reader = thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        });

        let mut stdout = BufReader::new(stdout);
        let mut raw = Vec::new();
        loop {
            raw.clear();
            match stdout.read_until(b'\n', &mut raw) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    stop_child(&mut child);
                    return Err(e.into());
                }
            }
            // Titles and chatter are not always UTF-8.
            let line = String::from_utf8_lossy(&raw);
            match parse::progress_line(&line) {
                Some(update) => {
                    if let Err(aborted) = hook(&update) {
                        tracing::info!(pid = child.id(), "progress hook aborted; killing yt-dlp");
                        stop_child(&mut child);
                        return Err(aborted.into());
                    }
                }
                None => tracing::debug!("{}", line.trim_end()),
            }
        }

        let status = child.wait()?;
        let stderr = stderr_reader.join().unwrap_or_default();
        if status.success() {
            Ok(())
        } else {
            Err(failure(status.code(), &stderr))
        }
    }
}
