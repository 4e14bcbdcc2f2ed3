//! Integration tests: job lifecycle against a fake `yt-dlp` executable.
//!
//! Exercises the real subprocess path: argument passing, progress template
//! parsing, cancellation killing the process group, and error surfacing.
#![cfg(unix)]

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::fake_ytdlp;
use tempfile::tempdir;
use vdm_core::config::VdmConfig;
use vdm_core::engine::YtDlpEngine;
use vdm_core::{JobController, JobRequest, ProgressEvent};

const CLIP_JSON: &str = r#"{"id":"BV1fake","title":"Fake Clip"}"#;

fn controller(program: std::path::PathBuf) -> JobController {
    let cfg = VdmConfig {
        ytdlp_path: Some(program.clone()),
        ..VdmConfig::default()
    };
    JobController::new(cfg, Arc::new(YtDlpEngine::new(program)))
}

#[test]
fn full_job_through_ytdlp_script() {
    let bin = tempdir().unwrap();
    let out = tempdir().unwrap();
    // Arguments are echoed to a file so the test can check what the engine received.
    let args_file = bin.path().join("args.txt");
    let program = fake_ytdlp::write(
        bin.path(),
        CLIP_JSON,
        &format!(
            r#"printf '%s\n' "$@" > '{}'
echo '[info] BV1fake: Downloading 1 format(s): 80'
echo 'vdm|downloading|500000|1000000|NA|2097152|1|{out}/Fake Clip [BV1fake].mp4'
echo 'vdm|finished|1000000|1000000|NA|NA|NA|{out}/Fake Clip [BV1fake].mp4'
echo '[Merger] Merging formats'"#,
            args_file.display(),
            out = out.path().display()
        ),
    );

    let (handle, events) = controller(program)
        .start(
            JobRequest::new("https://example.com/video/BV1fake", out.path())
                .with_cookies_file("/home/me/cookies.txt"),
        )
        .unwrap();
    let events = events.collect_blocking();
    handle.join();

    assert_eq!(
        events.last(),
        Some(&ProgressEvent::Finished {
            success: true,
            message: "download complete".into()
        })
    );
    assert!(events.contains(&ProgressEvent::Status {
        text: "resolved: Fake Clip".into()
    }));
    assert!(events.contains(&ProgressEvent::Progress { percent: 50 }));
    assert!(events.contains(&ProgressEvent::Status {
        text: "downloading: Fake Clip [BV1fake].mp4 | 2.00 MiB/s | ETA 1s".into()
    }));
    assert!(events.contains(&ProgressEvent::Progress { percent: 100 }));

    let args = std::fs::read_to_string(&args_file).unwrap();
    let args: Vec<&str> = args.lines().collect();
    let template = format!("{}/%(title)s [%(id)s].%(ext)s", out.path().display());
    assert!(args.contains(&template.as_str()), "{args:?}");
    assert!(args.contains(&"/home/me/cookies.txt"));
    assert!(args.contains(&"--yes-playlist"));
    assert_eq!(args.last(), Some(&"https://example.com/video/BV1fake"));
}

#[test]
fn cancel_mid_download_finishes_promptly() {
    let bin = tempdir().unwrap();
    let out = tempdir().unwrap();
    let program = fake_ytdlp::write(
        bin.path(),
        CLIP_JSON,
        r#"sleep 30 &
i=0
while :; do
  i=$((i+1))
  echo "vdm|downloading|$i|1000000|NA|NA|NA|live.ts"
  sleep 0.2
done"#,
    );

    let (handle, mut events) = controller(program)
        .start(JobRequest::new("https://example.com/live", out.path()))
        .unwrap();

    // Wait for the first tick so cancellation lands mid-download.
    loop {
        match events.blocking_recv() {
            Some(ProgressEvent::Progress { .. }) => break,
            Some(ev) => assert!(!ev.is_terminal(), "{ev:?}"),
            None => panic!("stream ended before any progress"),
        }
    }
    let cancelled_at = Instant::now();
    handle.cancel();
    let rest = events.collect_blocking();
    handle.join();

    assert!(
        cancelled_at.elapsed() < Duration::from_secs(10),
        "cancel took {:?}",
        cancelled_at.elapsed()
    );
    assert_eq!(rest.iter().filter(|e| e.is_terminal()).count(), 1);
    assert_eq!(
        rest.last(),
        Some(&ProgressEvent::Finished {
            success: false,
            message: "download cancelled by user".into()
        })
    );
}

#[test]
fn engine_error_line_becomes_message() {
    let bin = tempdir().unwrap();
    let out = tempdir().unwrap();
    let program = fake_ytdlp::write(
        bin.path(),
        CLIP_JSON,
        r#"echo 'ERROR: [BiliBili] BV1fake: HTTP Error 412: Precondition Failed' >&2
exit 1"#,
    );
    let (_handle, events) = controller(program)
        .start(JobRequest::new("https://example.com/video/BV1fake", out.path()))
        .unwrap();
    let events = events.collect_blocking();
    assert_eq!(
        events.last(),
        Some(&ProgressEvent::Finished {
            success: false,
            message: "ERROR: [BiliBili] BV1fake: HTTP Error 412: Precondition Failed".into()
        })
    );
}
