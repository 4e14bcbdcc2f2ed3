//! Command-line arguments for yt-dlp.

use std::ffi::OsString;

use crate::engine::EngineOptions;

/// Marker at the start of every machine-readable progress line.
pub(super) const PROGRESS_PREFIX: &str = "vdm|";

/// One line per hook tick. Filename goes last since it may contain `|`.
pub(super) const PROGRESS_TEMPLATE: &str = "download:vdm|%(progress.status)s|%(progress.downloaded_bytes)s|%(progress.total_bytes)s|%(progress.total_bytes_estimate)s|%(progress.speed)s|%(progress.eta)s|%(progress.filename)s";

fn push_common(args: &mut Vec<OsString>, opts: &EngineOptions) {
    args.push("--no-warnings".into());
    args.push(if opts.no_playlist {
        "--no-playlist".into()
    } else {
        "--yes-playlist".into()
    });
    if let Some(ref cookies) = opts.cookies_file {
        args.push("--cookies".into());
        args.push(cookies.into());
    }
}

/// Arguments for resolving a URL without downloading.
pub(super) fn metadata_args(opts: &EngineOptions, url: &str) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--dump-single-json".into(),
        "--flat-playlist".into(),
        "--skip-download".into(),
    ];
    push_common(&mut args, opts);
    args.push("--".into());
    args.push(url.into());
    args
}

/// Arguments for the actual download.
pub(super) fn download_args(opts: &EngineOptions, url: &str) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-o".into(),
        opts.output_template.clone().into(),
        "--retries".into(),
        opts.retries.to_string().into(),
        "--fragment-retries".into(),
        opts.fragment_retries.to_string().into(),
        "--concurrent-fragments".into(),
        opts.concurrent_fragments.to_string().into(),
        "--merge-output-format".into(),
        opts.merge_output_format.clone().into(),
        "--newline".into(),
        "--progress-template".into(),
        PROGRESS_TEMPLATE.into(),
    ];
    push_common(&mut args, opts);
    args.push("--".into());
    args.push(url.into());
    args
}
