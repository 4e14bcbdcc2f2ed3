//! Body of the job thread: metadata, download, terminal event.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::engine::{Engine, EngineError, EngineOptions};
use crate::relay::ProgressRelay;
use crate::request::JobRequest;

/// Runs one job to completion. Every path, including an engine panic, ends
/// in exactly one `Finished` event.
pub(super) fn run_job(
    engine: &dyn Engine,
    request: &JobRequest,
    opts: &EngineOptions,
    mut relay: ProgressRelay,
) {
    relay.log(format!("starting download: {}", request.url));
    relay.log(format!("output directory: {}", request.output_dir.display()));
    if let Some(ref cookies) = request.cookies_file {
        relay.log(format!("using cookies: {}", cookies.display()));
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        fetch(engine, request, opts, &mut relay)
    }));
    let outcome = match outcome {
        Ok(Ok(())) => {
            tracing::info!(url = %request.url, "job completed");
            Ok(())
        }
        Ok(Err(e)) if e.is_aborted() => {
            tracing::info!(url = %request.url, "job cancelled");
            Err(e.to_string())
        }
        Ok(Err(e)) => {
            tracing::warn!(url = %request.url, error = %e, "job failed");
            Err(e.to_string())
        }
        Err(payload) => {
            let message = format!(
                "{} engine crashed: {}",
                engine.name(),
                panic_message(&*payload)
            );
            tracing::error!(url = %request.url, error = %message, "job panicked");
            Err(message)
        }
    };
    relay.finish(outcome);
}

fn fetch(
    engine: &dyn Engine,
    request: &JobRequest,
    opts: &EngineOptions,
    relay: &mut ProgressRelay,
) -> Result<(), EngineError> {
    // Resolve first so a bad URL fails before anything is written.
    let info = engine.fetch_metadata(opts, &request.url)?;
    if let Some(ref title) = info.title {
        relay.status(format!("resolved: {title}"));
        relay.log(format!("title: {title}"));
    }
    if let Some(ref id) = info.id {
        relay.log(format!("id: {id}"));
    }
    if let Some(count) = info.entry_count {
        relay.log(format!("collection with {count} entries, downloading each"));
    }

    relay.check_cancel()?;
    engine.download(opts, &request.url, &mut |update| relay.on_update(update))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
