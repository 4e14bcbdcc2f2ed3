//! Pure formatting helpers for progress ticks.

use std::path::Path;

use crate::engine::ProgressUpdate;

const MIB: f64 = 1024.0 * 1024.0;

/// `floor(downloaded * 100 / total)` clamped to 100. `None` when the total
/// is unknown or zero.
pub fn percent_of(downloaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let pct = (u128::from(downloaded) * 100 / u128::from(total)).min(100);
    Some(pct as u8)
}

/// Percentage for a `downloading` tick, if both counters are known.
pub fn percent(update: &ProgressUpdate) -> Option<u8> {
    percent_of(update.downloaded_bytes?, update.known_total()?)
}

/// `downloading: <file>[ | <x.xx> MiB/s][ | ETA <n>s]`
pub fn status_line(update: &ProgressUpdate) -> String {
    let name = update
        .filename
        .as_deref()
        .and_then(|f| Path::new(f).file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut line = format!("downloading: {name}");
    if let Some(speed) = update.speed.filter(|s| *s > 0.0) {
        line.push_str(&format!(" | {:.2} MiB/s", speed / MIB));
    }
    if let Some(eta) = update.eta {
        line.push_str(&format!(" | ETA {eta}s"));
    }
    line
}
