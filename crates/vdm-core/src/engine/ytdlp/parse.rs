//! Parsing of yt-dlp output: progress template lines and metadata JSON.

use serde_json::Value;

use super::args::PROGRESS_PREFIX;
use crate::engine::{MediaInfo, Phase, ProgressUpdate};

/// yt-dlp prints `NA` for fields it does not know; sizes and speeds may be floats.
fn number(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() || field == "NA" || field == "None" {
        return None;
    }
    field.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

fn whole(field: &str) -> Option<u64> {
    number(field).map(|v| v as u64)
}

/// Parse one stdout line printed through our progress template.
/// Returns `None` for every other line.
pub(super) fn progress_line(line: &str) -> Option<ProgressUpdate> {
    // Concurrent format downloads prefix each line with "<n>: ".
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    let start = line.find(PROGRESS_PREFIX)?;
    let rest = &line[start + PROGRESS_PREFIX.len()..];
    let mut fields = rest.splitn(7, '|');
    let phase = Phase::parse(fields.next()?.trim());
    let downloaded_bytes = whole(fields.next()?);
    let total_bytes = whole(fields.next()?);
    let total_bytes_estimate = whole(fields.next()?);
    let speed = number(fields.next()?);
    let eta = whole(fields.next()?);
    let filename = fields
        .next()
        .map(str::trim)
        .filter(|f| !f.is_empty() && *f != "NA")
        .map(str::to_string);
    Some(ProgressUpdate {
        phase,
        filename,
        downloaded_bytes,
        total_bytes,
        total_bytes_estimate,
        speed,
        eta,
    })
}

/// Extract title, id and entry count from `--dump-single-json` output.
pub(super) fn media_info(value: &Value) -> MediaInfo {
    let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
    let entry_count = match value.get("_type").and_then(Value::as_str) {
        Some("playlist") => value.get("entries").and_then(Value::as_array).map(Vec::len),
        _ => None,
    };
    MediaInfo {
        title: text("title"),
        id: text("id"),
        entry_count,
    }
}

/// Last `ERROR:` line of stderr, or the last non-empty line if there is none.
pub(super) fn error_summary(stderr: &str) -> Option<String> {
    let lines: Vec<&str> = stderr.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    lines
        .iter()
        .rev()
        .find(|l| l.starts_with("ERROR:"))
        .or_else(|| lines.last())
        .map(|l| l.to_string())
}
