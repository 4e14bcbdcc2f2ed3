//! Writes an executable shell script standing in for `yt-dlp`.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Script that answers `--dump-single-json` with `metadata_json` and
/// otherwise runs `download_body`.
pub fn write(dir: &Path, metadata_json: &str, download_body: &str) -> PathBuf {
    let path = dir.join("yt-dlp");
    let script = format!(
        "#!/bin/sh\ncase \"$*\" in\n  *--dump-single-json*) echo '{metadata_json}'; exit 0 ;;\nesac\n{download_body}\n"
    );
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
