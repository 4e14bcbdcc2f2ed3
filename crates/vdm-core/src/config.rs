use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/vdm/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VdmConfig {
    /// Engine retries for a whole item.
    pub retries: u32,
    /// Engine retries for a single fragment.
    pub fragment_retries: u32,
    /// Fragments fetched concurrently per item.
    pub concurrent_fragments: u32,
    /// Container audio and video are merged into (requires ffmpeg).
    pub merge_output_format: String,
    /// Fetch only the single item when a URL points at a playlist or collection.
    pub no_playlist: bool,
    /// File name template inside the output directory. Keep `%(id)s` in it so
    /// items sharing a title do not overwrite each other.
    pub output_template: String,
    /// Path to the yt-dlp binary; looked up on PATH when unset.
    pub ytdlp_path: Option<PathBuf>,
}

impl Default for VdmConfig {
    fn default() -> Self {
        Self {
            retries: 5,
            fragment_retries: 5,
            concurrent_fragments: 4,
            merge_output_format: "mp4".to_string(),
            no_playlist: false,
            output_template: "%(title)s [%(id)s].%(ext)s".to_string(),
            ytdlp_path: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vdm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VdmConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<VdmConfig> {
    if !path.exists() {
        let default_cfg = VdmConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("writing default config to {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: VdmConfig =
        toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(cfg)
}
