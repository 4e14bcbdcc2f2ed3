//! CLI for the VDM video download manager.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vdm_core::config;

use commands::{run_completions, run_config, run_fetch, run_man};

/// Top-level CLI for the VDM video download manager.
#[derive(Debug, Parser)]
#[command(name = "vdm")]
#[command(about = "VDM: fetch videos from video sites through yt-dlp", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a video (or every item of a playlist/collection).
    Fetch {
        /// Page URL of the video, playlist or collection.
        url: String,
        /// Directory to save into (created if missing). Defaults to the current directory.
        #[arg(long, short = 'o', value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Netscape cookies.txt for sites that need a login.
        #[arg(long, value_name = "FILE")]
        cookies: Option<PathBuf>,
    },

    /// Show the config file path and effective settings.
    Config,

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the man page to stdout.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch {
                url,
                out_dir,
                cookies,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let out_dir = match out_dir {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_fetch(cfg, url.trim(), out_dir, cookies).await?;
            }
            CliCommand::Config => run_config()?,
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
