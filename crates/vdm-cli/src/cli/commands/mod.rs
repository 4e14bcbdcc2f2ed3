//! CLI command handlers. Each command is in its own file.

mod config;
mod fetch;
mod meta;

pub use config::run_config;
pub use fetch::run_fetch;
pub use meta::{run_completions, run_man};
