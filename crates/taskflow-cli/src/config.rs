//! Configuration for the TaskFlow CLI.
//!
//! # Storage Structure
//!
//! Board data lives in one state directory:
//!
//! ```text
//! ~/.taskflow/
//! ├── tasks.json
//! ├── projects.json
//! ├── team.json
//! ├── events.json
//! └── notifications.json
//! ```
//!
//! # Environment Variables
//!
//! - `TASKFLOW_STATE_DIR`: Override the state directory
//! - `RUST_LOG`: Override the log filter

use std::path::{Path, PathBuf};

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "TASKFLOW_STATE_DIR";

/// Per-checkout environment file loaded before argument parsing.
pub const ENV_FILE: &str = ".env.local";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".taskflow";

/// Loads `.env.local` if present. Missing files are not an error.
pub fn load_env_file() {
    let _ = dotenvy::from_filename(ENV_FILE);
}

/// Resolves the state directory.
///
/// The state directory is determined by:
/// 1. An explicit path (the `--state-dir` flag, which clap also fills from
///    `TASKFLOW_STATE_DIR`)
/// 2. `~/.taskflow` if home directory is available
/// 3. `.taskflow` in current directory as fallback
pub fn resolve_state_dir(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(default_state_dir)
}

/// Returns `~/.taskflow`, or `.taskflow` when there is no home directory.
pub fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DEFAULT_STATE_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
}
