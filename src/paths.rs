//! Centralized path definitions for archsec
//!
//! ## Configuration lookup
//!
//! ```text
//! --config <path>                  # explicit, must exist
//! ./archsec.toml                   # per-project
//! ~/.config/archsec/config.toml    # per-user
//! ```
//!
//! The first file found wins; when none exists the built-in defaults apply.

use std::path::{Path, PathBuf};

/// Per-project configuration filename
pub const LOCAL_CONFIG: &str = "archsec.toml";

/// Global config directory name
const GLOBAL_DIR: &str = "archsec";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the per-project config path inside `dir`.
#[must_use]
pub fn local_config(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG)
}

/// Get the global archsec directory.
///
/// Returns `~/.config/archsec/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(".config").join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.config/archsec/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}

/// Config files to try, in priority order, when no explicit path is given
#[must_use]
pub fn config_candidates(cwd: &Path) -> [PathBuf; 2] {
    [local_config(cwd), global_config()]
}
