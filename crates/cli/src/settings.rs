//! Locating and loading the user's synchronizer configuration.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cadence_annotate::SyncConfig;
use tracing::{debug, warn};

/// `$XDG_CONFIG_HOME/cadence/config.toml` or the platform equivalent.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("cadence").join("config.toml"))
}

/// Loads `explicit` if given, else the default file if it exists, else defaults.
///
/// An explicitly named file must exist.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<SyncConfig> {
	let path = match explicit {
		Some(path) => path.to_path_buf(),
		None => match default_path().filter(|path| path.is_file()) {
			Some(path) => path,
			None => {
				debug!("cli.config.defaults");
				return Ok(SyncConfig::default());
			}
		},
	};

	let (config, warnings) =
		SyncConfig::load(&path).with_context(|| format!("loading configuration from {}", path.display()))?;
	for warning in warnings {
		warn!(path = %path.display(), %warning, "cli.config.warning");
	}
	debug!(path = %path.display(), ?config, "cli.config.loaded");
	Ok(config)
}
