//! Synchronizer configuration.
//!
//! Keys use kebab-case in TOML:
//!
//! ```toml
//! max-lines-to-process = 500
//! debounce-interval-ms = 500
//! only-visible-range = true
//! show-zero-syllables = false
//! verbosity = "verbose"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigWarning, Result};

/// Documented range for `max-lines-to-process`.
pub const MAX_LINES_RANGE: (u64, u64) = (100, 2000);
/// Documented range for `debounce-interval-ms`.
pub const DEBOUNCE_RANGE_MS: (u64, u64) = (100, 2000);

/// How a count is rendered next to its line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
	/// `"3 syllables"`, `"1 syllable"`.
	#[default]
	Verbose,
	/// `"3"`.
	Terse,
}

impl Verbosity {
	/// Text shown next to a line with `count` syllables.
	pub fn display_text(self, count: usize) -> String {
		match self {
			Verbosity::Verbose if count == 1 => "1 syllable".to_string(),
			Verbosity::Verbose => format!("{count} syllables"),
			Verbosity::Terse => count.to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SyncConfig {
	/// Upper bound on lines evaluated in one pass.
	pub max_lines_to_process: usize,
	/// Quiet period before a burst of triggers runs a pass.
	pub debounce_interval_ms: u64,
	/// Restrict passes to the padded viewport instead of the document head.
	pub only_visible_range: bool,
	/// Annotate lines whose estimate is zero.
	pub show_zero_syllables: bool,
	pub verbosity: Verbosity,
}

impl Default for SyncConfig {
	fn default() -> Self {
		Self {
			max_lines_to_process: 500,
			debounce_interval_ms: 500,
			only_visible_range: true,
			show_zero_syllables: false,
			verbosity: Verbosity::Verbose,
		}
	}
}

impl SyncConfig {
	/// Quiet period as a [`Duration`].
	pub fn debounce_interval(&self) -> Duration {
		Duration::from_millis(self.debounce_interval_ms)
	}

	/// Whether a line with `count` syllables gets an annotation.
	pub fn displays(&self, count: usize) -> bool {
		count > 0 || self.show_zero_syllables
	}

	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<(Self, Vec<ConfigWarning>)> {
		let config: SyncConfig = toml::from_str(input)?;
		let warnings = config.validate()?;
		Ok((config, warnings))
	}

	/// Reads, parses and validates a TOML file.
	pub fn load(path: &Path) -> Result<(Self, Vec<ConfigWarning>)> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	/// Rejects unusable values and reports values outside documented ranges.
	pub fn validate(&self) -> Result<Vec<ConfigWarning>> {
		if self.max_lines_to_process == 0 {
			return Err(ConfigError::Invalid {
				key: "max-lines-to-process",
				reason: "must be greater than zero".to_string(),
			});
		}

		let mut warnings = Vec::new();
		check_range(&mut warnings, "max-lines-to-process", self.max_lines_to_process as u64, MAX_LINES_RANGE);
		check_range(&mut warnings, "debounce-interval-ms", self.debounce_interval_ms, DEBOUNCE_RANGE_MS);
		Ok(warnings)
	}
}

fn check_range(warnings: &mut Vec<ConfigWarning>, key: &'static str, value: u64, (min, max): (u64, u64)) {
	if !(min..=max).contains(&value) {
		warnings.push(ConfigWarning::OutOfRange { key, value, min, max });
	}
}
