//! Error types for configuration and rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {}: {error}", path.display())]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or field types.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// A value that can never work, such as a zero line budget.
	#[error("invalid value for '{key}': {reason}")]
	Invalid {
		/// The configuration key.
		key: &'static str,
		/// Why the value was rejected.
		reason: String,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Non-fatal warning produced by validation.
///
/// The configuration still loads; callers are expected to log these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// A value lies outside its documented range.
	OutOfRange {
		/// The configuration key.
		key: &'static str,
		/// The configured value.
		value: u64,
		/// Lowest documented value.
		min: u64,
		/// Highest documented value.
		max: u64,
	},
}

impl std::fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ConfigWarning::OutOfRange { key, value, min, max } => {
				write!(f, "'{key}' = {value} is outside the documented range {min}..={max}")
			}
		}
	}
}

/// Failure reported by an [`AnnotationSink`](crate::AnnotationSink).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
	/// The renderer refused the batch.
	#[error("renderer rejected annotations: {0}")]
	Rejected(String),

	/// The view the sink draws into no longer exists.
	#[error("renderer is detached from its view")]
	Detached,
}
