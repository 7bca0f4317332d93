//! Error types for configuration loading and session failures.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or validating [`MinerConfig`](crate::MinerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an unknown/mistyped key.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error serializing the configuration back to TOML.
	#[error("TOML serialize error: {0}")]
	Serialize(#[from] toml::ser::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A value lies outside its accepted range.
	#[error("{field} = {value} is out of range (expected {expected})")]
	OutOfRange {
		field: &'static str,
		value: String,
		expected: &'static str,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Why a session was routed to the error state.
///
/// These never propagate out of a tick; they are recorded on the session
/// and reported when it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FailureReason {
	#[error("clearing a branch group failed")]
	GroupClearFailed,
	#[error("clearing the lateral path to the next branch failed")]
	PathClearFailed,
	#[error("could not travel back to the branch start")]
	BranchReturnFailed,
	#[error("could not travel to storage")]
	StorageTravelFailed,
	#[error("could not travel back from storage")]
	StorageResumeFailed,
	#[error("inventory needs emptying but no storage was found")]
	StorageMissing,
	#[error("agent health fell below the safety threshold")]
	LowHealth,
}
