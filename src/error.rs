//! Crate-level error types shared by the resolver, the options validator, and configuration.

// std
use std::path::PathBuf;
// self
use crate::{_prelude::*, scheme::SchemeName};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error surfaced by the authentication entry points.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The operation could not be routed to a handler.
	#[error(transparent)]
	Resolution(#[from] crate::resolver::ResolutionError),
	/// The resolved scheme's options were rejected on first use.
	#[error("Options for the '{scheme}' scheme are invalid: {source}")]
	InvalidOptions {
		/// Scheme whose options failed validation.
		scheme: SchemeName,
		/// Validation failure.
		#[source]
		source: crate::oidc::OptionsError,
	},
	/// Scheme registration failed.
	#[error(transparent)]
	Registry(#[from] crate::registry::RegistryError),
	/// Configuration could not be loaded.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Failures raised while loading authentication configuration.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Configuration file could not be read.
	#[error("Configuration file {path:?} could not be read.")]
	Read {
		/// Path that failed.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Configuration document is malformed.
	#[error("Configuration is malformed at `{}`.", .source.path())]
	Parse {
		/// Structured parsing failure carrying the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Schemes in the document could not be registered.
	#[error("Configured schemes could not be registered.")]
	Registry(#[from] crate::registry::RegistryError),
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(source: serde_path_to_error::Error<serde_json::Error>) -> Self {
		Self::Parse { source }
	}
}
