//! JSON configuration for schemes, defaults, and OpenID Connect options.
//!
//! ```json
//! {
//!   "defaults": { "scheme": "Cookies", "challenge": "oidc" },
//!   "schemes": [
//!     { "name": "Cookies", "capabilities": ["authenticate", "challenge", "forbid", "sign_in", "sign_out"] },
//!     {
//!       "name": "oidc",
//!       "capabilities": ["authenticate", "challenge", "forbid"],
//!       "forward": { "sign_out": "Cookies" },
//!       "openid_connect": { "authority": "https://idp.example", "client_id": "web" }
//!     }
//!   ]
//! }
//! ```
//!
//! Loading never validates OpenID Connect options; they are checked when a request first
//! reaches the scheme.

// std
use std::{fs, path::Path};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	oidc::OpenIdConnectOptions,
	registry::{RegistryError, SchemeDefaults, SchemeRegistry},
	scheme::{AuthenticationScheme, ForwardingRules, HandlerCapabilities, SchemeName},
};

/// Root configuration document.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthenticationConfig {
	/// Default scheme names per operation.
	pub defaults: SchemeDefaults,
	/// Schemes in registration order.
	pub schemes: Vec<SchemeConfig>,
}
impl AuthenticationConfig {
	/// Parses a JSON document, reporting the path of any malformed value.
	pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(document);

		Ok(serde_path_to_error::deserialize(&mut de)?)
	}

	/// Reads and parses a JSON file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let document = fs::read_to_string(path)
			.map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

		Self::from_json_str(&document)
	}

	/// Registers every configured scheme.
	pub fn into_registry(self) -> Result<SchemeRegistry, RegistryError> {
		self.schemes
			.into_iter()
			.fold(SchemeRegistry::builder().defaults(self.defaults), |builder, config| {
				let (scheme, options) = config.into_parts();

				match options {
					Some(options) => builder.add_openid_connect(scheme, options),
					None => builder.add_scheme(scheme),
				}
			})
			.build()
	}
}

/// One configured scheme.
#[derive(Clone, Debug, Deserialize)]
pub struct SchemeConfig {
	/// Registry key.
	pub name: SchemeName,
	/// Optional human-readable name.
	#[serde(default)]
	pub display_name: Option<String>,
	/// Operations the handler performs itself.
	#[serde(default)]
	pub capabilities: HandlerCapabilities,
	/// Forwarding targets.
	#[serde(default)]
	pub forward: ForwardingRules,
	/// OpenID Connect options, for OpenID Connect schemes.
	#[serde(default)]
	pub openid_connect: Option<OpenIdConnectOptions>,
}
impl SchemeConfig {
	/// Splits the entry into scheme data and options.
	pub fn into_parts(self) -> (AuthenticationScheme, Option<OpenIdConnectOptions>) {
		let scheme = AuthenticationScheme {
			name: self.name,
			display_name: self.display_name,
			capabilities: self.capabilities,
			forward: self.forward,
		};

		(scheme, self.openid_connect)
	}
}
