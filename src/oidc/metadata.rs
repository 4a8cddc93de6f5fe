//! Identity-provider metadata and the collaborators that supply it.
//!
//! Retrieval over the network is left to [`ConfigurationManager`] implementations owned by the
//! host; this module only models the document and the ways options can point at it.

// self
use crate::_prelude::*;

/// Boxed future returned by [`ConfigurationManager::get_configuration`].
pub type ConfigurationFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ProviderMetadata, MetadataError>> + 'a + Send>>;

/// Failures raised while reading or obtaining provider metadata.
#[derive(Debug, ThisError)]
pub enum MetadataError {
	/// Discovery document could not be parsed.
	#[error("Provider metadata is malformed at `{}`.", .source.path())]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Configuration manager could not supply metadata.
	#[error("Provider metadata is unavailable: {message}.")]
	Unavailable {
		/// Manager-supplied reason string.
		message: String,
	},
}

/// OpenID provider configuration document (`/.well-known/openid-configuration`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
	/// Issuer identifier tokens must carry.
	pub issuer: String,
	/// Authorization endpoint used by challenges.
	#[serde(default)]
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint used for code redemption.
	#[serde(default)]
	pub token_endpoint: Option<Url>,
	/// End-session endpoint used by sign-out.
	#[serde(default)]
	pub end_session_endpoint: Option<Url>,
	/// Key set location.
	#[serde(default)]
	pub jwks_uri: Option<Url>,
	/// Userinfo endpoint.
	#[serde(default)]
	pub userinfo_endpoint: Option<Url>,
	/// Advertised scopes.
	#[serde(default)]
	pub scopes_supported: Vec<String>,
}
impl ProviderMetadata {
	/// Creates metadata carrying only an issuer.
	pub fn new(issuer: impl Into<String>) -> Self {
		Self {
			issuer: issuer.into(),
			authorization_endpoint: None,
			token_endpoint: None,
			end_session_endpoint: None,
			jwks_uri: None,
			userinfo_endpoint: None,
			scopes_supported: Vec::new(),
		}
	}

	/// Parses a discovery document, reporting the JSON path of any failure.
	pub fn from_json(document: &str) -> Result<Self, MetadataError> {
		let mut de = serde_json::Deserializer::from_str(document);

		serde_path_to_error::deserialize(&mut de).map_err(|source| MetadataError::Parse { source })
	}
}

/// Supplies and refreshes provider metadata on behalf of a scheme.
pub trait ConfigurationManager
where
	Self: Send + Sync,
{
	/// Returns the current provider metadata.
	fn get_configuration(&self) -> ConfigurationFuture<'_>;

	/// Asks the manager to refresh on the next call.
	///
	/// The default implementation does nothing, which suits fixed metadata.
	fn request_refresh(&self) {}
}

/// [`ConfigurationManager`] that always returns the same metadata.
#[derive(Clone, Debug)]
pub struct StaticConfigurationManager(Arc<ProviderMetadata>);
impl StaticConfigurationManager {
	/// Wraps fixed metadata.
	pub fn new(metadata: ProviderMetadata) -> Self {
		Self(Arc::new(metadata))
	}
}
impl ConfigurationManager for StaticConfigurationManager {
	fn get_configuration(&self) -> ConfigurationFuture<'_> {
		let metadata = self.0.clone();

		Box::pin(async move { Ok(metadata.as_ref().clone()) })
	}
}

/// Explicit metadata supplied alongside the options, if any.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationSource {
	/// Metadata comes from the authority or metadata address.
	#[default]
	None,
	/// Fixed metadata object.
	Static(ProviderMetadata),
	/// Host-provided manager.
	#[serde(skip)]
	Manager(Arc<dyn ConfigurationManager>),
}
impl ConfigurationSource {
	/// Returns true when no explicit metadata was supplied.
	pub fn is_none(&self) -> bool {
		matches!(self, Self::None)
	}
}
impl Debug for ConfigurationSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::None => f.write_str("None"),
			Self::Static(metadata) => f.debug_tuple("Static").field(metadata).finish(),
			Self::Manager(_) => f.write_str("Manager(..)"),
		}
	}
}

/// Where a validated scheme obtains its provider metadata.
#[derive(Clone, Copy)]
pub enum MetadataSource<'a> {
	/// Host-provided manager.
	Manager(&'a Arc<dyn ConfigurationManager>),
	/// Fixed metadata object.
	Static(&'a ProviderMetadata),
	/// Discovery document address.
	Discovery(&'a Url),
}
impl MetadataSource<'_> {
	/// Converts the source into a manager, wrapping static metadata when necessary.
	///
	/// Returns `None` for discovery addresses, which need a host-provided fetcher.
	pub fn manager(&self) -> Option<Arc<dyn ConfigurationManager>> {
		match self {
			Self::Manager(manager) => Some(Arc::clone(manager)),
			Self::Static(metadata) =>
				Some(Arc::new(StaticConfigurationManager::new((*metadata).clone()))),
			Self::Discovery(_) => None,
		}
	}
}
impl Debug for MetadataSource<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Manager(_) => f.write_str("Manager(..)"),
			Self::Static(metadata) => f.debug_tuple("Static").field(&metadata.issuer).finish(),
			Self::Discovery(url) => f.debug_tuple("Discovery").field(&url.as_str()).finish(),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn discovery_document_parses() {
		let metadata = ProviderMetadata::from_json(
			r#"{
				"issuer": "https://idp.example",
				"authorization_endpoint": "https://idp.example/authorize",
				"token_endpoint": "https://idp.example/token",
				"scopes_supported": ["openid", "profile"]
			}"#,
		)
		.expect("Discovery document fixture should parse.");

		assert_eq!(metadata.issuer, "https://idp.example");
		assert_eq!(
			metadata.token_endpoint.as_ref().map(Url::as_str),
			Some("https://idp.example/token")
		);
		assert!(metadata.end_session_endpoint.is_none());
		assert_eq!(metadata.scopes_supported, ["openid", "profile"]);
	}

	#[test]
	fn malformed_document_reports_path() {
		let err = ProviderMetadata::from_json(r#"{"issuer": "x", "jwks_uri": "not a url"}"#)
			.expect_err("Invalid jwks_uri should be rejected.");

		assert!(err.to_string().contains("jwks_uri"), "{err}");
	}

	#[tokio::test]
	async fn static_manager_returns_metadata() {
		let manager = StaticConfigurationManager::new(ProviderMetadata::new("https://idp.example"));

		manager.request_refresh();

		let metadata =
			manager.get_configuration().await.expect("Static manager should always succeed.");

		assert_eq!(metadata.issuer, "https://idp.example");
	}

	#[test]
	fn static_source_converts_into_manager() {
		let metadata = ProviderMetadata::new("https://idp.example");

		assert!(MetadataSource::Static(&metadata).manager().is_some());

		let url = Url::parse("https://idp.example/.well-known/openid-configuration")
			.expect("Discovery fixture should parse.");

		assert!(MetadataSource::Discovery(&url).manager().is_none());
	}
}
