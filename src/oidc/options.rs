//! OpenID Connect settings as configured by the operator, before and after validation.

// self
use crate::{
	_prelude::*,
	oidc::{ClientSecret, ConfigurationManager, ConfigurationSource, MetadataSource, ProviderMetadata},
	scheme::SchemeName,
};

/// Default redirect path the provider posts authorization responses to.
pub const DEFAULT_CALLBACK_PATH: &str = "/signin-oidc";
/// Default path the provider redirects to after a remote sign-out.
pub const DEFAULT_SIGNED_OUT_CALLBACK_PATH: &str = "/signout-callback-oidc";
/// Default `response_type` parameter.
pub const DEFAULT_RESPONSE_TYPE: &str = "code";

/// Settings for one OpenID Connect scheme.
///
/// Instances start unvalidated. [`validate`](Self::validate) runs the invariant checks once,
/// derives defaulted fields in place, and marks the options validated; later calls are no-ops.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OpenIdConnectOptions {
	/// Identity provider base URL.
	#[serde(deserialize_with = "de_url")]
	pub authority: Option<ConfiguredUrl>,
	/// Discovery document URL, derived from [`authority`](Self::authority) when unset.
	#[serde(deserialize_with = "de_url")]
	pub metadata_address: Option<ConfiguredUrl>,
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret for confidential clients.
	pub client_secret: Option<ClientSecret>,
	/// Scheme that persists the identity produced by this scheme.
	pub sign_in_scheme: Option<SchemeName>,
	/// Scheme signed out alongside remote sign-out, defaulting to the sign-in scheme.
	pub sign_out_scheme: Option<SchemeName>,
	/// Rejects non-HTTPS authority or metadata addresses unless disabled.
	pub require_https_metadata: bool,
	/// Maximum authentication age requested from the provider.
	#[serde(deserialize_with = "de_seconds")]
	pub max_age: Option<Duration>,
	/// Explicit metadata object or manager.
	pub configuration_source: ConfigurationSource,
	/// Redirect path for authorization responses.
	pub callback_path: String,
	/// Redirect path after a remote sign-out.
	pub signed_out_callback_path: String,
	/// Requested `response_type`.
	pub response_type: String,
	/// Requested scopes.
	pub scope: Vec<String>,
	/// Sends a PKCE challenge with authorization requests.
	pub use_pkce: bool,
	/// Audience tokens must carry, defaulting to the client identifier.
	pub valid_audience: Option<String>,
	#[serde(skip)]
	validated: bool,
}
impl OpenIdConnectOptions {
	/// Creates options for `client_id` with every other field at its default.
	pub fn new(client_id: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), ..Default::default() }
	}

	/// Sets the authority.
	pub fn with_authority(mut self, authority: Url) -> Self {
		self.authority = Some(ConfiguredUrl::Parsed(authority));

		self
	}

	/// Sets the metadata address explicitly.
	pub fn with_metadata_address(mut self, address: Url) -> Self {
		self.metadata_address = Some(ConfiguredUrl::Parsed(address));

		self
	}

	/// Sets the client secret.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(ClientSecret::new(secret));

		self
	}

	/// Sets the sign-in scheme.
	pub fn with_sign_in_scheme(mut self, scheme: SchemeName) -> Self {
		self.sign_in_scheme = Some(scheme);

		self
	}

	/// Sets the sign-out scheme.
	pub fn with_sign_out_scheme(mut self, scheme: SchemeName) -> Self {
		self.sign_out_scheme = Some(scheme);

		self
	}

	/// Toggles HTTPS enforcement for the authority and metadata address.
	pub fn require_https_metadata(mut self, required: bool) -> Self {
		self.require_https_metadata = required;

		self
	}

	/// Sets the maximum authentication age.
	pub fn with_max_age(mut self, max_age: Duration) -> Self {
		self.max_age = Some(max_age);

		self
	}

	/// Supplies fixed provider metadata.
	pub fn with_configuration(mut self, metadata: ProviderMetadata) -> Self {
		self.configuration_source = ConfigurationSource::Static(metadata);

		self
	}

	/// Supplies a configuration manager.
	pub fn with_configuration_manager(mut self, manager: Arc<dyn ConfigurationManager>) -> Self {
		self.configuration_source = ConfigurationSource::Manager(manager);

		self
	}

	/// Overrides the callback path.
	pub fn with_callback_path(mut self, path: impl Into<String>) -> Self {
		self.callback_path = path.into();

		self
	}

	/// Replaces the requested scopes.
	pub fn with_scope<I, S>(mut self, scope: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scope = scope.into_iter().map(Into::into).collect();

		self
	}

	/// Returns true once [`validate`](Self::validate) has succeeded.
	pub fn is_validated(&self) -> bool {
		self.validated
	}

	pub(crate) fn mark_validated(&mut self) {
		self.validated = true;
	}

	/// Returns where provider metadata comes from.
	///
	/// A configuration manager wins over static metadata, which wins over the metadata
	/// address. Unvalidated options that only carry an authority, or whose metadata address is
	/// malformed, report `None`.
	pub fn metadata_source(&self) -> Option<MetadataSource<'_>> {
		match &self.configuration_source {
			ConfigurationSource::Manager(manager) => Some(MetadataSource::Manager(manager)),
			ConfigurationSource::Static(metadata) => Some(MetadataSource::Static(metadata)),
			ConfigurationSource::None => self
				.metadata_address
				.as_ref()
				.and_then(ConfiguredUrl::as_url)
				.map(MetadataSource::Discovery),
		}
	}
}
impl Default for OpenIdConnectOptions {
	fn default() -> Self {
		Self {
			authority: None,
			metadata_address: None,
			client_id: String::new(),
			client_secret: None,
			sign_in_scheme: None,
			sign_out_scheme: None,
			require_https_metadata: true,
			max_age: None,
			configuration_source: ConfigurationSource::None,
			callback_path: DEFAULT_CALLBACK_PATH.into(),
			signed_out_callback_path: DEFAULT_SIGNED_OUT_CALLBACK_PATH.into(),
			response_type: DEFAULT_RESPONSE_TYPE.into(),
			scope: vec!["openid".into(), "profile".into()],
			use_pkce: true,
			valid_audience: None,
			validated: false,
		}
	}
}

/// URL option as written in configuration.
///
/// Text that is not an absolute URL is kept verbatim so the mistake surfaces when the scheme
/// is first used rather than when configuration loads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfiguredUrl {
	/// Absolute URL.
	Parsed(Url),
	/// Text that failed to parse.
	Malformed(String),
}
impl ConfiguredUrl {
	/// Parses configured text; blank text means the option is unset.
	pub fn parse(text: &str) -> Option<Self> {
		let text = text.trim();

		if text.is_empty() {
			return None;
		}

		Some(Url::parse(text).map_or_else(|_| Self::Malformed(text.into()), Self::Parsed))
	}

	/// Parsed URL, if the text was well formed.
	pub fn as_url(&self) -> Option<&Url> {
		match self {
			Self::Parsed(url) => Some(url),
			Self::Malformed(_) => None,
		}
	}

	/// Configured text.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Parsed(url) => url.as_str(),
			Self::Malformed(text) => text.as_str(),
		}
	}
}
impl From<Url> for ConfiguredUrl {
	fn from(url: Url) -> Self {
		Self::Parsed(url)
	}
}
impl Display for ConfiguredUrl {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Reads a URL option leniently so blank or malformed values reach validation.
fn de_url<'de, D>(deserializer: D) -> Result<Option<ConfiguredUrl>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?.and_then(|text| ConfiguredUrl::parse(&text)))
}

/// Reads `max_age` as signed whole seconds so negative values reach validation.
fn de_seconds<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(Option::<i64>::deserialize(deserializer)?.map(Duration::seconds))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_match_provider_conventions() {
		let options = OpenIdConnectOptions::new("client");

		assert!(options.require_https_metadata);
		assert!(options.use_pkce);
		assert!(!options.is_validated());
		assert_eq!(options.callback_path, DEFAULT_CALLBACK_PATH);
		assert_eq!(options.response_type, "code");
		assert_eq!(options.scope, ["openid", "profile"]);
		assert!(options.metadata_source().is_none());
	}

	#[test]
	fn deserializes_with_defaults_and_signed_max_age() {
		let options: OpenIdConnectOptions = serde_json::from_str(
			r#"{
				"authority": "https://idp.example",
				"client_id": "web",
				"client_secret": "s3cret",
				"max_age": -5
			}"#,
		)
		.expect("Options fixture should deserialize.");

		assert_eq!(options.client_id, "web");
		assert_eq!(options.max_age, Some(Duration::seconds(-5)));
		assert_eq!(options.client_secret.as_ref().map(ClientSecret::expose), Some("s3cret"));
		assert!(options.require_https_metadata);
		assert!(options.configuration_source.is_none());
		assert!(!format!("{options:?}").contains("s3cret"));
	}

	#[test]
	fn blank_and_malformed_urls_deserialize() {
		let options: OpenIdConnectOptions = serde_json::from_str(
			r#"{ "authority": "  ", "metadata_address": "idp.example/meta", "client_id": "web" }"#,
		)
		.expect("Loose URL text should still deserialize.");

		assert!(options.authority.is_none());
		assert_eq!(
			options.metadata_address,
			Some(ConfiguredUrl::Malformed("idp.example/meta".into()))
		);
		assert!(options.metadata_source().is_none());
		assert_eq!(
			ConfiguredUrl::parse(" https://idp.example ").as_ref().map(ConfiguredUrl::as_str),
			Some("https://idp.example/")
		);
	}

	#[test]
	fn metadata_source_prefers_manager_then_static() {
		let address = Url::parse("https://idp.example/.well-known/openid-configuration")
			.expect("Metadata fixture should parse.");
		let options = OpenIdConnectOptions::new("client").with_metadata_address(address);

		assert!(matches!(options.metadata_source(), Some(MetadataSource::Discovery(_))));

		let options = options.with_configuration(ProviderMetadata::new("https://idp.example"));

		assert!(matches!(options.metadata_source(), Some(MetadataSource::Static(_))));

		let manager = Arc::new(crate::oidc::StaticConfigurationManager::new(
			ProviderMetadata::new("https://idp.example"),
		));
		let options = options.with_configuration_manager(manager);

		assert!(matches!(options.metadata_source(), Some(MetadataSource::Manager(_))));
	}
}
