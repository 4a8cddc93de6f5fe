//! First-use checks for OpenID Connect options and the derivations they perform.

// self
use crate::{
	_prelude::*,
	oidc::{ConfiguredUrl, OpenIdConnectOptions},
	scheme::SchemeName,
};

/// Path appended to the authority to locate the discovery document.
pub const DISCOVERY_PATH: &str = "/.well-known/openid-configuration";

/// Reasons OpenID Connect options are rejected on first use.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum OptionsError {
	/// The sign-in scheme points back at the scheme being validated.
	#[error(
		"The sign-in scheme for the remote '{scheme}' scheme cannot be set to itself. If it was not explicitly set, the default sign-in scheme or the default scheme is used."
	)]
	SelfReferentialSignInScheme {
		/// Scheme being validated.
		scheme: SchemeName,
	},
	/// A required option is empty.
	#[error("The `{argument}` option must be provided.")]
	MissingRequiredArgument {
		/// Option name.
		argument: &'static str,
	},
	/// No way to obtain provider metadata was configured.
	#[error(
		"Provide `authority`, `metadata_address`, a static `configuration`, or a `configuration_manager` for OpenID Connect options."
	)]
	MissingConfigurationSource,
	/// A URL option is not an absolute URL.
	#[error("The `{argument}` option must be an absolute URL, got `{value}`.")]
	InvalidUrl {
		/// Option name.
		argument: &'static str,
		/// Configured text.
		value: String,
	},
	/// The authority or metadata address does not use HTTPS.
	#[error(
		"The metadata address or authority must use HTTPS unless disabled for development by setting `require_https_metadata` to false: {url}."
	)]
	InsecureMetadataSource {
		/// Offending URL.
		url: String,
	},
	/// A duration option is out of range.
	#[error("The `{argument}` value must not be a negative duration, got {value}.")]
	InvalidRange {
		/// Option name.
		argument: &'static str,
		/// Rejected value.
		value: Duration,
	},
}

impl OpenIdConnectOptions {
	/// Validates the options for `scheme` and derives defaulted fields.
	///
	/// `default_sign_in` is the registry's sign-in default, used when no sign-in scheme was
	/// set explicitly. Checks run in a fixed order and the first failure wins. Nothing is
	/// written back unless every check passes, so a failed call leaves the options untouched
	/// and a retry fails the same way. Once validated, further calls return `Ok(())` without
	/// re-deriving anything.
	pub fn validate(
		&mut self,
		scheme: &SchemeName,
		default_sign_in: Option<&SchemeName>,
	) -> Result<(), OptionsError> {
		if self.is_validated() {
			return Ok(());
		}

		let sign_in_scheme = self.sign_in_scheme.clone().or_else(|| default_sign_in.cloned());

		if sign_in_scheme.as_ref() == Some(scheme) {
			return Err(OptionsError::SelfReferentialSignInScheme { scheme: scheme.clone() });
		}
		if self.client_id.is_empty() {
			return Err(OptionsError::MissingRequiredArgument { argument: "client_id" });
		}
		if self.callback_path.is_empty() {
			return Err(OptionsError::MissingRequiredArgument { argument: "callback_path" });
		}
		if self.authority.is_none()
			&& self.metadata_address.is_none()
			&& self.configuration_source.is_none()
		{
			return Err(OptionsError::MissingConfigurationSource);
		}

		let authority = self.authority.as_ref().map(|url| parsed(url, "authority")).transpose()?;
		let metadata_address = match &self.metadata_address {
			Some(address) => Some(parsed(address, "metadata_address")?.clone()),
			None => authority.map(metadata_address_for),
		};

		if self.require_https_metadata {
			for url in authority.into_iter().chain(metadata_address.iter()) {
				ensure_https(url)?;
			}
		}
		if let Some(max_age) = self.max_age.filter(|age| age.is_negative()) {
			return Err(OptionsError::InvalidRange { argument: "max_age", value: max_age });
		}

		self.sign_out_scheme = self.sign_out_scheme.take().or_else(|| sign_in_scheme.clone());
		self.sign_in_scheme = sign_in_scheme;
		self.metadata_address = metadata_address.map(ConfiguredUrl::Parsed);
		self.valid_audience = self.valid_audience.take().or_else(|| Some(self.client_id.clone()));

		self.mark_validated();

		Ok(())
	}
}

/// Derives the discovery document address from an authority.
///
/// The discovery path is joined onto the authority's path; a single trailing `/` is dropped
/// first so the join never produces `//`. Query and fragment are kept as given.
pub fn metadata_address_for(authority: &Url) -> Url {
	let base = authority.path();
	let path = format!("{}{DISCOVERY_PATH}", base.strip_suffix('/').unwrap_or(base));
	let mut address = authority.clone();

	address.set_path(&path);

	address
}

fn parsed<'a>(url: &'a ConfiguredUrl, argument: &'static str) -> Result<&'a Url, OptionsError> {
	url.as_url().ok_or_else(|| OptionsError::InvalidUrl { argument, value: url.as_str().into() })
}

fn ensure_https(url: &Url) -> Result<(), OptionsError> {
	if url.scheme() == "https" {
		Ok(())
	} else {
		Err(OptionsError::InsecureMetadataSource { url: url.to_string() })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("URL fixture should parse.")
	}

	fn scheme(value: &str) -> SchemeName {
		SchemeName::new(value).expect("Scheme fixture should be valid.")
	}

	#[test]
	fn derives_metadata_address_without_double_slash() {
		assert_eq!(
			metadata_address_for(&url("https://idp.example")).as_str(),
			"https://idp.example/.well-known/openid-configuration"
		);
		assert_eq!(
			metadata_address_for(&url("https://idp.example/tenant/")).as_str(),
			"https://idp.example/tenant/.well-known/openid-configuration"
		);
		assert_eq!(
			metadata_address_for(&url("https://idp.example/tenant?p=1")).as_str(),
			"https://idp.example/tenant/.well-known/openid-configuration?p=1"
		);
	}

	#[test]
	fn default_sign_in_scheme_is_checked_for_self_reference() {
		let own = scheme("oidc");
		let mut options =
			OpenIdConnectOptions::new("client").with_authority(url("https://idp.example"));
		let err = options
			.validate(&own, Some(&own))
			.expect_err("Defaulted sign-in scheme equal to the scheme must be rejected.");

		assert_eq!(err, OptionsError::SelfReferentialSignInScheme { scheme: own.clone() });
		assert!(err.to_string().contains("cannot be set to itself"));
		assert!(!options.is_validated());
		assert!(options.sign_in_scheme.is_none(), "Failed validation must not write back.");
	}

	#[test]
	fn success_fills_derived_defaults() {
		let own = scheme("oidc");
		let cookies = scheme("Cookies");
		let mut options =
			OpenIdConnectOptions::new("client").with_authority(url("https://idp.example"));

		options.validate(&own, Some(&cookies)).expect("Options should validate.");

		assert!(options.is_validated());
		assert_eq!(options.sign_in_scheme.as_ref(), Some(&cookies));
		assert_eq!(options.sign_out_scheme.as_ref(), Some(&cookies));
		assert_eq!(options.valid_audience.as_deref(), Some("client"));
	}

	#[test]
	fn empty_callback_path_is_rejected_after_client_id() {
		let mut options = OpenIdConnectOptions::new("client")
			.with_authority(url("https://idp.example"))
			.with_callback_path("");

		assert_eq!(
			options.validate(&scheme("oidc"), None),
			Err(OptionsError::MissingRequiredArgument { argument: "callback_path" })
		);

		let mut options = OpenIdConnectOptions::new("").with_callback_path("");

		assert_eq!(
			options.validate(&scheme("oidc"), None),
			Err(OptionsError::MissingRequiredArgument { argument: "client_id" })
		);
	}

	#[test]
	fn whitespace_client_id_is_present() {
		let mut options = OpenIdConnectOptions::new(" ").with_authority(url("https://idp.example"));

		options.validate(&scheme("oidc"), None).expect("Whitespace is a non-empty client id.");

		assert_eq!(options.valid_audience.as_deref(), Some(" "));
	}

	#[test]
	fn malformed_urls_fail_before_https_checks() {
		let mut options = OpenIdConnectOptions::new("client");

		options.authority = ConfiguredUrl::parse("idp.example");
		options.metadata_address = ConfiguredUrl::parse("http://idp.example/meta");

		let err = options.validate(&scheme("oidc"), None).expect_err("Malformed authority must fail.");

		assert_eq!(
			err,
			OptionsError::InvalidUrl { argument: "authority", value: "idp.example".into() }
		);
		assert!(err.to_string().contains("must be an absolute URL"));
		assert!(!options.is_validated());

		options.authority = None;
		options.metadata_address = ConfiguredUrl::parse("meta");

		assert_eq!(
			options.validate(&scheme("oidc"), None),
			Err(OptionsError::InvalidUrl { argument: "metadata_address", value: "meta".into() })
		);
	}

	#[test]
	fn insecure_authority_reported_before_max_age() {
		let mut options = OpenIdConnectOptions::new("client")
			.with_authority(url("http://idp.example"))
			.with_max_age(Duration::seconds(-1));
		let err = options.validate(&scheme("oidc"), None).expect_err("HTTP authority must fail.");

		assert!(matches!(
			err,
			OptionsError::InsecureMetadataSource { url: ref insecure } if insecure == "http://idp.example/"
		));
		assert!(err.to_string().contains("require_https_metadata"));
	}
}
