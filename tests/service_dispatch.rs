// std
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};
// self
use auth_schemes::{
	config::AuthenticationConfig,
	error::{ConfigError, Error},
	oidc::{
		ConfigurationFuture, ConfigurationManager, MetadataError, MetadataSource,
		OpenIdConnectOptions, OptionsError, ProviderMetadata,
	},
	registry::{RegistryError, SchemeDefaults, SchemeRegistry},
	resolver::{ResolutionError, ResolutionRequest},
	scheme::{AuthenticationScheme, HandlerCapabilities, Operation, SchemeName},
	service::AuthenticationService,
};

const CONFIG: &str = r#"{
	"defaults": { "scheme": "Cookies", "challenge": "oidc" },
	"schemes": [
		{
			"name": "Cookies",
			"capabilities": ["authenticate", "challenge", "forbid", "sign_in", "sign_out"]
		},
		{
			"name": "oidc",
			"capabilities": ["authenticate", "challenge", "forbid"],
			"forward": { "sign_out": "Cookies" },
			"openid_connect": {
				"authority": "https://idp.example/",
				"client_id": "web",
				"client_secret": "s3cret",
				"max_age": 0
			}
		},
		{
			"name": "broken",
			"capabilities": ["challenge"],
			"openid_connect": { "metadata_address": "http://idp.example/meta", "client_id": "web" }
		},
		{ "name": "loop", "forward": { "default": "loop" } }
	]
}"#;

fn name(value: &str) -> SchemeName {
	SchemeName::new(value).expect("Failed to build scheme name fixture.")
}

fn service() -> AuthenticationService {
	let config = AuthenticationConfig::from_json_str(CONFIG).expect("Config fixture should parse.");

	AuthenticationService::from_config(config).expect("Config fixture should register.")
}

#[test]
fn default_challenge_reaches_validated_oidc_options() -> color_eyre::Result<()> {
	let service = service();
	let dispatch = service.challenge(None)?;
	let options = dispatch.options.as_ref().expect("oidc options should be attached.");

	assert_eq!(dispatch.operation, Operation::Challenge);
	assert_eq!(dispatch.scheme.name, name("oidc"));
	assert_eq!(dispatch.path, [name("oidc")]);
	assert_eq!(
		options.metadata_address.as_ref().map(|url| url.as_str()),
		Some("https://idp.example/.well-known/openid-configuration")
	);
	assert_eq!(options.sign_in_scheme, Some(name("Cookies")));
	assert_eq!(options.sign_out_scheme, Some(name("Cookies")));
	assert_eq!(options.valid_audience.as_deref(), Some("web"));

	let again = service.forbid(None)?;

	assert!(Arc::ptr_eq(options, again.options.as_ref().expect("Options should be cached.")));

	Ok(())
}

#[test]
fn forwarded_sign_out_runs_cookie_handler() -> color_eyre::Result<()> {
	let service = service();
	let dispatch = service.sign_out(Some(&name("oidc")))?;

	assert_eq!(dispatch.scheme.name, name("Cookies"));
	assert_eq!(dispatch.path, [name("oidc"), name("Cookies")]);
	assert!(dispatch.options.is_none());
	assert!(
		!service.registry().options("oidc").expect("oidc has options.").is_validated(),
		"Only the handling scheme's options are validated."
	);

	Ok(())
}

#[test]
fn sign_in_payload_is_handed_off() {
	let service = service();
	let dispatch =
		service.sign_in(None, ("alice", ["admin"])).expect("Default sign-in should dispatch.");

	assert_eq!(dispatch.scheme.name, name("Cookies"));
	assert_eq!(dispatch.payload.0, "alice");

	let err = service
		.sign_in(Some(&name("oidc")), "bob")
		.expect_err("Remote schemes cannot sign in.");

	assert!(matches!(
		err,
		Error::Resolution(ResolutionError::HandlerNotConfigured { operation: Operation::SignIn, .. })
	));
	assert!(err.to_string().contains("is configured to handle authenticate, challenge, forbid"));
}

#[test]
fn configuration_errors_surface_on_first_use_only() {
	let service = service();

	assert!(!service.registry().options("broken").expect("broken has options.").is_validated());

	for _ in 0..2 {
		let err = service.challenge(Some(&name("broken"))).expect_err("HTTP metadata must fail.");

		match err {
			Error::InvalidOptions { scheme, source } => {
				assert_eq!(scheme, name("broken"));
				assert_eq!(
					source,
					OptionsError::InsecureMetadataSource { url: "http://idp.example/meta".into() }
				);
			},
			other => panic!("Expected invalid options, got {other:?}."),
		}
	}

	let err = service
		.dispatch(&ResolutionRequest::new(Operation::Authenticate).with_scheme(name("loop")), ())
		.expect_err("Self forwarding must fail.");

	assert!(err.to_string().starts_with("Attempting to authenticate with the 'loop' scheme"));
}

#[test]
fn loose_url_text_loads_and_is_judged_on_first_use() -> color_eyre::Result<()> {
	let config = AuthenticationConfig::from_json_str(
		r#"{
			"schemes": [
				{
					"name": "blank",
					"capabilities": ["challenge"],
					"openid_connect": {
						"authority": "",
						"metadata_address": "https://idp.example/meta",
						"client_id": "web"
					}
				},
				{
					"name": "relative",
					"capabilities": ["challenge"],
					"openid_connect": { "authority": "idp.example", "client_id": "web" }
				}
			]
		}"#,
	)?;
	let service = AuthenticationService::from_config(config)?;
	let dispatch = service.challenge(Some(&name("blank")))?;
	let options = dispatch.options.expect("blank has options.");

	assert!(options.authority.is_none());
	assert!(matches!(
		options.metadata_source(),
		Some(MetadataSource::Discovery(address)) if address.as_str() == "https://idp.example/meta"
	));

	let err = service.challenge(Some(&name("relative"))).expect_err("Relative authority must fail.");

	assert!(matches!(
		err,
		Error::InvalidOptions {
			source: OptionsError::InvalidUrl { argument: "authority", ref value },
			..
		} if value == "idp.example"
	));

	Ok(())
}

#[test]
fn duplicate_configured_schemes_fail_registration() {
	let config = AuthenticationConfig::from_json_str(
		r#"{ "schemes": [ { "name": "Cookies" }, { "name": "Cookies" } ] }"#,
	)
	.expect("Duplicate names still parse.");
	let err = AuthenticationService::from_config(config).expect_err("Duplicates must be rejected.");

	assert!(matches!(
		err,
		Error::Registry(RegistryError::DuplicateScheme { ref scheme }) if scheme.as_str() == "Cookies"
	));
}

#[test]
fn malformed_configuration_reports_the_offending_path() {
	let err = AuthenticationConfig::from_json_str(
		r#"{ "schemes": [ { "name": "oidc", "capabilities": ["challenge", "redirect"] } ] }"#,
	)
	.expect_err("Unknown operations must be rejected.");

	assert!(matches!(err, ConfigError::Parse { .. }));
	assert!(err.to_string().contains("schemes[0].capabilities"), "{err}");
}

#[derive(Debug, Default)]
struct CountingManager {
	calls: AtomicUsize,
	refreshes: AtomicUsize,
}
impl ConfigurationManager for CountingManager {
	fn get_configuration(&self) -> ConfigurationFuture<'_> {
		let call = self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			if call == 0 {
				Err(MetadataError::Unavailable { message: "warming up".into() })
			} else {
				Ok(ProviderMetadata::new("https://managed.example"))
			}
		})
	}

	fn request_refresh(&self) {
		self.refreshes.fetch_add(1, Ordering::SeqCst);
	}
}

#[tokio::test]
async fn configuration_manager_satisfies_source_requirement() {
	let manager = Arc::new(CountingManager::default());
	let registry = SchemeRegistry::builder()
		.defaults(SchemeDefaults::with_scheme(name("Cookies")))
		.add_scheme(
			AuthenticationScheme::builder(name("Cookies"))
				.capabilities(HandlerCapabilities::all())
				.build(),
		)
		.add_openid_connect(
			AuthenticationScheme::builder(name("managed"))
				.capabilities(HandlerCapabilities::remote())
				.build(),
			OpenIdConnectOptions::new("web").with_configuration_manager(manager.clone()),
		)
		.build()
		.expect("Registry fixture should build.");
	let service = AuthenticationService::new(Arc::new(registry));
	let dispatch = service.authenticate(Some(&name("managed"))).expect("Manager is a valid source.");
	let options = dispatch.options.expect("Options should be attached.");
	let source = options.metadata_source().and_then(|source| match source {
		MetadataSource::Manager(manager) => Some(manager.clone()),
		_ => None,
	});
	let source = source.expect("The configured manager should be the metadata source.");
	let first = source.get_configuration().await;

	assert!(matches!(first, Err(MetadataError::Unavailable { .. })));

	source.request_refresh();

	let metadata = source.get_configuration().await.expect("Second call should succeed.");

	assert_eq!(metadata.issuer, "https://managed.example");
	assert_eq!(manager.calls.load(Ordering::SeqCst), 2);
	assert_eq!(manager.refreshes.load(Ordering::SeqCst), 1);
}
