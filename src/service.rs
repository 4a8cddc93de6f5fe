//! Authentication entry points used by the request pipeline.
//!
//! Each entry point resolves the handling scheme, validates that scheme's OpenID Connect
//! options on first use, and returns a [`Dispatch`] describing what the host's handler should
//! run. Any failure aborts only the requested operation; nothing is handed off.
//!
//! Only the handling scheme's options are validated. Schemes passed through while forwarding
//! keep their options untouched until an operation stops at them.

// self
use crate::{
	_prelude::*,
	config::AuthenticationConfig,
	obs::{self, OperationSpan, Outcome},
	oidc::OpenIdConnectOptions,
	registry::SchemeRegistry,
	resolver::{ResolutionRequest, SchemeResolver},
	scheme::{AuthenticationScheme, Operation, SchemeName},
};

/// Work handed to the host's handler after successful resolution and validation.
#[derive(Debug)]
pub struct Dispatch<'a, P = ()> {
	/// Operation to perform.
	pub operation: Operation,
	/// Scheme whose handler runs.
	pub scheme: &'a AuthenticationScheme,
	/// Forwarding chain from the originating scheme to [`scheme`](Self::scheme), inclusive.
	pub path: Vec<SchemeName>,
	/// Validated options, for OpenID Connect schemes.
	pub options: Option<Arc<OpenIdConnectOptions>>,
	/// Operation payload (the principal for sign-in).
	pub payload: P,
}

/// Routes the five authentication operations to registered handlers.
#[derive(Clone, Debug)]
pub struct AuthenticationService {
	resolver: SchemeResolver,
}
impl AuthenticationService {
	/// Creates a service over an immutable registry.
	pub fn new(registry: Arc<SchemeRegistry>) -> Self {
		Self { resolver: SchemeResolver::new(registry) }
	}

	/// Builds the registry from configuration and wraps it in a service.
	pub fn from_config(config: AuthenticationConfig) -> Result<Self> {
		Ok(Self::new(Arc::new(config.into_registry()?)))
	}

	/// Registry backing the service.
	pub fn registry(&self) -> &SchemeRegistry {
		self.resolver.registry()
	}

	/// Resolver backing the service.
	pub fn resolver(&self) -> &SchemeResolver {
		&self.resolver
	}

	/// Routes an authenticate call.
	pub fn authenticate(&self, scheme: Option<&SchemeName>) -> Result<Dispatch<'_>> {
		self.run(Operation::Authenticate, scheme, (), "authenticate")
	}

	/// Routes a challenge.
	pub fn challenge(&self, scheme: Option<&SchemeName>) -> Result<Dispatch<'_>> {
		self.run(Operation::Challenge, scheme, (), "challenge")
	}

	/// Routes a forbid.
	pub fn forbid(&self, scheme: Option<&SchemeName>) -> Result<Dispatch<'_>> {
		self.run(Operation::Forbid, scheme, (), "forbid")
	}

	/// Routes a sign-in carrying `principal`.
	pub fn sign_in<P>(&self, scheme: Option<&SchemeName>, principal: P) -> Result<Dispatch<'_, P>> {
		self.run(Operation::SignIn, scheme, principal, "sign_in")
	}

	/// Routes a sign-out.
	pub fn sign_out(&self, scheme: Option<&SchemeName>) -> Result<Dispatch<'_>> {
		self.run(Operation::SignOut, scheme, (), "sign_out")
	}

	/// Routes an arbitrary [`ResolutionRequest`] with a payload.
	pub fn dispatch<P>(&self, request: &ResolutionRequest, payload: P) -> Result<Dispatch<'_, P>> {
		self.run(request.operation, request.scheme.as_ref(), payload, "dispatch")
	}

	fn run<P>(
		&self,
		operation: Operation,
		scheme: Option<&SchemeName>,
		payload: P,
		stage: &'static str,
	) -> Result<Dispatch<'_, P>> {
		let _span = OperationSpan::new(operation, stage).entered();

		obs::record_operation_outcome(operation, Outcome::Attempt);

		let result = self.prepare(operation, scheme, payload);

		obs::record_operation_outcome(operation, Outcome::of(&result));

		result
	}

	fn prepare<P>(
		&self,
		operation: Operation,
		scheme: Option<&SchemeName>,
		payload: P,
	) -> Result<Dispatch<'_, P>> {
		let resolution = self.resolver.resolve(operation, scheme)?;
		let entry = resolution.entry;
		let options = match &entry.options {
			Some(cell) => Some(
				cell.get(self.registry().default_for(Operation::SignIn)).map_err(|source| {
					Error::InvalidOptions { scheme: cell.scheme().clone(), source }
				})?,
			),
			None => None,
		};

		Ok(Dispatch {
			operation,
			scheme: &entry.scheme,
			path: resolution.path,
			options,
			payload,
		})
	}
}
