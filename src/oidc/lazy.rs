//! Per-scheme cell that validates OpenID Connect options once, on first use.

// self
use crate::{
	_prelude::*,
	obs::{self, Outcome},
	oidc::{OpenIdConnectOptions, OptionsError},
	scheme::SchemeName,
};

/// Per-scheme options cell that validates on first use and caches the result.
///
/// The cell moves from unvalidated to validated exactly once. Concurrent first users serialize
/// on the pending options; the first successful pass publishes an immutable snapshot that every
/// later call returns without locking. Failures are not cached: the pending options stay
/// untouched, so the next attempt re-runs validation and fails the same way.
pub struct LazyOptions {
	scheme: SchemeName,
	pending: Mutex<OpenIdConnectOptions>,
	validated: OnceLock<Arc<OpenIdConnectOptions>>,
}
impl LazyOptions {
	/// Wraps unvalidated options owned by `scheme`.
	pub fn new(scheme: SchemeName, options: OpenIdConnectOptions) -> Self {
		Self { scheme, pending: Mutex::new(options), validated: OnceLock::new() }
	}

	/// Scheme that owns these options.
	pub fn scheme(&self) -> &SchemeName {
		&self.scheme
	}

	/// Returns true once validation has succeeded.
	pub fn is_validated(&self) -> bool {
		self.validated.get().is_some()
	}

	/// Returns the validated options, validating them on first use.
	pub fn get(
		&self,
		default_sign_in: Option<&SchemeName>,
	) -> Result<Arc<OpenIdConnectOptions>, OptionsError> {
		if let Some(options) = self.validated.get() {
			return Ok(options.clone());
		}

		let mut pending = self.pending.lock();

		if let Some(options) = self.validated.get() {
			return Ok(options.clone());
		}

		obs::record_validation_outcome(Outcome::Attempt);

		let result = pending.validate(&self.scheme, default_sign_in);

		obs::record_validation_outcome(Outcome::of(&result));

		if let Err(e) = result {
			obs::trace_rejected_options(&self.scheme, &e);

			return Err(e);
		}

		let snapshot = Arc::new(pending.clone());

		Ok(self.validated.get_or_init(|| snapshot).clone())
	}
}
impl Debug for LazyOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LazyOptions")
			.field("scheme", &self.scheme)
			.field("validated", &self.is_validated())
			.finish()
	}
}
