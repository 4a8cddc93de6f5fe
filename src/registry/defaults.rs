//! Default scheme names per operation.

// self
use crate::{
	_prelude::*,
	scheme::{Operation, SchemeName},
};

/// Default scheme names used when an operation is requested without an explicit scheme.
///
/// Lookups fall back the way hosts usually expect: `forbid` falls back to the challenge
/// default, `sign_out` falls back to the sign-in default, and every other operation falls back
/// to [`scheme`](Self::scheme).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeDefaults {
	/// Catch-all default.
	pub scheme: Option<SchemeName>,
	/// Default for [`Operation::Authenticate`].
	pub authenticate: Option<SchemeName>,
	/// Default for [`Operation::Challenge`].
	pub challenge: Option<SchemeName>,
	/// Default for [`Operation::Forbid`].
	pub forbid: Option<SchemeName>,
	/// Default for [`Operation::SignIn`].
	pub sign_in: Option<SchemeName>,
	/// Default for [`Operation::SignOut`].
	pub sign_out: Option<SchemeName>,
}
impl SchemeDefaults {
	/// Uses `scheme` as the catch-all default.
	pub fn with_scheme(scheme: SchemeName) -> Self {
		Self { scheme: Some(scheme), ..Default::default() }
	}

	/// Overrides the default for a single operation.
	pub fn with_operation(mut self, operation: Operation, scheme: SchemeName) -> Self {
		let slot = match operation {
			Operation::Authenticate => &mut self.authenticate,
			Operation::Challenge => &mut self.challenge,
			Operation::Forbid => &mut self.forbid,
			Operation::SignIn => &mut self.sign_in,
			Operation::SignOut => &mut self.sign_out,
		};

		*slot = Some(scheme);

		self
	}

	/// Returns the effective default for `operation` after fallbacks.
	pub fn for_operation(&self, operation: Operation) -> Option<&SchemeName> {
		match operation {
			Operation::Authenticate => self.authenticate.as_ref().or(self.scheme.as_ref()),
			Operation::Challenge => self.challenge.as_ref().or(self.scheme.as_ref()),
			Operation::Forbid =>
				self.forbid.as_ref().or_else(|| self.for_operation(Operation::Challenge)),
			Operation::SignIn => self.sign_in.as_ref().or(self.scheme.as_ref()),
			Operation::SignOut =>
				self.sign_out.as_ref().or_else(|| self.for_operation(Operation::SignIn)),
		}
	}
}
