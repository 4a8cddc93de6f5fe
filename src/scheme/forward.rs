// self
use crate::{
	_prelude::*,
	scheme::{Operation, SchemeName},
};

/// Forwarding targets that delegate operations to other schemes.
///
/// A per-operation target wins over [`default`](Self::default); with neither set the scheme
/// handles the operation itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardingRules {
	/// Target for every operation without a dedicated override.
	pub default: Option<SchemeName>,
	/// Target for [`Operation::Authenticate`].
	pub authenticate: Option<SchemeName>,
	/// Target for [`Operation::Challenge`].
	pub challenge: Option<SchemeName>,
	/// Target for [`Operation::Forbid`].
	pub forbid: Option<SchemeName>,
	/// Target for [`Operation::SignIn`].
	pub sign_in: Option<SchemeName>,
	/// Target for [`Operation::SignOut`].
	pub sign_out: Option<SchemeName>,
}
impl ForwardingRules {
	/// Forwards every operation to `target`.
	pub fn to_scheme(target: SchemeName) -> Self {
		Self { default: Some(target), ..Default::default() }
	}

	/// Returns the dedicated override for `operation`, ignoring the default target.
	pub fn override_for(&self, operation: Operation) -> Option<&SchemeName> {
		match operation {
			Operation::Authenticate => self.authenticate.as_ref(),
			Operation::Challenge => self.challenge.as_ref(),
			Operation::Forbid => self.forbid.as_ref(),
			Operation::SignIn => self.sign_in.as_ref(),
			Operation::SignOut => self.sign_out.as_ref(),
		}
	}

	/// Returns the effective forwarding target for `operation`.
	pub fn target_for(&self, operation: Operation) -> Option<&SchemeName> {
		self.override_for(operation).or(self.default.as_ref())
	}

	/// Sets the dedicated override for `operation`.
	pub fn set(&mut self, operation: Operation, target: SchemeName) {
		let slot = match operation {
			Operation::Authenticate => &mut self.authenticate,
			Operation::Challenge => &mut self.challenge,
			Operation::Forbid => &mut self.forbid,
			Operation::SignIn => &mut self.sign_in,
			Operation::SignOut => &mut self.sign_out,
		};

		*slot = Some(target);
	}

	/// Returns true when nothing is forwarded.
	pub fn is_empty(&self) -> bool {
		self.default.is_none() && Operation::ALL.into_iter().all(|op| self.override_for(op).is_none())
	}
}
