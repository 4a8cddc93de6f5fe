// self
use crate::_prelude::*;

/// Request-level authentication operations routed through the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
	/// Establish the caller's identity from the request.
	Authenticate,
	/// Ask an unauthenticated caller to authenticate.
	Challenge,
	/// Reject an authenticated caller lacking permission.
	Forbid,
	/// Persist a principal (cookie issuance and similar).
	SignIn,
	/// Drop a persisted principal.
	SignOut,
}
impl Operation {
	/// Every operation in pipeline order.
	pub const ALL: [Operation; 5] = [
		Operation::Authenticate,
		Operation::Challenge,
		Operation::Forbid,
		Operation::SignIn,
		Operation::SignOut,
	];

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Authenticate => "authenticate",
			Operation::Challenge => "challenge",
			Operation::Forbid => "forbid",
			Operation::SignIn => "sign_in",
			Operation::SignOut => "sign_out",
		}
	}

	/// Returns the verb used in human-readable messages.
	pub const fn verb(self) -> &'static str {
		match self {
			Operation::Authenticate => "authenticate",
			Operation::Challenge => "challenge",
			Operation::Forbid => "forbid",
			Operation::SignIn => "sign in",
			Operation::SignOut => "sign out",
		}
	}

	/// Returns true for the operations that persist or drop a principal.
	pub const fn is_sign_in_or_out(self) -> bool {
		matches!(self, Operation::SignIn | Operation::SignOut)
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Operations a registered handler is able to perform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Operation>", into = "Vec<Operation>")]
pub struct HandlerCapabilities {
	/// Handler can authenticate requests.
	pub authenticate: bool,
	/// Handler can issue challenges.
	pub challenge: bool,
	/// Handler can issue forbid responses.
	pub forbid: bool,
	/// Handler can sign a principal in.
	pub sign_in: bool,
	/// Handler can sign a principal out.
	pub sign_out: bool,
}
impl HandlerCapabilities {
	/// Capabilities of a full sign-in handler (cookies and similar).
	pub const fn all() -> Self {
		Self { authenticate: true, challenge: true, forbid: true, sign_in: true, sign_out: true }
	}

	/// Capabilities of a remote handler that delegates persistence to a sign-in scheme.
	pub const fn remote() -> Self {
		Self { authenticate: true, challenge: true, forbid: true, sign_in: false, sign_out: false }
	}

	/// Capabilities of a handler that can only challenge.
	pub const fn challenge_only() -> Self {
		Self {
			authenticate: false,
			challenge: true,
			forbid: false,
			sign_in: false,
			sign_out: false,
		}
	}

	/// Returns true if the provided operation is supported.
	pub fn supports(self, operation: Operation) -> bool {
		match operation {
			Operation::Authenticate => self.authenticate,
			Operation::Challenge => self.challenge,
			Operation::Forbid => self.forbid,
			Operation::SignIn => self.sign_in,
			Operation::SignOut => self.sign_out,
		}
	}

	/// Marks an operation as supported.
	pub fn enable(mut self, operation: Operation) -> Self {
		match operation {
			Operation::Authenticate => self.authenticate = true,
			Operation::Challenge => self.challenge = true,
			Operation::Forbid => self.forbid = true,
			Operation::SignIn => self.sign_in = true,
			Operation::SignOut => self.sign_out = true,
		}

		self
	}

	/// Returns true when no operations are enabled.
	pub fn is_empty(self) -> bool {
		Operation::ALL.into_iter().all(|op| !self.supports(op))
	}

	/// Iterates over the enabled operations in pipeline order.
	pub fn iter(self) -> impl Iterator<Item = Operation> {
		Operation::ALL.into_iter().filter(move |op| self.supports(*op))
	}
}
impl FromIterator<Operation> for HandlerCapabilities {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = Operation>,
	{
		iter.into_iter().fold(Self::default(), Self::enable)
	}
}
impl From<Vec<Operation>> for HandlerCapabilities {
	fn from(value: Vec<Operation>) -> Self {
		value.into_iter().collect()
	}
}
impl From<HandlerCapabilities> for Vec<Operation> {
	fn from(value: HandlerCapabilities) -> Self {
		value.iter().collect()
	}
}
impl Display for HandlerCapabilities {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		if self.is_empty() {
			return f.write_str("no operations");
		}

		for (idx, op) in self.iter().enumerate() {
			if idx > 0 {
				f.write_str(", ")?;
			}

			f.write_str(op.verb())?;
		}

		Ok(())
	}
}
