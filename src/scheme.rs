//! Registered scheme data: names, operations, capabilities, and forwarding rules.
//!
//! An [`AuthenticationScheme`] is plain data. It never holds the handler itself, only the
//! capability tags the resolver checks before dispatch.

/// Builder API for assembling schemes.
pub mod builder;
/// Forwarding rules that delegate operations to other schemes.
pub mod forward;
/// Validated scheme names.
pub mod name;
/// Operations and handler capability sets.
pub mod operation;

pub use builder::*;
pub use forward::*;
pub use name::*;
pub use operation::*;

// self
use crate::_prelude::*;

/// Immutable description of a registered authentication handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationScheme {
	/// Unique registry key.
	pub name: SchemeName,
	/// Optional human-readable name (login buttons and similar).
	#[serde(default)]
	pub display_name: Option<String>,
	/// Operations the handler performs itself.
	#[serde(default)]
	pub capabilities: HandlerCapabilities,
	/// Operations delegated to other schemes.
	#[serde(default)]
	pub forward: ForwardingRules,
}
impl AuthenticationScheme {
	/// Creates a new builder for the provided name.
	pub fn builder(name: SchemeName) -> AuthenticationSchemeBuilder {
		AuthenticationSchemeBuilder::new(name)
	}

	/// Checks whether the handler performs `operation` itself.
	pub fn handles(&self, operation: Operation) -> bool {
		self.capabilities.supports(operation)
	}
}
