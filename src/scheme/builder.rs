// std
use std::iter::IntoIterator;
// self
use crate::{
	_prelude::*,
	scheme::{AuthenticationScheme, ForwardingRules, HandlerCapabilities, Operation, SchemeName},
};

/// Builder for [`AuthenticationScheme`] values.
#[derive(Debug)]
pub struct AuthenticationSchemeBuilder {
	/// Name the scheme registers under.
	pub name: SchemeName,
	/// Optional human-readable name.
	pub display_name: Option<String>,
	/// Operations the handler performs itself.
	pub capabilities: HandlerCapabilities,
	/// Forwarding targets.
	pub forward: ForwardingRules,
}
impl AuthenticationSchemeBuilder {
	/// Creates a new builder seeded with the provided name.
	pub fn new(name: SchemeName) -> Self {
		Self {
			name,
			display_name: None,
			capabilities: HandlerCapabilities::default(),
			forward: ForwardingRules::default(),
		}
	}

	/// Sets the display name.
	pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
		self.display_name = Some(display_name.into());

		self
	}

	/// Marks a single operation as handled.
	pub fn handles(mut self, operation: Operation) -> Self {
		self.capabilities = self.capabilities.enable(operation);

		self
	}

	/// Marks multiple operations as handled.
	pub fn handles_all<I>(mut self, operations: I) -> Self
	where
		I: IntoIterator<Item = Operation>,
	{
		for operation in operations.into_iter() {
			self.capabilities = self.capabilities.enable(operation);
		}

		self
	}

	/// Replaces the capability set.
	pub fn capabilities(mut self, capabilities: HandlerCapabilities) -> Self {
		self.capabilities = capabilities;

		self
	}

	/// Forwards every operation without a dedicated override to `target`.
	pub fn forward_default(mut self, target: SchemeName) -> Self {
		self.forward.default = Some(target);

		self
	}

	/// Forwards `operation` to `target`.
	pub fn forward(mut self, operation: Operation, target: SchemeName) -> Self {
		self.forward.set(operation, target);

		self
	}

	/// Replaces the forwarding rules.
	pub fn forwarding(mut self, forward: ForwardingRules) -> Self {
		self.forward = forward;

		self
	}

	/// Consumes the builder.
	///
	/// Forward targets are not checked here; unknown or cyclic targets surface when an
	/// operation is resolved.
	pub fn build(self) -> AuthenticationScheme {
		AuthenticationScheme {
			name: self.name,
			display_name: self.display_name,
			capabilities: self.capabilities,
			forward: self.forward,
		}
	}
}
