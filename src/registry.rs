//! Process-wide scheme registry populated once at startup.
//!
//! The registry is immutable after [`SchemeRegistryBuilder::build`] and is shared across
//! requests behind an `Arc`. Registration only rejects duplicate names: dangling forward
//! targets, missing defaults, and invalid options all surface lazily, the first time an
//! operation touches them.

pub mod defaults;

pub use defaults::*;

// self
use crate::{
	_prelude::*,
	oidc::{LazyOptions, OpenIdConnectOptions},
	scheme::{AuthenticationScheme, Operation, SchemeName},
};

/// Errors raised while registering schemes.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum RegistryError {
	/// Two schemes share a name.
	#[error("Scheme already exists: {scheme}.")]
	DuplicateScheme {
		/// Duplicated name.
		scheme: SchemeName,
	},
}

/// A registered scheme plus its lazily validated options, if it has any.
#[derive(Debug)]
pub struct RegisteredScheme {
	/// Scheme data checked by the resolver.
	pub scheme: AuthenticationScheme,
	/// OpenID Connect options validated on first use.
	pub options: Option<LazyOptions>,
}

/// Immutable name → scheme table plus per-operation defaults.
#[derive(Debug, Default)]
pub struct SchemeRegistry {
	schemes: HashMap<SchemeName, RegisteredScheme>,
	order: Vec<SchemeName>,
	defaults: SchemeDefaults,
}
impl SchemeRegistry {
	/// Creates an empty builder.
	pub fn builder() -> SchemeRegistryBuilder {
		SchemeRegistryBuilder::default()
	}

	/// Looks up a scheme by name.
	pub fn get(&self, name: &str) -> Option<&AuthenticationScheme> {
		self.schemes.get(name).map(|entry| &entry.scheme)
	}

	/// Looks up a scheme together with its options.
	pub fn entry(&self, name: &str) -> Option<&RegisteredScheme> {
		self.schemes.get(name)
	}

	/// Returns the options cell of an OpenID Connect scheme.
	pub fn options(&self, name: &str) -> Option<&LazyOptions> {
		self.schemes.get(name).and_then(|entry| entry.options.as_ref())
	}

	/// Returns true if a scheme named `name` is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.schemes.contains_key(name)
	}

	/// Registered names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &SchemeName> {
		self.order.iter()
	}

	/// Names of schemes whose handler performs `operation` itself, in registration order.
	pub fn schemes_supporting(&self, operation: Operation) -> impl Iterator<Item = &SchemeName> {
		self.order.iter().filter(move |name| {
			self.schemes.get(name.as_str()).is_some_and(|entry| entry.scheme.handles(operation))
		})
	}

	/// Configured defaults.
	pub fn defaults(&self) -> &SchemeDefaults {
		&self.defaults
	}

	/// Effective default scheme name for `operation`.
	pub fn default_for(&self, operation: Operation) -> Option<&SchemeName> {
		self.defaults.for_operation(operation)
	}

	/// Number of registered schemes.
	pub fn len(&self) -> usize {
		self.order.len()
	}

	/// Returns true when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}
}

/// Builder for [`SchemeRegistry`].
#[derive(Debug, Default)]
pub struct SchemeRegistryBuilder {
	entries: Vec<RegisteredScheme>,
	defaults: SchemeDefaults,
}
impl SchemeRegistryBuilder {
	/// Replaces the default scheme names.
	pub fn defaults(mut self, defaults: SchemeDefaults) -> Self {
		self.defaults = defaults;

		self
	}

	/// Registers a scheme without options.
	pub fn add_scheme(mut self, scheme: AuthenticationScheme) -> Self {
		self.entries.push(RegisteredScheme { scheme, options: None });

		self
	}

	/// Registers an OpenID Connect scheme; its options are validated on first use.
	pub fn add_openid_connect(
		mut self,
		scheme: AuthenticationScheme,
		options: OpenIdConnectOptions,
	) -> Self {
		let options = LazyOptions::new(scheme.name.clone(), options);

		self.entries.push(RegisteredScheme { scheme, options: Some(options) });

		self
	}

	/// Consumes the builder, rejecting duplicate names.
	pub fn build(self) -> Result<SchemeRegistry, RegistryError> {
		let mut schemes = HashMap::with_capacity(self.entries.len());
		let mut order = Vec::with_capacity(self.entries.len());

		for entry in self.entries {
			let name = entry.scheme.name.clone();

			if schemes.contains_key(&name) {
				return Err(RegistryError::DuplicateScheme { scheme: name });
			}

			order.push(name.clone());
			schemes.insert(name, entry);
		}

		Ok(SchemeRegistry { schemes, order, defaults: self.defaults })
	}
}
