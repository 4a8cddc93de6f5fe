//! Operation → handler resolution with forwarding and cycle detection.
//!
//! Forwarding is followed iteratively. Every scheme visited while resolving one request goes
//! into a visited set, and the first repeated name fails the request with
//! [`ResolutionError::RecursiveForward`]. A chain therefore never takes more hops than there
//! are registered schemes, however the forwarding graph is wired.

// self
use crate::{
	_prelude::*,
	obs,
	registry::{RegisteredScheme, SchemeRegistry},
	scheme::{AuthenticationScheme, HandlerCapabilities, Operation, SchemeName},
};

/// Reasons an operation cannot be routed to a handler.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ResolutionError {
	/// No scheme was requested and no default applies to the operation.
	#[error("No scheme was specified and no default scheme is configured for {operation}.")]
	NoDefaultScheme {
		/// Operation being attempted.
		operation: Operation,
	},
	/// The requested (or forwarded-to) scheme is not registered.
	#[error(
		"No authentication handler is registered for the '{scheme}' scheme. The registered schemes are: {}.",
		join(.registered, ", ")
	)]
	UnknownScheme {
		/// Missing scheme name.
		scheme: SchemeName,
		/// Operation being attempted.
		operation: Operation,
		/// Names that are registered.
		registered: Vec<SchemeName>,
	},
	/// Forwarding returned to a scheme already visited for this request.
	#[error(
		"Attempting to {} with the '{scheme}' scheme resulted in a recursive call back to itself: {}.",
		.operation.verb(),
		join(.path, " -> ")
	)]
	RecursiveForward {
		/// Operation originally requested.
		operation: Operation,
		/// Scheme the request started from.
		scheme: SchemeName,
		/// Forwarding chain, ending with the repeated name.
		path: Vec<SchemeName>,
	},
	/// The handling scheme does not perform the operation.
	#[error("{}", describe_unsupported(.scheme, .operation, .capabilities, .alternatives))]
	HandlerNotConfigured {
		/// Scheme that would have handled the operation.
		scheme: SchemeName,
		/// Operation being attempted.
		operation: Operation,
		/// What the scheme does handle.
		capabilities: HandlerCapabilities,
		/// Registered schemes that do perform the operation.
		alternatives: Vec<SchemeName>,
	},
}
impl ResolutionError {
	/// Operation the failed request attempted.
	pub fn operation(&self) -> Operation {
		match self {
			Self::NoDefaultScheme { operation }
			| Self::UnknownScheme { operation, .. }
			| Self::RecursiveForward { operation, .. }
			| Self::HandlerNotConfigured { operation, .. } => *operation,
		}
	}
}

/// Operation plus the optionally requested scheme.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionRequest {
	/// Operation to route.
	pub operation: Operation,
	/// Explicit scheme; `None` selects the default for the operation.
	pub scheme: Option<SchemeName>,
}
impl ResolutionRequest {
	/// Requests `operation` against the default scheme.
	pub fn new(operation: Operation) -> Self {
		Self { operation, scheme: None }
	}

	/// Requests `operation` against an explicit scheme.
	pub fn with_scheme(mut self, scheme: SchemeName) -> Self {
		self.scheme = Some(scheme);

		self
	}
}

/// Handler chosen for one request.
#[derive(Clone, Debug)]
pub struct Resolution<'a> {
	/// Operation being performed.
	pub operation: Operation,
	/// Forwarding chain from the originating scheme to the handling scheme, inclusive.
	pub path: Vec<SchemeName>,
	/// Handling scheme and its options.
	pub entry: &'a RegisteredScheme,
}
impl Resolution<'_> {
	/// Scheme whose handler runs.
	pub fn scheme(&self) -> &AuthenticationScheme {
		&self.entry.scheme
	}

	/// Scheme the request started from.
	pub fn origin(&self) -> &SchemeName {
		&self.path[0]
	}

	/// Returns true if at least one forwarding hop was taken.
	pub fn is_forwarded(&self) -> bool {
		self.path.len() > 1
	}
}

/// Routes operations to registered schemes.
#[derive(Clone, Debug)]
pub struct SchemeResolver {
	registry: Arc<SchemeRegistry>,
}
impl SchemeResolver {
	/// Creates a resolver over an immutable registry.
	pub fn new(registry: Arc<SchemeRegistry>) -> Self {
		Self { registry }
	}

	/// Registry the resolver reads.
	pub fn registry(&self) -> &SchemeRegistry {
		&self.registry
	}

	/// Resolves a [`ResolutionRequest`].
	pub fn resolve_request(
		&self,
		request: &ResolutionRequest,
	) -> Result<Resolution<'_>, ResolutionError> {
		self.resolve(request.operation, request.scheme.as_ref())
	}

	/// Resolves the handler for `operation`, starting at `requested` or the operation's default.
	pub fn resolve(
		&self,
		operation: Operation,
		requested: Option<&SchemeName>,
	) -> Result<Resolution<'_>, ResolutionError> {
		let origin = match requested {
			Some(name) => name,
			None => self
				.registry
				.default_for(operation)
				.ok_or(ResolutionError::NoDefaultScheme { operation })?,
		};
		let mut visited = HashSet::with_capacity(self.registry.len());
		let mut path = vec![origin.clone()];
		let mut current = origin;

		visited.insert(origin);

		loop {
			let entry = self.registry.entry(current).ok_or_else(|| {
				ResolutionError::UnknownScheme {
					scheme: current.clone(),
					operation,
					registered: self.registry.names().cloned().collect(),
				}
			})?;
			let Some(target) = entry.scheme.forward.target_for(operation) else {
				if !entry.scheme.handles(operation) {
					return Err(ResolutionError::HandlerNotConfigured {
						scheme: current.clone(),
						operation,
						capabilities: entry.scheme.capabilities,
						alternatives: self.registry.schemes_supporting(operation).cloned().collect(),
					});
				}

				return Ok(Resolution { operation, path, entry });
			};

			path.push(target.clone());

			if !visited.insert(target) {
				return Err(ResolutionError::RecursiveForward {
					operation,
					scheme: origin.clone(),
					path,
				});
			}

			obs::trace_forward(operation, current, target);

			current = target;
		}
	}
}

fn join(names: &[SchemeName], separator: &str) -> String {
	if names.is_empty() {
		return "(none)".into();
	}

	names.iter().map(SchemeName::as_str).collect::<Vec<_>>().join(separator)
}

fn describe_unsupported(
	scheme: &SchemeName,
	operation: &Operation,
	capabilities: &HandlerCapabilities,
	alternatives: &[SchemeName],
) -> String {
	let mut message = format!(
		"The handler registered for the '{scheme}' scheme is configured to handle {capabilities} and cannot be used to {}.",
		operation.verb()
	);

	if operation.is_sign_in_or_out() {
		if alternatives.is_empty() {
			message.push_str(&format!(" No {} handlers are registered.", operation.verb()));
		} else {
			message.push_str(&format!(
				" The registered {} schemes are: {}.",
				operation.verb(),
				join(alternatives, ", ")
			));
		}
	}

	message
}
