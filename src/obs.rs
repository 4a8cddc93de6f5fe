//! Observability for scheme routing and options validation.
//!
//! # Feature Flags
//!
//! - `tracing` (default): each service entry point runs inside an `auth_schemes.operation`
//!   span carrying `operation` and `stage`. Forwarding hops are logged at debug level and
//!   rejected options at warn level.
//! - `metrics`: entry point calls count into `auth_schemes_operation_total` by `operation` and
//!   `outcome`; validation passes count into `auth_schemes_options_validation_total` by
//!   `outcome`.
//!
//! With both features off every helper compiles to nothing.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Stage of an entry point call or validation pass, used as the `outcome` label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Call entered; counted before resolution or validation runs.
	Attempt,
	/// Handler resolved, or options accepted.
	Success,
	/// Resolution or validation error returned to the host.
	Failure,
}
impl Outcome {
	/// Label value written to the counters.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}

	/// `Success` for `Ok`, `Failure` for `Err`.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		if result.is_ok() { Outcome::Success } else { Outcome::Failure }
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
