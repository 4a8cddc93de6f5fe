// self
use crate::{obs::Outcome, scheme::Operation};

/// Counts one entry point call stage in `auth_schemes_operation_total`.
pub fn record_operation_outcome(operation: Operation, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"auth_schemes_operation_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

/// Counts one validation pass stage in `auth_schemes_options_validation_total`.
pub fn record_validation_outcome(outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("auth_schemes_options_validation_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_metrics() {
		record_operation_outcome(Operation::SignIn, Outcome::Failure);
		record_validation_outcome(Outcome::Attempt);
	}
}
