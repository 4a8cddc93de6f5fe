// self
use crate::{_prelude::*, scheme::Operation};

/// `auth_schemes.operation` span opened around each service entry point.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Opens the span for `operation`; `stage` names the entry point that was called.
	pub fn new(operation: Operation, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("auth_schemes.operation", operation = operation.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, stage);

			Self {}
		}
	}

	/// Enters the span until the returned guard drops.
	pub fn entered(self) -> OperationSpanGuard {
		#[cfg(feature = "tracing")]
		{
			OperationSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			OperationSpanGuard {}
		}
	}
}

/// Keeps an [`OperationSpan`] entered while alive.
pub struct OperationSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for OperationSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("OperationSpanGuard(..)")
	}
}

/// Logs one forwarding hop at debug level with the `from` and `to` scheme names.
pub fn trace_forward(operation: Operation, from: &str, to: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(operation = operation.as_str(), from, to, "forwarding operation");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (operation, from, to);
	}
}

/// Logs a warning naming the scheme whose options failed first-use validation.
pub fn trace_rejected_options(scheme: &str, error: &dyn std::error::Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(scheme, error = %error, "rejected scheme options");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (scheme, error);
	}
}
