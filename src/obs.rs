//! Tracing helpers for connector flows.
//!
//! Every operation runs inside a `crm_connector.flow` span carrying the `flow` and `stage`
//! fields. Spans and events are diagnostic only; they never alter returned data.

// self
use crate::_prelude::*;

/// Connector flow kinds observed in spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Consent-URL construction and pending-authorization marker writes.
	Authorize,
	/// Redirect validation, code exchange, and credential persistence.
	Callback,
	/// Refresh token grant.
	Refresh,
	/// Record fetching and normalization.
	Fetch,
}
impl FlowKind {
	/// Returns a stable label suitable for span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Authorize => "authorize",
			FlowKind::Callback => "callback",
			FlowKind::Refresh => "refresh",
			FlowKind::Fetch => "fetch",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A span builder used by connector flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		Self { span: tracing::info_span!("crm_connector.flow", flow = kind.as_str(), stage) }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> tracing::instrument::Instrumented<Fut>
	where
		Fut: Future,
	{
		use tracing::Instrument;

		fut.instrument(self.span.clone())
	}
}
