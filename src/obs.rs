//! Optional tracing hooks around provider calls; no-ops unless the `tracing`
//! feature is enabled.

// self
use crate::_prelude::*;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// Provider calls that get their own span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
	/// Authorization-code exchange at the token endpoint.
	ExchangeCode,
	/// Refresh-token grant at the token endpoint.
	RefreshToken,
	/// Account fetch for the resource owner.
	ResourceOwner,
}
impl RequestKind {
	/// Returns the span label for the request kind.
	pub fn as_str(self) -> &'static str {
		match self {
			RequestKind::ExchangeCode => "exchange_code",
			RequestKind::RefreshToken => "refresh_token",
			RequestKind::ResourceOwner => "resource_owner",
		}
	}
}
impl Display for RequestKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Span builder used by provider calls.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the request kind.
	pub fn new(kind: RequestKind) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("oauth2_digitalocean.request", request = kind.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = kind;

			Self {}
		}
	}

	/// Instruments an async request without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Records DigitalOcean's remaining rate-limit budget, when reported.
	pub fn note_rate_limit(&self, remaining: Option<u64>) {
		#[cfg(feature = "tracing")]
		if let Some(remaining) = remaining {
			tracing::debug!(
				parent: &self.span,
				ratelimit_remaining = remaining,
				"DigitalOcean rate-limit headroom.",
			);
		}
		#[cfg(not(feature = "tracing"))]
		let _ = remaining;
	}
}
