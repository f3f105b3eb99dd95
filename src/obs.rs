//! Observability hooks for token acquisition.
//!
//! Every decision the provider takes is reported to a [`TokenObserver`]. The default
//! [`TracingObserver`] forwards events to `tracing` and `metrics`; tests and embedding
//! applications can inject their own observer instead of scraping process output.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `lwa_token.flow` with the `grant` and `stage` (call
//!   site) fields, plus one event per [`TokenEvent`].
//! - Enable `metrics` to increment the `lwa_token_events_total` counter for every event, labeled
//!   by `grant` + `event`.

mod metrics;
mod observer;
mod tracing;

pub use metrics::*;
pub use observer::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Steps observed while acquiring a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenEvent {
	/// Entry to a provider operation.
	Attempt,
	/// Cache returned a live token; no request is sent.
	CacheHit,
	/// Cache had no live token for the request.
	CacheMiss,
	/// Request dispatched to the token endpoint.
	EndpointRequest,
	/// Issued token written to the cache.
	CacheWrite,
	/// Issued token not cached because its lifetime is zero; any older entry is cleared.
	CacheSkip,
	/// Operation returned a token.
	Success,
	/// Operation failed; the error is propagated to the caller.
	Failure,
}
impl TokenEvent {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenEvent::Attempt => "attempt",
			TokenEvent::CacheHit => "cache_hit",
			TokenEvent::CacheMiss => "cache_miss",
			TokenEvent::EndpointRequest => "endpoint_request",
			TokenEvent::CacheWrite => "cache_write",
			TokenEvent::CacheSkip => "cache_skip",
			TokenEvent::Success => "success",
			TokenEvent::Failure => "failure",
		}
	}
}
impl Display for TokenEvent {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
