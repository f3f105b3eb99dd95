// self
use crate::{
	_prelude::*,
	auth::GrantType,
	obs::{self, TokenEvent},
};

/// Receives every [`TokenEvent`] emitted by a provider.
pub trait TokenObserver
where
	Self: Send + Sync,
{
	/// Handles one event for a request using `grant`.
	fn observe(&self, grant: GrantType, event: TokenEvent);
}

/// Default observer that logs through `tracing` and counts through `metrics`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;
impl TokenObserver for TracingObserver {
	fn observe(&self, grant: GrantType, event: TokenEvent) {
		#[cfg(feature = "tracing")]
		{
			match event {
				TokenEvent::CacheHit => tracing::debug!(%grant, "Token retrieved from cache."),
				TokenEvent::CacheMiss =>
					tracing::debug!(%grant, "Token not in cache, fetching from endpoint."),
				TokenEvent::CacheSkip =>
					tracing::debug!(%grant, "Token expires immediately, skipping cache write."),
				TokenEvent::Failure => tracing::warn!(%grant, "Token acquisition failed."),
				other => tracing::trace!(%grant, event = other.as_str()),
			}
		}

		obs::record_token_event(grant, event);
	}
}

/// Observer that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;
impl TokenObserver for NoopObserver {
	fn observe(&self, _: GrantType, _: TokenEvent) {}
}

/// Adapts a closure into a [`TokenObserver`].
#[derive(Clone, Copy)]
pub struct FnObserver<F>(pub F);
impl<F> TokenObserver for FnObserver<F>
where
	F: Fn(GrantType, TokenEvent) + Send + Sync,
{
	fn observe(&self, grant: GrantType, event: TokenEvent) {
		(self.0)(grant, event)
	}
}
impl<F> Debug for FnObserver<F> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FnObserver(..)")
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use parking_lot::Mutex;
	// self
	use super::*;

	#[test]
	fn closures_act_as_observers() {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let sink = seen.clone();
		let observer: Arc<dyn TokenObserver> =
			Arc::new(FnObserver(move |grant: GrantType, event: TokenEvent| {
				sink.lock().push((grant, event))
			}));

		observer.observe(GrantType::RefreshToken, TokenEvent::CacheHit);
		TracingObserver.observe(GrantType::RefreshToken, TokenEvent::CacheMiss);
		NoopObserver.observe(GrantType::RefreshToken, TokenEvent::Failure);

		assert_eq!(*seen.lock(), vec![(GrantType::RefreshToken, TokenEvent::CacheHit)]);
	}
}
