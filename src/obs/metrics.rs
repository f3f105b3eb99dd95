// self
use crate::{auth::GrantType, obs::TokenEvent};

/// Records a token event via the global metrics recorder (when enabled).
pub fn record_token_event(grant: GrantType, event: TokenEvent) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"lwa_token_events_total",
			"grant" => grant.as_str(),
			"event" => event.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (grant, event);
	}
}
