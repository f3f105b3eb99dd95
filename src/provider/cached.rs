//! Cache-first token acquisition.

// self
use crate::{
	_prelude::*,
	auth::{AccessTokenRequest, TokenSecret},
	http::TokenHttpClient,
	obs::TokenEvent,
	provider::TokenProvider,
};

impl<C> TokenProvider<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Returns a valid access token for `request`.
	///
	/// With a cache configured, a live entry for the request's canonical form is returned
	/// verbatim and no request is sent; a miss falls through to the endpoint exchange. Without a
	/// cache every call performs exactly one exchange.
	pub async fn access_token(&self, request: &AccessTokenRequest) -> Result<TokenSecret> {
		let grant = request.grant_type();

		self.observed(grant, "access_token", async move {
			let canonical = request.canonical()?;
			let Some(cache) = &self.cache else {
				return self.exchange(grant, &canonical).await;
			};

			if let Some(token) = cache.get(&canonical).await? {
				self.observer.observe(grant, TokenEvent::CacheHit);

				return Ok(token);
			}

			self.observer.observe(grant, TokenEvent::CacheMiss);

			self.exchange(grant, &canonical).await
		})
		.await
	}
}
