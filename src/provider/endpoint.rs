//! Direct token endpoint exchange.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AccessTokenRequest, CanonicalRequest, GrantType, TokenSecret},
	http::{self, TokenHttpClient},
	obs::TokenEvent,
	provider::TokenProvider,
};

impl<C> TokenProvider<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Exchanges `request` at the endpoint without consulting the cache.
	///
	/// On success the token is still written to the cache (when one is configured) with the
	/// endpoint's `expires_in` as TTL, so later [`access_token`](Self::access_token) calls can
	/// reuse it.
	pub async fn fetch_from_endpoint(&self, request: &AccessTokenRequest) -> Result<TokenSecret> {
		let grant = request.grant_type();

		self.observed(grant, "fetch_from_endpoint", async move {
			let canonical = request.canonical()?;

			self.exchange(grant, &canonical).await
		})
		.await
	}

	/// Posts the canonical request, validates the response, and populates the cache.
	pub(super) async fn exchange(
		&self,
		grant: GrantType,
		canonical: &CanonicalRequest,
	) -> Result<TokenSecret> {
		let request = http::json_post(&self.endpoint, canonical)?;

		self.observer.observe(grant, TokenEvent::EndpointRequest);

		let response =
			self.http_client.execute(request).await.map_err(http::map_client_error)?;
		let status = response.status();

		if !status.is_success() {
			return Err(Error::endpoint(status.as_u16(), response.body()));
		}

		let token = AccessToken::from_response(status.as_u16(), response.body())?;

		if let Some(cache) = &self.cache {
			// A zero TTL still reaches the cache so an older entry for the key is cleared.
			cache.set(canonical, token.access_token.clone(), token.expires_in).await?;

			let event =
				if token.is_cacheable() { TokenEvent::CacheWrite } else { TokenEvent::CacheSkip };

			self.observer.observe(grant, event);
		}

		Ok(token.access_token)
	}
}
