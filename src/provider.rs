//! Token acquisition with optional caching.
//!
//! [`TokenProvider`] owns the transport, the endpoint URL, an optional cache, and an observer.
//! [`TokenProvider::access_token`] consults the cache before contacting the endpoint, while
//! [`TokenProvider::fetch_from_endpoint`] always performs the exchange (and still refreshes the
//! cache on success). Each call is a single async chain: no background tasks, no retries, and no
//! coordination between concurrent callers, so two callers missing the same key may both fetch.

mod cached;
mod endpoint;

// self
use crate::{
	_prelude::*,
	auth::{GrantType, TokenSecret},
	cache::TokenCache,
	http::TokenHttpClient,
	obs::{FlowSpan, TokenEvent, TokenObserver, TracingObserver},
};
#[cfg(feature = "reqwest")]
use crate::{auth::LwaCredentials, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Provider specialized for the crate's default reqwest transport.
pub type ReqwestTokenProvider = TokenProvider<ReqwestHttpClient>;

/// Exchanges access token requests at a single endpoint, reusing cached tokens when possible.
pub struct TokenProvider<C>
where
	C: ?Sized + TokenHttpClient,
{
	http_client: Arc<C>,
	endpoint: Url,
	cache: Option<Arc<dyn TokenCache>>,
	observer: Arc<dyn TokenObserver>,
}
impl<C> TokenProvider<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a provider that reuses the caller-provided transport. Caching starts disabled.
	pub fn with_http_client(endpoint: Url, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			http_client: http_client.into(),
			endpoint,
			cache: None,
			observer: Arc::new(TracingObserver),
		}
	}

	/// Enables caching through `cache`.
	pub fn with_cache(mut self, cache: Arc<dyn TokenCache>) -> Self {
		self.cache = Some(cache);

		self
	}

	/// Replaces the observer that receives [`TokenEvent`]s.
	pub fn with_observer(mut self, observer: Arc<dyn TokenObserver>) -> Self {
		self.observer = observer;

		self
	}

	/// Replaces the transport.
	pub fn set_http_client(&mut self, http_client: impl Into<Arc<C>>) {
		self.http_client = http_client.into();
	}

	/// Replaces the cache; `None` disables caching.
	pub fn set_cache(&mut self, cache: Option<Arc<dyn TokenCache>>) {
		self.cache = cache;
	}

	/// Replaces the observer.
	pub fn set_observer(&mut self, observer: Arc<dyn TokenObserver>) {
		self.observer = observer;
	}

	/// Token endpoint this provider posts to.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Transport used for every exchange.
	pub fn http_client(&self) -> &Arc<C> {
		&self.http_client
	}

	/// Configured cache, if caching is enabled.
	pub fn cache(&self) -> Option<&Arc<dyn TokenCache>> {
		self.cache.as_ref()
	}

	/// Runs `fut` inside a flow span, reporting attempt and outcome events.
	async fn observed<Fut>(
		&self,
		grant: GrantType,
		stage: &'static str,
		fut: Fut,
	) -> Result<TokenSecret>
	where
		Fut: Future<Output = Result<TokenSecret>>,
	{
		let span = FlowSpan::new(grant, stage);

		self.observer.observe(grant, TokenEvent::Attempt);

		let result = span.instrument(fut).await;

		match &result {
			Ok(_) => self.observer.observe(grant, TokenEvent::Success),
			Err(_) => self.observer.observe(grant, TokenEvent::Failure),
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl TokenProvider<ReqwestHttpClient> {
	/// Creates a provider with its own reqwest-backed transport.
	pub fn new(endpoint: Url) -> Self {
		Self::with_http_client(endpoint, ReqwestHttpClient::default())
	}

	/// Creates a provider for the endpoint named by `credentials`.
	pub fn from_credentials(credentials: &LwaCredentials) -> Self {
		Self::new(credentials.endpoint.clone())
	}
}
impl<C> Clone for TokenProvider<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			endpoint: self.endpoint.clone(),
			cache: self.cache.clone(),
			observer: self.observer.clone(),
		}
	}
}
impl<C> Debug for TokenProvider<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenProvider")
			.field("endpoint", &self.endpoint.as_str())
			.field("cache_enabled", &self.cache.is_some())
			.finish()
	}
}
