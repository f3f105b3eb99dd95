//! Application credentials bundled with the endpoint they are exchanged at.

// self
use crate::{
	_prelude::*,
	auth::{AccessTokenRequest, TokenSecret},
	error::EncodingError,
};

/// Default Login with Amazon token endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.amazon.com/auth/o2/token";

/// Client credentials plus either a refresh token or grantless scopes.
#[derive(Clone)]
pub struct LwaCredentials {
	/// LWA client identifier.
	pub client_id: String,
	/// LWA client secret.
	pub client_secret: TokenSecret,
	/// Refresh token for seller-authorized calls.
	pub refresh_token: Option<TokenSecret>,
	/// Scopes for grantless calls.
	pub scopes: Vec<String>,
	/// Token endpoint the credentials are exchanged at.
	pub endpoint: Url,
}
impl LwaCredentials {
	/// Creates credentials bound to an explicit endpoint.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<TokenSecret>,
		endpoint: Url,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			refresh_token: None,
			scopes: Vec::new(),
			endpoint,
		}
	}

	/// Creates credentials bound to [`DEFAULT_ENDPOINT`].
	pub fn with_default_endpoint(
		client_id: impl Into<String>,
		client_secret: impl Into<TokenSecret>,
	) -> Result<Self, url::ParseError> {
		Ok(Self::new(client_id, client_secret, Url::parse(DEFAULT_ENDPOINT)?))
	}

	/// Attaches a refresh token, selecting the `refresh_token` grant.
	pub fn with_refresh_token(mut self, token: impl Into<TokenSecret>) -> Self {
		self.refresh_token = Some(token.into());

		self
	}

	/// Attaches scopes for the `client_credentials` grant.
	pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes.extend(scopes.into_iter().map(Into::into));

		self
	}

	/// Builds the request descriptor these credentials describe.
	pub fn token_request(&self) -> Result<AccessTokenRequest, EncodingError> {
		let mut builder = AccessTokenRequest::builder(&self.client_id, self.client_secret.clone())
			.scopes(self.scopes.iter().cloned());

		if let Some(refresh) = &self.refresh_token {
			builder = builder.refresh_token(refresh.clone());
		}

		builder.build()
	}
}
impl Debug for LwaCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LwaCredentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("scopes", &self.scopes)
			.field("endpoint", &self.endpoint.as_str())
			.finish()
	}
}
