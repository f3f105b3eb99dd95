//! Issued access tokens and token endpoint response validation.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Bearer token issued by the endpoint together with its time-to-live.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Lifetime announced by the endpoint.
	pub expires_in: Duration,
}
impl AccessToken {
	/// Parses a successful token endpoint response body.
	///
	/// `access_token` must be a non-empty string. `expires_in` must be present, numeric, finite,
	/// and non-negative. A zero lifetime is accepted; see [`is_cacheable`](Self::is_cacheable).
	pub fn from_response(status: u16, body: &[u8]) -> Result<Self> {
		let de = &mut serde_json::Deserializer::from_slice(body);
		let response: TokenEndpointResponse =
			serde_path_to_error::deserialize(de).map_err(|source| Error::MalformedResponse {
				reason: "body is not a valid token response".into(),
				status,
				source: Some(source),
			})?;
		let access_token = response
			.access_token
			.filter(|token| !token.is_empty())
			.ok_or_else(|| Error::malformed(status, "missing access_token"))?;
		let expires_in = response
			.expires_in
			.ok_or_else(|| Error::malformed(status, "missing expires_in"))?
			.as_f64()
			.filter(|secs| secs.is_finite())
			.ok_or_else(|| Error::malformed(status, "expires_in is not a finite number"))?;

		if expires_in < 0. {
			return Err(Error::malformed(status, "expires_in must not be negative"));
		}

		let expires_in = Duration::checked_seconds_f64(expires_in)
			.ok_or_else(|| Error::malformed(status, "expires_in exceeds the supported range"))?;

		Ok(Self { access_token: TokenSecret::new(access_token), expires_in })
	}

	/// Lifetime in seconds as a floating point value, the unit caches are written with.
	pub fn ttl_seconds(&self) -> f64 {
		self.expires_in.as_seconds_f64()
	}

	/// Returns `true` when the token lives long enough to be worth caching.
	pub fn is_cacheable(&self) -> bool {
		self.expires_in.is_positive()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("expires_in", &self.expires_in)
			.finish()
	}
}

#[derive(Deserialize)]
struct TokenEndpointResponse {
	#[serde(default)]
	access_token: Option<String>,
	#[serde(default)]
	expires_in: Option<serde_json::Number>,
}
