//! Crate-level error types shared by the provider, transports, and caches.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Placeholder recorded when an endpoint error response carries no body.
pub const NO_RESPONSE_BODY: &str = "No response body";

/// Canonical error exposed by public APIs.
///
/// Every variant is terminal for the call that produced it; nothing is retried internally.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Request descriptor could not be canonically serialized.
	#[error(transparent)]
	Encoding(#[from] EncodingError),
	/// Token endpoint answered with a non-success HTTP status.
	#[error("Unsuccessful token exchange. Status: {status}, Response: {body}")]
	Endpoint {
		/// HTTP status code returned by the endpoint.
		status: u16,
		/// Raw response body, or [`NO_RESPONSE_BODY`] when the endpoint sent nothing.
		body: String,
	},
	/// Token endpoint answered successfully but the body is unusable.
	#[error("Token endpoint response is malformed: {reason}.")]
	MalformedResponse {
		/// Short description of what was missing or invalid.
		reason: String,
		/// HTTP status code of the response.
		status: u16,
		/// Structured JSON failure, when the body could not be parsed at all.
		#[source]
		source: Option<serde_path_to_error::Error<serde_json::Error>>,
	},
	/// Transport failure (DNS, TCP, TLS, request construction).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Cache backend failure.
	#[error("{0}")]
	Cache(
		#[from]
		#[source]
		crate::cache::CacheError,
	),
}
impl Error {
	/// Builds a [`Error::MalformedResponse`] without a parsing source.
	pub fn malformed(status: u16, reason: impl Into<String>) -> Self {
		Self::MalformedResponse { reason: reason.into(), status, source: None }
	}

	/// Builds a [`Error::Endpoint`] from a raw response body.
	pub fn endpoint(status: u16, body: &[u8]) -> Self {
		let body = if body.is_empty() {
			NO_RESPONSE_BODY.to_owned()
		} else {
			String::from_utf8_lossy(body).into_owned()
		};

		Self::Endpoint { status, body }
	}
}

/// Failures raised while validating or encoding an access token request.
#[derive(Debug, ThisError)]
pub enum EncodingError {
	/// Client identifier is empty.
	#[error("Client identifier cannot be empty.")]
	MissingClientId,
	/// Client secret is empty.
	#[error("Client secret cannot be empty.")]
	MissingClientSecret,
	/// The refresh token grant was requested without a refresh token.
	#[error("The refresh_token grant requires a refresh token.")]
	MissingRefreshToken,
	/// The client credentials grant was requested without scopes.
	#[error("The client_credentials grant requires at least one scope.")]
	MissingScope,
	/// Requested scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Serializer rejected the request descriptor.
	#[error("Request body could not be encoded.")]
	Serialize(#[from] serde_json::Error),
	/// Serializer produced no bytes.
	#[error("Request body could not be encoded: encoding produced no bytes.")]
	Empty,
}

/// Transport-level failures (network, IO, request construction).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Outbound HTTP request could not be constructed.
	#[error("HTTP request for the token endpoint could not be built.")]
	Request(#[from] oauth2::http::Error),
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
	/// Transport reported a failure without a typed cause.
	#[error("HTTP client error occurred while calling the token endpoint: {message}.")]
	Other {
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
