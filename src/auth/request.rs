//! Access token request descriptors and their canonical encoding.
//!
//! An [`AccessTokenRequest`] is serialized exactly once per call into a [`CanonicalRequest`].
//! The same bytes become the JSON body posted to the token endpoint and the key under which
//! caches remember the issued token, so two equal descriptors always share a cache entry.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, TokenSecret},
	error::EncodingError,
};

/// Grants understood by the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Exchange a long-lived refresh token for an access token.
	RefreshToken,
	/// Grantless operations authorized by client credentials and scopes.
	ClientCredentials,
}
impl GrantType {
	/// Returns the wire label for the grant.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::RefreshToken => "refresh_token",
			GrantType::ClientCredentials => "client_credentials",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Immutable descriptor of the parameters needed to request an access token.
///
/// Field order is part of the canonical encoding: `grant_type`, `refresh_token`, `client_id`,
/// `client_secret`, `scope`. Absent optional fields are omitted.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AccessTokenRequest {
	grant_type: GrantType,
	#[serde(skip_serializing_if = "Option::is_none")]
	refresh_token: Option<TokenSecret>,
	client_id: String,
	client_secret: TokenSecret,
	#[serde(skip_serializing_if = "ScopeSet::is_empty")]
	scope: ScopeSet,
}
impl AccessTokenRequest {
	/// Returns a builder for the provided client credentials.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<TokenSecret>,
	) -> AccessTokenRequestBuilder {
		AccessTokenRequestBuilder::new(client_id.into(), client_secret.into())
	}

	/// Grant requested by this descriptor.
	pub fn grant_type(&self) -> GrantType {
		self.grant_type
	}

	/// Client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Client secret.
	pub fn client_secret(&self) -> &TokenSecret {
		&self.client_secret
	}

	/// Refresh token, present for the refresh token grant.
	pub fn refresh_token(&self) -> Option<&TokenSecret> {
		self.refresh_token.as_ref()
	}

	/// Requested scopes (empty when none were requested).
	pub fn scope(&self) -> &ScopeSet {
		&self.scope
	}

	/// Serializes the descriptor into its canonical byte form.
	pub fn canonical(&self) -> Result<CanonicalRequest, EncodingError> {
		let bytes = serde_json::to_vec(self)?;

		if bytes.is_empty() {
			return Err(EncodingError::Empty);
		}

		Ok(CanonicalRequest(bytes.into()))
	}
}
impl Debug for AccessTokenRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessTokenRequest")
			.field("grant_type", &self.grant_type)
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("scope", &self.scope)
			.finish()
	}
}

/// Builder for [`AccessTokenRequest`].
#[derive(Clone, Debug)]
pub struct AccessTokenRequestBuilder {
	client_id: String,
	client_secret: TokenSecret,
	grant_type: Option<GrantType>,
	refresh_token: Option<TokenSecret>,
	scopes: Vec<String>,
}
impl AccessTokenRequestBuilder {
	fn new(client_id: String, client_secret: TokenSecret) -> Self {
		Self { client_id, client_secret, grant_type: None, refresh_token: None, scopes: Vec::new() }
	}

	/// Overrides the grant. Without an override the grant is `refresh_token` when a refresh
	/// token was supplied and `client_credentials` otherwise.
	pub fn grant_type(mut self, grant: GrantType) -> Self {
		self.grant_type = Some(grant);

		self
	}

	/// Provides the refresh token value.
	pub fn refresh_token(mut self, token: impl Into<TokenSecret>) -> Self {
		self.refresh_token = Some(token.into());

		self
	}

	/// Adds a single scope.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scopes.push(scope.into());

		self
	}

	/// Adds several scopes.
	pub fn scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes.extend(scopes.into_iter().map(Into::into));

		self
	}

	/// Validates the parameters and produces an [`AccessTokenRequest`].
	pub fn build(self) -> Result<AccessTokenRequest, EncodingError> {
		if self.client_id.is_empty() {
			return Err(EncodingError::MissingClientId);
		}
		if self.client_secret.is_empty() {
			return Err(EncodingError::MissingClientSecret);
		}

		let refresh_token = self.refresh_token.filter(|token| !token.is_empty());
		let scope = ScopeSet::new(self.scopes)?;
		let grant_type = self.grant_type.unwrap_or(if refresh_token.is_some() {
			GrantType::RefreshToken
		} else {
			GrantType::ClientCredentials
		});

		match grant_type {
			GrantType::RefreshToken if refresh_token.is_none() =>
				return Err(EncodingError::MissingRefreshToken),
			GrantType::ClientCredentials if scope.is_empty() =>
				return Err(EncodingError::MissingScope),
			_ => {},
		}

		Ok(AccessTokenRequest {
			grant_type,
			refresh_token,
			client_id: self.client_id,
			client_secret: self.client_secret,
			scope,
		})
	}
}

/// Canonical byte encoding of an [`AccessTokenRequest`].
///
/// Equality and hashing are value based, so the encoding doubles as a cache key. The bytes
/// contain client secrets; [`fingerprint`](Self::fingerprint) gives a digest that is safe to
/// persist or log.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CanonicalRequest(Arc<[u8]>);
impl CanonicalRequest {
	/// Raw JSON bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Base64 (no padding) SHA-256 digest of the canonical bytes.
	pub fn fingerprint(&self) -> String {
		let digest = Sha256::digest(&self.0);

		STANDARD_NO_PAD.encode(digest)
	}
}
impl AsRef<[u8]> for CanonicalRequest {
	fn as_ref(&self) -> &[u8] {
		self.as_bytes()
	}
}
impl Debug for CanonicalRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CanonicalRequest")
			.field("len", &self.0.len())
			.field("fingerprint", &self.fingerprint())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn refresh_request() -> AccessTokenRequest {
		AccessTokenRequest::builder("amzn1.application-oa2-client.demo", "client-secret")
			.refresh_token("Atzr|refresh")
			.build()
			.expect("Refresh token request fixture should build.")
	}

	#[test]
	fn refresh_grant_encodes_in_fixed_field_order() {
		let canonical = refresh_request().canonical().expect("Refresh request should encode.");

		assert_eq!(
			std::str::from_utf8(canonical.as_bytes()).expect("Canonical form should be UTF-8."),
			"{\"grant_type\":\"refresh_token\",\"refresh_token\":\"Atzr|refresh\",\
			 \"client_id\":\"amzn1.application-oa2-client.demo\",\"client_secret\":\"client-secret\"}"
		);
	}

	#[test]
	fn client_credentials_grant_is_inferred_from_scopes() {
		let request = AccessTokenRequest::builder("client", "secret")
			.scopes(["sellingpartnerapi::notifications", "sellingpartnerapi::migration"])
			.build()
			.expect("Client credentials request should build.");
		let canonical = request.canonical().expect("Client credentials request should encode.");

		assert_eq!(request.grant_type(), GrantType::ClientCredentials);
		assert_eq!(
			std::str::from_utf8(canonical.as_bytes()).expect("Canonical form should be UTF-8."),
			"{\"grant_type\":\"client_credentials\",\"client_id\":\"client\",\
			 \"client_secret\":\"secret\",\
			 \"scope\":\"sellingpartnerapi::migration sellingpartnerapi::notifications\"}"
		);
	}

	#[test]
	fn encoding_is_deterministic_and_value_based() {
		let first = refresh_request().canonical().expect("First encoding should succeed.");
		let second = refresh_request().canonical().expect("Second encoding should succeed.");
		let reordered = AccessTokenRequest::builder("client", "secret")
			.scope("b")
			.scope("a")
			.build()
			.expect("Reordered scopes should build.")
			.canonical()
			.expect("Reordered scopes should encode.");
		let ordered = AccessTokenRequest::builder("client", "secret")
			.scopes(["a", "b"])
			.build()
			.expect("Ordered scopes should build.")
			.canonical()
			.expect("Ordered scopes should encode.");

		assert_eq!(first, second);
		assert_eq!(first.fingerprint(), second.fingerprint());
		assert_eq!(reordered, ordered);
		assert_ne!(first, ordered);
	}

	#[test]
	fn builder_rejects_incomplete_descriptors() {
		assert!(matches!(
			AccessTokenRequest::builder("", "secret").refresh_token("r").build(),
			Err(EncodingError::MissingClientId)
		));
		assert!(matches!(
			AccessTokenRequest::builder("client", "").refresh_token("r").build(),
			Err(EncodingError::MissingClientSecret)
		));
		assert!(matches!(
			AccessTokenRequest::builder("client", "secret")
				.grant_type(GrantType::RefreshToken)
				.build(),
			Err(EncodingError::MissingRefreshToken)
		));
		assert!(matches!(
			AccessTokenRequest::builder("client", "secret").build(),
			Err(EncodingError::MissingScope)
		));
		assert!(matches!(
			AccessTokenRequest::builder("client", "secret").scope("has space").build(),
			Err(EncodingError::InvalidScope(_))
		));
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let rendered = format!("{:?}", refresh_request());
		let canonical = format!("{:?}", refresh_request().canonical().expect("Should encode."));

		assert!(!rendered.contains("client-secret"));
		assert!(!rendered.contains("Atzr|refresh"));
		assert!(!canonical.contains("client-secret"));
	}
}
