//! Token cache contract and built-in cache backends.

pub mod file;
pub mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

// self
use crate::{
	_prelude::*,
	auth::{CanonicalRequest, TokenSecret},
};

/// Boxed future returned by [`TokenCache`] operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CacheError>> + 'a + Send>>;

/// Time-expiring map from canonical request bytes to previously issued access tokens.
///
/// Implementations only see point reads and point writes. Expired entries must read as misses.
/// Concurrent callers may race a read against a fetch-and-write for the same key; the cache only
/// needs to keep each individual operation consistent.
pub trait TokenCache
where
	Self: Send + Sync,
{
	/// Returns the live token stored for `key`, if any.
	fn get<'a>(&'a self, key: &'a CanonicalRequest) -> CacheFuture<'a, Option<TokenSecret>>;

	/// Stores `value` for `key`, expiring after `ttl`.
	///
	/// A non-positive `ttl` must remove any entry stored for `key` instead of storing `value`.
	fn set<'a>(
		&'a self,
		key: &'a CanonicalRequest,
		value: TokenSecret,
		ttl: Duration,
	) -> CacheFuture<'a, ()>;
}

/// Error type produced by [`TokenCache`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CacheError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Cached token plus the instant it stops being served.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CacheEntry {
	pub(crate) value: TokenSecret,
	pub(crate) expires_at: OffsetDateTime,
}
impl CacheEntry {
	/// Returns `None` when the TTL is not positive, since such an entry is expired on arrival.
	pub(crate) fn new(value: TokenSecret, ttl: Duration, now: OffsetDateTime) -> Option<Self> {
		if !ttl.is_positive() {
			return None;
		}

		Some(Self { value, expires_at: now.saturating_add(ttl) })
	}

	pub(crate) fn is_live_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn cache_error_converts_into_crate_error_with_source() {
		let cache_error = CacheError::Backend { message: "redis unreachable".into() };
		let error: Error = cache_error.clone().into();

		assert!(matches!(error, Error::Cache(_)));
		assert!(error.to_string().contains("redis unreachable"));

		let source = StdError::source(&error)
			.expect("Crate error should expose the wrapped cache error as its source.");

		assert_eq!(source.to_string(), cache_error.to_string());
	}

	#[test]
	fn entries_expire_at_ttl_boundary() {
		let now = macros::datetime!(2025-01-01 00:00 UTC);
		let entry = CacheEntry::new(TokenSecret::new("t"), Duration::seconds(3600), now)
			.expect("Positive TTL should produce an entry.");

		assert_eq!(entry.expires_at, macros::datetime!(2025-01-01 01:00 UTC));
		assert!(entry.is_live_at(macros::datetime!(2025-01-01 00:59:59 UTC)));
		assert!(!entry.is_live_at(macros::datetime!(2025-01-01 01:00 UTC)));
	}

	#[test]
	fn non_positive_ttl_produces_no_entry() {
		let now = OffsetDateTime::now_utc();

		assert!(CacheEntry::new(TokenSecret::new("t"), Duration::ZERO, now).is_none());
		assert!(CacheEntry::new(TokenSecret::new("t"), Duration::seconds(-1), now).is_none());
	}
}
