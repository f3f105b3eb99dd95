//! Thread-safe in-memory [`TokenCache`] implementation.

// self
use crate::{
	_prelude::*,
	auth::{CanonicalRequest, TokenSecret},
	cache::{CacheEntry, CacheFuture, TokenCache},
};

type CacheMap = Arc<RwLock<HashMap<CanonicalRequest, CacheEntry>>>;

/// In-process token cache keyed by canonical request bytes.
///
/// Expired entries read as misses and are evicted on the read that discovers them.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache(CacheMap);
impl MemoryCache {
	/// Returns the live token for `key` as seen at `instant`.
	pub fn get_at(&self, key: &CanonicalRequest, instant: OffsetDateTime) -> Option<TokenSecret> {
		match self.0.read().get(key) {
			Some(entry) if entry.is_live_at(instant) => return Some(entry.value.clone()),
			Some(_) => {},
			None => return None,
		}

		let mut guard = self.0.write();

		if guard.get(key).is_some_and(|entry| !entry.is_live_at(instant)) {
			guard.remove(key);
		}

		None
	}

	/// Stores `value` for `key` with a TTL measured from `instant`.
	///
	/// A non-positive TTL removes any existing entry instead of storing one.
	pub fn set_at(
		&self,
		key: &CanonicalRequest,
		value: TokenSecret,
		ttl: Duration,
		instant: OffsetDateTime,
	) {
		let mut guard = self.0.write();

		match CacheEntry::new(value, ttl, instant) {
			Some(entry) => {
				guard.insert(key.clone(), entry);
			},
			None => {
				guard.remove(key);
			},
		}
	}

	/// Expiry instant recorded for `key`, whether or not it has passed.
	pub fn expires_at(&self, key: &CanonicalRequest) -> Option<OffsetDateTime> {
		self.0.read().get(key).map(|entry| entry.expires_at)
	}

	/// Drops every entry that is expired at `instant`, returning how many were removed.
	pub fn purge_expired_at(&self, instant: OffsetDateTime) -> usize {
		let mut guard = self.0.write();
		let before = guard.len();

		guard.retain(|_, entry| entry.is_live_at(instant));

		before - guard.len()
	}

	/// Number of stored entries, including expired ones not yet evicted.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` if nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl TokenCache for MemoryCache {
	fn get<'a>(&'a self, key: &'a CanonicalRequest) -> CacheFuture<'a, Option<TokenSecret>> {
		Box::pin(async move { Ok(self.get_at(key, OffsetDateTime::now_utc())) })
	}

	fn set<'a>(
		&'a self,
		key: &'a CanonicalRequest,
		value: TokenSecret,
		ttl: Duration,
	) -> CacheFuture<'a, ()> {
		Box::pin(async move {
			self.set_at(key, value, ttl, OffsetDateTime::now_utc());

			Ok(())
		})
	}
}
