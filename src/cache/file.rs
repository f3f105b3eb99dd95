//! File-backed [`TokenCache`] for tools that restart often and want to keep their tokens.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{CanonicalRequest, TokenSecret},
	cache::{CacheEntry, CacheError, CacheFuture, TokenCache},
};

type Snapshot = HashMap<String, CacheEntry>;

/// Persists cached tokens to a JSON file after each write.
///
/// Entries are keyed by [`CanonicalRequest::fingerprint`], so the client secrets embedded in
/// the canonical request never reach the disk. Expired entries are dropped when the file is
/// loaded and whenever a write persists the snapshot.
#[derive(Clone, Debug)]
pub struct FileCache {
	path: PathBuf,
	inner: Arc<RwLock<Snapshot>>,
}
impl FileCache {
	/// Opens (or creates) a cache at the provided path, eagerly loading existing entries.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let mut snapshot = Self::load_snapshot(&path)?;
		let now = OffsetDateTime::now_utc();

		snapshot.retain(|_, entry| entry.is_live_at(now));

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Location of the snapshot file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Returns the live token for `key` as seen at `instant`.
	pub fn get_at(&self, key: &CanonicalRequest, instant: OffsetDateTime) -> Option<TokenSecret> {
		self.inner
			.read()
			.get(&key.fingerprint())
			.filter(|entry| entry.is_live_at(instant))
			.map(|entry| entry.value.clone())
	}

	/// Stores `value` for `key` with a TTL measured from `instant`, then persists the snapshot.
	///
	/// A non-positive TTL removes the entry instead. The in-memory view only changes once the
	/// file has been written, so a failed write leaves the cache as it was.
	pub fn set_at(
		&self,
		key: &CanonicalRequest,
		value: TokenSecret,
		ttl: Duration,
		instant: OffsetDateTime,
	) -> Result<(), CacheError> {
		let fingerprint = key.fingerprint();
		let mut guard = self.inner.write();
		let mut staged = guard.clone();

		match CacheEntry::new(value, ttl, instant) {
			Some(entry) => {
				staged.insert(fingerprint, entry);
			},
			None => {
				staged.remove(&fingerprint);
			},
		}

		staged.retain(|_, entry| entry.is_live_at(instant));

		self.persist_locked(&staged)?;
		*guard = staged;

		Ok(())
	}

	fn load_snapshot(path: &Path) -> Result<Snapshot, CacheError> {
		if !path.exists() {
			return Ok(HashMap::new());
		}

		let bytes = fs::read(path).map_err(|e| CacheError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		if bytes.is_empty() {
			return Ok(HashMap::new());
		}

		let entries: Vec<(String, CacheEntry)> =
			serde_json::from_slice(&bytes).map_err(|e| CacheError::Serialization {
				message: format!("Failed to parse {}: {e}", path.display()),
			})?;

		Ok(entries.into_iter().collect())
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), CacheError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| CacheError::Backend {
				message: format!("Failed to create cache directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(&self, contents: &Snapshot) -> Result<(), CacheError> {
		Self::ensure_parent_exists(&self.path)?;

		let snapshot: Vec<_> = contents.iter().collect();
		let serialized =
			serde_json::to_vec_pretty(&snapshot).map_err(|e| CacheError::Serialization {
				message: format!("Failed to serialize cache snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| CacheError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| CacheError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| CacheError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| CacheError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl TokenCache for FileCache {
	fn get<'a>(&'a self, key: &'a CanonicalRequest) -> CacheFuture<'a, Option<TokenSecret>> {
		Box::pin(async move { Ok(self.get_at(key, OffsetDateTime::now_utc())) })
	}

	fn set<'a>(
		&'a self,
		key: &'a CanonicalRequest,
		value: TokenSecret,
		ttl: Duration,
	) -> CacheFuture<'a, ()> {
		Box::pin(async move { self.set_at(key, value, ttl, OffsetDateTime::now_utc()) })
	}
}
