//! Persistent verdict cache.
//!
//! On-disk layout is a fixed header (magic, schema version, fingerprint
//! algorithm) followed by a postcard payload. A file whose header does not
//! match is discarded and the cache starts empty. Each entry also carries the
//! fingerprint of the law it was judged under, so editing the law invalidates
//! every stored pass.

use std::mem::size_of;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fingerprint::Fingerprint;

/// Magic bytes identifying a verdict cache file.
pub const MAGIC: &[u8; 8] = b"LEXCACHE";

/// Schema version for cache format compatibility.
pub const SCHEMA_VERSION: u32 = 2;

/// Fingerprint algorithm tag; bumping it invalidates every entry.
pub const ALGORITHM: u32 = 2;

/// Total header size in bytes (magic + version + algorithm).
pub const HEADER_SIZE: usize = MAGIC.len() + 2 * size_of::<u32>();

#[derive(Debug, Error)]
pub enum CacheError {
	#[error("failed to read {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to write {path}: {source}")]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to encode cache: {0}")]
	Encode(#[from] postcard::Error),
}

/// Last known outcome for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
	pub fingerprint: Fingerprint,
	/// Fingerprint of the compiled law the subject was judged under.
	pub law: Fingerprint,
	pub passed: bool,
}

#[derive(Serialize, Deserialize)]
struct Payload {
	entries: Vec<(String, CacheEntry)>,
}

/// Validates the header and returns the payload slice.
fn validate_blob(data: &[u8]) -> Option<&[u8]> {
	if data.len() < HEADER_SIZE || &data[..8] != MAGIC {
		return None;
	}
	let version = u32::from_le_bytes(data[8..12].try_into().ok()?);
	let algorithm = u32::from_le_bytes(data[12..16].try_into().ok()?);
	if version != SCHEMA_VERSION || algorithm != ALGORITHM {
		return None;
	}
	Some(&data[HEADER_SIZE..])
}

/// Map from subject path to its last [`CacheEntry`].
///
/// Every [`record`](Self::record) on a backed cache is written through before
/// returning, so an interrupted run leaves all prior entries on disk.
#[derive(Debug, Default)]
pub struct VerdictCache {
	entries: IndexMap<String, CacheEntry>,
	backing: Option<PathBuf>,
}

impl VerdictCache {
	/// Cache that lives only in memory.
	pub fn in_memory() -> Self {
		Self::default()
	}

	/// Opens the cache at `path`.
	///
	/// A missing file yields an empty cache. A file with an unknown header or
	/// a corrupt payload is discarded with a warning.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
		let path = path.into();
		let mut cache = Self { entries: IndexMap::new(), backing: Some(path.clone()) };

		let data = match std::fs::read(&path) {
			Ok(data) => data,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(cache),
			Err(source) => return Err(CacheError::Read { path, source }),
		};

		let Some(payload) = validate_blob(&data) else {
			tracing::warn!(path = %path.display(), "discarding cache with unknown header");
			return Ok(cache);
		};
		match postcard::from_bytes::<Payload>(payload) {
			Ok(payload) => cache.entries = payload.entries.into_iter().collect(),
			Err(error) => tracing::warn!(path = %path.display(), %error, "discarding corrupt cache"),
		}
		tracing::debug!(path = %path.display(), entries = cache.entries.len(), "opened verdict cache");
		Ok(cache)
	}

	pub fn path(&self) -> Option<&Path> {
		self.backing.as_deref()
	}

	pub fn get(&self, subject: &str) -> Option<&CacheEntry> {
		self.entries.get(subject)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// True iff `subject` passed under the same `law` and is unchanged since.
	///
	/// Unchanged failures are not skipped so their violations stay visible.
	pub fn should_skip(&self, subject: &str, fingerprint: &Fingerprint, law: &Fingerprint) -> bool {
		self.entries
			.get(subject)
			.is_some_and(|entry| entry.passed && &entry.fingerprint == fingerprint && &entry.law == law)
	}

	/// Upserts the entry for `subject` and persists the cache.
	pub fn record(&mut self, subject: &str, entry: CacheEntry) -> Result<(), CacheError> {
		self.entries.insert(subject.to_string(), entry);
		self.flush()
	}

	/// Removes every entry and persists the empty cache.
	pub fn clear(&mut self) -> Result<(), CacheError> {
		self.entries.clear();
		self.flush()
	}

	/// Writes the cache to its backing file through a temporary sibling.
	pub fn flush(&self) -> Result<(), CacheError> {
		let Some(path) = &self.backing else {
			return Ok(());
		};

		let payload = Payload {
			entries: self.entries.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
		};
		let body = postcard::to_stdvec(&payload)?;
		let mut data = Vec::with_capacity(HEADER_SIZE + body.len());
		data.extend_from_slice(MAGIC);
		data.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
		data.extend_from_slice(&ALGORITHM.to_le_bytes());
		data.extend_from_slice(&body);

		let write_err = |source| CacheError::Write { path: path.clone(), source };
		if let Some(parent) = path.parent()
			&& !parent.as_os_str().is_empty()
		{
			std::fs::create_dir_all(parent).map_err(write_err)?;
		}
		let tmp = path.with_extension("tmp");
		std::fs::write(&tmp, &data).map_err(write_err)?;
		std::fs::rename(&tmp, path).map_err(write_err)
	}
}
