//! Content fingerprints.
//!
//! A fingerprint changes iff the hashed content changes. Timestamps are never
//! used: a touched-but-identical asset keeps its fingerprint. Structured values
//! are hashed through postcard, which keeps every float bit.

use std::fmt;
use std::path::Path;

use lex_primitives::Asset;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
	pub fn of_bytes(bytes: &[u8]) -> Self {
		let mut hasher = Sha256::new();
		hasher.update(bytes);
		Self(format!("{PREFIX}{:x}", hasher.finalize()))
	}

	/// Hashes the canonical binary encoding of `value`.
	pub fn of_value<T: Serialize + ?Sized>(value: &T) -> Result<Self, postcard::Error> {
		postcard::to_stdvec(value).map(|bytes| Self::of_bytes(&bytes))
	}

	/// Hashes the asset's full state.
	pub fn of_asset(asset: &Asset) -> Result<Self, postcard::Error> {
		Self::of_value(asset)
	}

	pub fn of_file(path: &Path) -> std::io::Result<Self> {
		std::fs::read(path).map(|bytes| Self::of_bytes(&bytes))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Fingerprint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[cfg(test)]
mod tests;
