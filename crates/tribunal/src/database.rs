//! Asset storage seen by the court.

use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use lex_primitives::Asset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Host asset database.
pub trait AssetDatabase {
	fn asset(&self, path: &str) -> Option<&Asset>;
	fn asset_mut(&mut self, path: &str) -> Option<&mut Asset>;
	/// Direct dependencies of `path`, excluding itself.
	fn direct_dependencies(&self, path: &str) -> Vec<String>;

	/// `path` followed by its transitive dependencies, depth first, each
	/// listed once.
	fn dependencies(&self, path: &str) -> Vec<String> {
		let mut seen = IndexSet::new();
		let mut stack = vec![path.to_string()];
		while let Some(next) = stack.pop() {
			if !seen.insert(next.clone()) {
				continue;
			}
			let mut children = self.direct_dependencies(&next);
			children.reverse();
			stack.extend(children);
		}
		seen.into_iter().collect()
	}
}

/// Expands a selection to its dependency closure, keeping first-seen order.
pub fn expand_selection(db: &dyn AssetDatabase, selection: &[String]) -> Vec<String> {
	let mut expanded = IndexSet::new();
	for path in selection {
		expanded.extend(db.dependencies(path));
	}
	expanded.into_iter().collect()
}

#[derive(Debug, Error)]
pub enum CorpusError {
	#[error("failed to read {path}: {source}")]
	Read {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to write {path}: {source}")]
	Write {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid corpus: {0}")]
	Json(#[from] serde_json::Error),
}

/// On-disk corpus layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Corpus {
	assets: Vec<Asset>,
	#[serde(default)]
	dependencies: IndexMap<String, Vec<String>>,
}

/// In-memory database, loadable from a JSON corpus.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
	assets: IndexMap<String, Asset>,
	dependencies: IndexMap<String, Vec<String>>,
}

impl MemoryDatabase {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, asset: Asset) -> Option<Asset> {
		self.assets.insert(asset.path.clone(), asset)
	}

	pub fn add_dependency(&mut self, from: impl Into<String>, to: impl Into<String>) {
		self.dependencies.entry(from.into()).or_default().push(to.into());
	}

	pub fn paths(&self) -> impl Iterator<Item = &str> {
		self.assets.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.assets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.assets.is_empty()
	}

	/// Assets changed by remediation and not yet saved.
	pub fn dirty(&self) -> impl Iterator<Item = &Asset> {
		self.assets.values().filter(|a| a.is_dirty())
	}

	pub fn from_json(content: &str) -> Result<Self, CorpusError> {
		let corpus: Corpus = serde_json::from_str(content)?;
		let assets = corpus.assets.into_iter().map(|a| (a.path.clone(), a)).collect();
		Ok(Self { assets, dependencies: corpus.dependencies })
	}

	pub fn to_json(&self) -> Result<String, CorpusError> {
		let corpus = Corpus {
			assets: self.assets.values().cloned().collect(),
			dependencies: self.dependencies.clone(),
		};
		Ok(serde_json::to_string_pretty(&corpus)?)
	}

	pub fn load(path: &Path) -> Result<Self, CorpusError> {
		let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Read {
			path: path.display().to_string(),
			source,
		})?;
		Self::from_json(&content)
	}

	/// Writes the corpus and clears every dirty flag.
	pub fn save(&mut self, path: &Path) -> Result<(), CorpusError> {
		let content = self.to_json()?;
		let write_err = |source| CorpusError::Write { path: path.display().to_string(), source };
		let tmp = path.with_extension("json.tmp");
		std::fs::write(&tmp, content).map_err(write_err)?;
		std::fs::rename(&tmp, path).map_err(write_err)?;
		for asset in self.assets.values_mut() {
			asset.mark_saved();
		}
		Ok(())
	}
}

impl AssetDatabase for MemoryDatabase {
	fn asset(&self, path: &str) -> Option<&Asset> {
		self.assets.get(path)
	}

	fn asset_mut(&mut self, path: &str) -> Option<&mut Asset> {
		self.assets.get_mut(path)
	}

	fn direct_dependencies(&self, path: &str) -> Vec<String> {
		self.dependencies.get(path).cloned().unwrap_or_default()
	}
}
