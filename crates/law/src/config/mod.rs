//! The lex configuration document.
//!
//! A document holds the binding table, named presets, and judicator
//! configurations. It is stored as TOML:
//!
//! ```toml
//! [[binding]]
//! object_type = "Texture2D"
//! source_kind = "TextureImporter"
//! judicator = "textures"
//!
//! [presets.texture_default]
//! modifications = [{ path = "m_MaxTextureSize", value = "2048" }]
//!
//! [judicators.textures]
//! kind = "preset"
//! presets = ["texture_default"]
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::binding::{Binding, BindingKey, BindingTable};
use crate::judicator::{JudicatorConfig, PresetRules};
use crate::spec::{NamedSpec, Specification};

pub mod load;

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
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

	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("TOML serialize error: {0}")]
	Serialize(#[from] toml::ser::Error),

	/// Two bindings claim the same (object type, source kind) pair.
	#[error("duplicate binding for {0}")]
	DuplicateBinding(BindingKey),

	#[error("judicator '{name}': float precision {precision} is out of range (0..=15)")]
	Precision { name: String, precision: usize },

	#[error("too many keywords to enumerate ({0}, limit {limit})", limit = crate::legislate::MAX_PERMUTATION_KEYWORDS)]
	TooManyKeywords(usize),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Parsed configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lex {
	#[serde(default, rename = "binding")]
	pub bindings: Vec<Binding>,
	#[serde(default)]
	pub presets: IndexMap<String, Specification>,
	#[serde(default)]
	pub judicators: IndexMap<String, JudicatorConfig>,
}

impl Lex {
	pub fn from_toml_str(content: &str) -> Result<Self> {
		let lex: Lex = toml::from_str(content)?;
		lex.validate()?;
		Ok(lex)
	}

	pub fn to_toml_string(&self) -> Result<String> {
		Ok(toml::to_string_pretty(self)?)
	}

	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&content)
	}

	/// Writes the document through a sibling temporary file.
	pub fn save(&self, path: &Path) -> Result<()> {
		let content = self.to_toml_string()?;
		let write_err = |source| ConfigError::Write { path: path.to_path_buf(), source };
		let tmp = path.with_extension("toml.tmp");
		std::fs::write(&tmp, content).map_err(write_err)?;
		std::fs::rename(&tmp, path).map_err(write_err)
	}

	/// Checks structural invariants. Failures here abort a run.
	pub fn validate(&self) -> Result<()> {
		BindingTable::new(self.bindings.clone())?;
		for (name, judicator) in &self.judicators {
			if let Some(rules) = judicator.preset_rules()
				&& rules.precision > 15
			{
				return Err(ConfigError::Precision { name: name.clone(), precision: rules.precision });
			}
		}
		Ok(())
	}

	pub fn binding_table(&self) -> Result<BindingTable> {
		BindingTable::new(self.bindings.clone())
	}

	/// Resolves preset names in order. Unknown names become `None` entries,
	/// which matchers skip.
	pub fn resolve_presets<'a>(&'a self, rules: &'a PresetRules) -> Vec<Option<NamedSpec<'a>>> {
		rules
			.presets
			.iter()
			.map(|name| match self.presets.get_key_value(name) {
				Some((name, spec)) => Some(NamedSpec { name, spec }),
				None => {
					tracing::warn!(preset = %name, "unknown preset referenced by judicator");
					None
				}
			})
			.collect()
	}

	/// Merges another document into this one; `other` wins on conflicts.
	///
	/// Bindings with the same key are replaced in place so the result stays
	/// free of duplicates.
	pub fn merge(&mut self, other: Lex) {
		for binding in other.bindings {
			match self.bindings.iter_mut().find(|b| b.key() == binding.key()) {
				Some(existing) => *existing = binding,
				None => self.bindings.push(binding),
			}
		}
		self.presets.extend(other.presets);
		self.judicators.extend(other.judicators);
	}
}

#[cfg(test)]
mod tests;
