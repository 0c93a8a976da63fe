//! Judicator bindings: which rule set judges which kind of asset.

use std::fmt;

use lex_primitives::SourceKind;
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn enabled() -> bool {
	true
}

/// Maps an (object type, source kind) pair to a judicator by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
	pub object_type: String,
	pub source_kind: SourceKind,
	/// `None` until the binding is completed by hand.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub judicator: Option<String>,
	#[serde(default = "enabled")]
	pub enabled: bool,
}

impl Binding {
	pub fn new(object_type: impl Into<String>, source_kind: SourceKind, judicator: impl Into<String>) -> Self {
		Self {
			object_type: object_type.into(),
			source_kind,
			judicator: Some(judicator.into()),
			enabled: true,
		}
	}

	pub fn unbound(object_type: impl Into<String>, source_kind: SourceKind) -> Self {
		Self {
			object_type: object_type.into(),
			source_kind,
			judicator: None,
			enabled: true,
		}
	}

	pub fn key(&self) -> BindingKey {
		BindingKey::new(self.object_type.clone(), self.source_kind)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingKey {
	pub object_type: String,
	pub source_kind: SourceKind,
}

impl BindingKey {
	pub fn new(object_type: impl Into<String>, source_kind: SourceKind) -> Self {
		Self { object_type: object_type.into(), source_kind }
	}
}

impl fmt::Display for BindingKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.object_type, self.source_kind)
	}
}

/// Index over bindings enforcing one binding per key.
#[derive(Debug, Default)]
pub struct BindingTable {
	bindings: Vec<Binding>,
	index: HashMap<BindingKey, usize>,
}

impl BindingTable {
	pub fn new(bindings: Vec<Binding>) -> Result<Self, ConfigError> {
		let mut index = HashMap::default();
		for (i, binding) in bindings.iter().enumerate() {
			if index.insert(binding.key(), i).is_some() {
				return Err(ConfigError::DuplicateBinding(binding.key()));
			}
		}
		Ok(Self { bindings, index })
	}

	pub fn lookup(&self, object_type: &str, source_kind: SourceKind) -> Option<&Binding> {
		let key = BindingKey::new(object_type, source_kind);
		self.index.get(&key).map(|&i| &self.bindings[i])
	}

	pub fn iter(&self) -> impl Iterator<Item = &Binding> {
		self.bindings.iter()
	}

	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}
