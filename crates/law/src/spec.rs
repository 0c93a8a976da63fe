use serde::{Deserialize, Serialize};

/// One expected property value, stored as the host serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyModification {
	pub path: String,
	pub value: String,
}

impl PropertyModification {
	pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
		Self { path: path.into(), value: value.into() }
	}
}

/// A reference specification ("preset"): ordered expected property values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
	#[serde(default)]
	pub modifications: Vec<PropertyModification>,
}

impl Specification {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
		self.modifications.push(PropertyModification::new(path, value));
		self
	}

	pub fn get(&self, path: &str) -> Option<&str> {
		self.modifications
			.iter()
			.find(|m| m.path == path)
			.map(|m| m.value.as_str())
	}
}

/// A specification resolved from configuration together with its name.
#[derive(Debug, Clone, Copy)]
pub struct NamedSpec<'a> {
	pub name: &'a str,
	pub spec: &'a Specification,
}
