//! Operations that extend the law: new bindings and recorded shader variants.

use std::fmt;

use indexmap::IndexSet;
use lex_primitives::SourceKind;

use crate::binding::{Binding, BindingKey};
use crate::config::{ConfigError, Lex};
use crate::judicator::{JudicatorConfig, MaterialLaw, ShaderLaw};

/// Power-set recording is refused above this many keywords.
pub const MAX_PERMUTATION_KEYWORDS: usize = 16;

/// Name given to the material judicator created on first recording.
pub const DEFAULT_MATERIAL_JUDICATOR: &str = "materials";

const MATERIAL_OBJECT_TYPE: &str = "Material";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingOutcome {
	/// A new unbound entry was appended; a judicator must be assigned by hand.
	Created(BindingKey),
	AlreadyExists(BindingKey),
}

impl fmt::Display for BindingOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Created(key) => write!(
				f,
				"created binding for {key}; assign the corresponding judicator in the configuration"
			),
			Self::AlreadyExists(key) => write!(f, "binding for {key} already exists"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantOutcome {
	Recorded,
	AlreadyRecorded,
}

impl fmt::Display for VariantOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Recorded => f.write_str("keywords have been recorded to law"),
			Self::AlreadyRecorded => f.write_str("shader variant is already recorded"),
		}
	}
}

impl Lex {
	/// Appends an unbound binding for an unmapped pair.
	pub fn create_binding(&mut self, object_type: &str, source_kind: SourceKind) -> BindingOutcome {
		let key = BindingKey::new(object_type, source_kind);
		if self.bindings.iter().any(|b| b.key() == key) {
			return BindingOutcome::AlreadyExists(key);
		}
		self.bindings.push(Binding::unbound(object_type, source_kind));
		tracing::info!(binding = %key, "created unbound binding");
		BindingOutcome::Created(key)
	}

	/// Records one keyword set for `shader`.
	pub fn record_variant(&mut self, shader: &str, keywords: &[String]) -> VariantOutcome {
		let mut variant = keywords.to_vec();
		variant.sort();
		variant.dedup();

		let shader_law = self.shader_law_mut(shader);
		if shader_law.variants.contains(&variant) {
			VariantOutcome::AlreadyRecorded
		} else {
			tracing::debug!(shader, keywords = ?variant, "recorded shader variant");
			shader_law.variants.push(variant);
			VariantOutcome::Recorded
		}
	}

	/// Records every subset of `keywords` as a variant of `shader`.
	///
	/// Returns how many variants were new.
	pub fn record_all_permutations(&mut self, shader: &str, keywords: &[String]) -> Result<usize, ConfigError> {
		let mut unique = keywords.to_vec();
		unique.sort();
		unique.dedup();
		if unique.len() > MAX_PERMUTATION_KEYWORDS {
			return Err(ConfigError::TooManyKeywords(unique.len()));
		}

		let shader_law = self.shader_law_mut(shader);
		let mut known: IndexSet<Vec<String>> = shader_law.variants.iter().cloned().collect();
		let mut recorded = 0;
		for mask in 0u32..(1 << unique.len()) {
			let subset: Vec<String> = unique
				.iter()
				.enumerate()
				.filter(|(bit, _)| mask & (1 << bit) != 0)
				.map(|(_, keyword)| keyword.clone())
				.collect();
			if known.insert(subset.clone()) {
				shader_law.variants.push(subset);
				recorded += 1;
			}
		}
		tracing::debug!(shader, recorded, "recorded keyword permutations");
		Ok(recorded)
	}

	/// Law of `shader` in the material judicator, created on demand.
	fn shader_law_mut(&mut self, shader: &str) -> &mut ShaderLaw {
		let law = self.material_law_mut();
		let index = match law.shaders.iter().position(|l| l.shader == shader) {
			Some(i) => i,
			None => {
				law.shaders.push(ShaderLaw { shader: shader.to_string(), variants: Vec::new() });
				law.shaders.len() - 1
			}
		};
		&mut law.shaders[index]
	}

	/// Material law of the judicator bound to `Material`, created on demand.
	fn material_law_mut(&mut self) -> &mut MaterialLaw {
		let bound = self
			.bindings
			.iter()
			.filter(|b| b.object_type == MATERIAL_OBJECT_TYPE)
			.filter_map(|b| b.judicator.as_deref())
			.find(|name| matches!(self.judicators.get(*name), Some(JudicatorConfig::Material(_))))
			.map(str::to_string);

		let name = match bound {
			Some(name) => name,
			None => self.create_material_judicator(),
		};

		match self.judicators.get_mut(&name) {
			Some(JudicatorConfig::Material(law)) => law,
			_ => unreachable!("material judicator '{name}' was resolved or created above"),
		}
	}

	/// Inserts an empty material judicator under a free name and binds
	/// `Material` assets to it.
	fn create_material_judicator(&mut self) -> String {
		let mut name = DEFAULT_MATERIAL_JUDICATOR.to_string();
		let mut suffix = 2;
		while self.judicators.contains_key(&name) {
			name = format!("{DEFAULT_MATERIAL_JUDICATOR}_{suffix}");
			suffix += 1;
		}
		self.judicators
			.insert(name.clone(), JudicatorConfig::Material(MaterialLaw::default()));

		let key = BindingKey::new(MATERIAL_OBJECT_TYPE, SourceKind::AssetImporter);
		match self.bindings.iter_mut().find(|b| b.key() == key) {
			Some(binding) => binding.judicator = Some(name.clone()),
			None => self
				.bindings
				.push(Binding::new(MATERIAL_OBJECT_TYPE, SourceKind::AssetImporter, name.clone())),
		}
		tracing::info!(judicator = %name, "created material judicator");
		name
	}
}
