//! Judicator configurations.
//!
//! Each variant of [`JudicatorConfig`] is one rule kind. Presets are referenced
//! by name and resolved against the document's `[presets]` table.

use serde::{Deserialize, Serialize};

/// What to report when no specification matches a subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
	/// Mismatches of every specification, in order.
	#[default]
	Union,
	/// Mismatches of the specification with the fewest mismatches only.
	Closest,
}

pub const DEFAULT_PRECISION: usize = 4;

fn default_precision() -> usize {
	DEFAULT_PRECISION
}

/// Generic property-diff rule against a list of presets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetRules {
	/// Decimal digits used when comparing floats.
	#[serde(default = "default_precision")]
	pub precision: usize,
	/// Property paths never compared.
	#[serde(default)]
	pub ignore: Vec<String>,
	/// Preset names, in evaluation order.
	#[serde(default)]
	pub presets: Vec<String>,
	#[serde(default)]
	pub policy: MatchPolicy,
}

impl Default for PresetRules {
	fn default() -> Self {
		Self {
			precision: DEFAULT_PRECISION,
			ignore: Vec::new(),
			presets: Vec::new(),
			policy: MatchPolicy::default(),
		}
	}
}

impl PresetRules {
	pub fn is_ignored(&self, path: &str) -> bool {
		self.ignore.iter().any(|p| p == path)
	}
}

/// Mesh geometry checks plus optional importer presets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRules {
	#[serde(default)]
	pub importer: Option<PresetRules>,
	/// Report a secondary UV channel that is unnecessary because the primary
	/// channel is already clean.
	#[serde(default)]
	pub flag_redundant_secondary_uv: bool,
}

/// Valid keyword variants of one shader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderLaw {
	pub shader: String,
	/// Each variant is a sorted keyword set.
	#[serde(default)]
	pub variants: Vec<Vec<String>>,
}

/// Texture assigned when a variant's keyword is missing from a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
	pub keyword: String,
	/// Material property the keyword is bound to.
	pub property: String,
	pub texture: String,
}

/// Shader-variant registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialLaw {
	#[serde(default)]
	pub shaders: Vec<ShaderLaw>,
	#[serde(default)]
	pub placeholders: Vec<Placeholder>,
}

impl MaterialLaw {
	pub fn shader(&self, name: &str) -> Option<&ShaderLaw> {
		self.shaders.iter().find(|law| law.shader == name)
	}

	pub fn placeholder(&self, keyword: &str) -> Option<&Placeholder> {
		self.placeholders.iter().find(|p| p.keyword == keyword)
	}
}

pub const DEFAULT_PARTICLE_BUDGET: i64 = 512;

fn default_particle_budget() -> Option<i64> {
	Some(DEFAULT_PARTICLE_BUDGET)
}

fn default_component_kind() -> String {
	"ParticleSystem".to_string()
}

/// Preset matching applied to every matching component of a prefab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRules {
	#[serde(default)]
	pub rules: PresetRules,
	#[serde(default = "default_component_kind")]
	pub component_kind: String,
	/// A `maxNumParticles` mismatch is tolerated up to this live value.
	#[serde(default = "default_particle_budget")]
	pub particle_budget: Option<i64>,
}

impl Default for ComponentRules {
	fn default() -> Self {
		Self {
			rules: PresetRules::default(),
			component_kind: default_component_kind(),
			particle_budget: default_particle_budget(),
		}
	}
}

/// Rendering budget for one quality level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityProfile {
	pub quality_level: String,
	pub memory_limit_mb: u32,
	pub max_triangles: u64,
	pub max_draw_calls: u64,
	pub field_of_view: u32,
	pub aspect_ratio: f32,
	pub camera_rotates: bool,
	/// Step in degrees for the camera sweep.
	pub rotation_interval: i32,
}

impl Default for QualityProfile {
	fn default() -> Self {
		Self {
			quality_level: String::new(),
			memory_limit_mb: 500,
			max_triangles: 500_000,
			max_draw_calls: 500,
			field_of_view: 110,
			aspect_ratio: 1.0,
			camera_rotates: true,
			rotation_interval: 90,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStandards {
	#[serde(default)]
	pub profiles: Vec<QualityProfile>,
}

/// A configured rule kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JudicatorConfig {
	Preset(PresetRules),
	Model(ModelRules),
	Material(MaterialLaw),
	Prefab(ComponentRules),
	Scene(PerformanceStandards),
}

impl JudicatorConfig {
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Preset(_) => "preset",
			Self::Model(_) => "model",
			Self::Material(_) => "material",
			Self::Prefab(_) => "prefab",
			Self::Scene(_) => "scene",
		}
	}

	/// Preset rules used by this judicator, if any.
	pub fn preset_rules(&self) -> Option<&PresetRules> {
		match self {
			Self::Preset(rules) => Some(rules),
			Self::Model(model) => model.importer.as_ref(),
			Self::Prefab(component) => Some(&component.rules),
			Self::Material(_) | Self::Scene(_) => None,
		}
	}
}
