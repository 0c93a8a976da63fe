//! Judicators: compiled rule kinds.
//!
//! A [`Judicator`] is built once from its [`JudicatorConfig`] with presets
//! resolved, then asked to adjudicate assets and remediate violations it
//! raised.

pub mod material;
pub mod model;
pub mod prefab;
pub mod preset;
pub mod scene;
pub mod uv;

use lex_law::{JudicatorConfig, Lex};
use lex_primitives::Asset;

pub use self::material::MaterialJudicator;
pub use self::model::ModelJudicator;
pub use self::prefab::PrefabJudicator;
pub use self::preset::{PresetSet, ResolvedSpec};
pub use self::scene::{CameraAngle, NullProbe, ProbeError, RenderStats, SceneJudicator, SceneProbe};
use crate::compare::Comparators;
use crate::remedy::{self, Remedied, RemedyError};
use crate::verdict::{Remedy, Verdict, Violation, ViolationId};

/// Violations raised by one rule, and whether every check it owns ran.
///
/// Partial findings come from a rule that could not look at the subject at
/// all or skipped part of it. Their absence of violations proves nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Findings {
	pub violations: Vec<Violation>,
	pub complete: bool,
}

impl Findings {
	pub fn checked(violations: Vec<Violation>) -> Self {
		Self { violations, complete: true }
	}

	pub fn unchecked() -> Self {
		Self { violations: Vec::new(), complete: false }
	}
}

/// Outcome of judging one asset.
#[derive(Debug, Clone)]
pub struct Judgment {
	pub verdict: Option<Verdict>,
	/// Whether every check ran; only complete clean judgments may be cached.
	pub complete: bool,
}

impl Judgment {
	/// Clean and fully evaluated.
	pub fn passed(&self) -> bool {
		self.complete && self.verdict.is_none()
	}
}

/// Host services available while adjudicating.
pub struct AdjudicationCtx<'a> {
	pub comparators: &'a Comparators,
	pub probe: &'a mut dyn SceneProbe,
}

#[derive(Debug, Clone)]
pub enum Rule {
	Preset(PresetSet),
	Model(ModelJudicator),
	Material(MaterialJudicator),
	Prefab(PrefabJudicator),
	Scene(SceneJudicator),
}

impl Rule {
	pub fn compile(lex: &Lex, config: &JudicatorConfig) -> Self {
		match config {
			JudicatorConfig::Preset(rules) => Self::Preset(PresetSet::resolve(lex, rules)),
			JudicatorConfig::Model(rules) => Self::Model(ModelJudicator::compile(lex, rules)),
			JudicatorConfig::Material(law) => Self::Material(MaterialJudicator::compile(law)),
			JudicatorConfig::Prefab(rules) => Self::Prefab(PrefabJudicator::compile(lex, rules)),
			JudicatorConfig::Scene(standards) => Self::Scene(SceneJudicator::compile(standards)),
		}
	}

	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Preset(_) => "preset",
			Self::Model(_) => "model",
			Self::Material(_) => "material",
			Self::Prefab(_) => "prefab",
			Self::Scene(_) => "scene",
		}
	}
}

/// A named, compiled rule.
#[derive(Debug, Clone)]
pub struct Judicator {
	name: String,
	rule: Rule,
}

impl Judicator {
	pub fn new(name: impl Into<String>, rule: Rule) -> Self {
		Self { name: name.into(), rule }
	}

	pub fn compile(lex: &Lex, name: &str, config: &JudicatorConfig) -> Self {
		Self::new(name, Rule::compile(lex, config))
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn rule(&self) -> &Rule {
		&self.rule
	}

	/// Judges one asset. Returns `None` when no violation was found.
	pub fn adjudicate(&self, asset: &Asset, ctx: &mut AdjudicationCtx<'_>) -> Option<Verdict> {
		self.judge(asset, ctx).verdict
	}

	/// Judges one asset and reports whether every check ran.
	pub fn judge(&self, asset: &Asset, ctx: &mut AdjudicationCtx<'_>) -> Judgment {
		let Findings { violations, complete } = match &self.rule {
			Rule::Preset(presets) => presets.adjudicate(&asset.settings, ctx.comparators),
			Rule::Model(model) => model.adjudicate(asset, ctx.comparators),
			Rule::Material(material) => material.adjudicate(asset),
			Rule::Prefab(prefab) => prefab.adjudicate(asset, ctx.comparators),
			Rule::Scene(scene) => scene.adjudicate(asset, ctx.probe),
		};

		let verdict = match Verdict::create_or_append(None, Some(&asset.path), &self.name, Some(violations)) {
			Ok(verdict) => verdict,
			Err(error) => {
				tracing::error!(judicator = %self.name, %error, "failed to record violations");
				error.into_existing()
			}
		};
		Judgment { verdict, complete }
	}

	/// Applies the correction for violation `id` to `asset`.
	///
	/// On success the violation is removed from `verdict` and the asset is
	/// marked dirty. On failure both are left untouched. Applying one preset
	/// satisfies the whole preset set, so it also resolves every other
	/// preset violation in `verdict`.
	pub fn remediate(
		&self,
		verdict: &mut Verdict,
		id: ViolationId,
		asset: &mut Asset,
		comparators: &Comparators,
	) -> Result<Remedied, RemedyError> {
		if verdict.judicator != self.name {
			return Err(RemedyError::WrongJudicator {
				verdict: verdict.judicator.clone(),
				judicator: self.name.clone(),
			});
		}
		let Some(violation) = verdict.get(id) else {
			return Ok(Remedied::AlreadyResolved);
		};
		if !violation.fixable {
			return Err(RemedyError::NotFixable(id));
		}
		if verdict.subject != asset.path {
			return Err(RemedyError::SubjectMismatch { verdict: verdict.subject.clone(), asset: asset.path.clone() });
		}

		let applies_preset = matches!(violation.remedy, Remedy::ApplySpecification { .. });
		let message = match (&self.rule, &violation.remedy) {
			(_, Remedy::None) => remedy::set_from_message(asset, &violation.message)?,
			(_, Remedy::SetProperty { component, path, expected }) => {
				remedy::set_property(asset, component.as_deref(), path, expected)?
			}
			(Rule::Preset(presets), Remedy::ApplySpecification { spec }) => {
				apply_specification(presets, *spec, asset, comparators)?
			}
			(Rule::Model(ModelJudicator { importer: Some(presets), .. }), Remedy::ApplySpecification { spec }) => {
				apply_specification(presets, *spec, asset, comparators)?
			}
			(Rule::Material(material), Remedy::AssignPlaceholder { keyword }) => {
				material.assign_placeholder(asset, keyword)?
			}
			(Rule::Material(_), Remedy::StripKeyword { keyword, .. }) => material::strip_keyword(asset, keyword)?,
			(rule, remedy) => {
				return Err(RemedyError::Inapplicable {
					judicator: format!("{} ({})", self.name, rule.kind_name()),
					remedy: remedy_name(remedy),
				});
			}
		};

		verdict.remove(id);
		if applies_preset {
			let superseded: Vec<ViolationId> = verdict
				.violations()
				.iter()
				.filter(|v| matches!(v.remedy, Remedy::ApplySpecification { .. }))
				.map(|v| v.id)
				.collect();
			for other in superseded {
				verdict.remove(other);
				tracing::debug!(path = %asset.path, violation = %other, "superseded by applied preset");
			}
		}
		asset.mark_dirty();
		tracing::info!(path = %asset.path, violation = %id, "remediated");
		Ok(Remedied::Fixed(message))
	}
}

fn apply_specification(
	presets: &PresetSet,
	spec: usize,
	asset: &mut Asset,
	comparators: &Comparators,
) -> Result<String, RemedyError> {
	let changed = presets.apply(spec, &mut asset.settings, comparators)?;
	let name = presets.get(spec).map(|r| r.name.as_str()).unwrap_or_default();
	Ok(format!("Applied preset '{name}' to {} ({changed} properties changed).", asset.name))
}

fn remedy_name(remedy: &Remedy) -> &'static str {
	match remedy {
		Remedy::None => "message",
		Remedy::ApplySpecification { .. } => "apply-specification",
		Remedy::SetProperty { .. } => "set-property",
		Remedy::AssignPlaceholder { .. } => "assign-placeholder",
		Remedy::StripKeyword { .. } => "strip-keyword",
	}
}
