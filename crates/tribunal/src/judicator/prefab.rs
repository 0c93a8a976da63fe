//! Component preset rule for prefabs.

use lex_law::{ComponentRules, Lex};
use lex_primitives::{Asset, AssetBody, Component, PropertyValue};

use super::Findings;
use super::preset::PresetSet;
use crate::compare::{Comparators, Mismatch};
use crate::matcher::MatchOutcome;
use crate::verdict::{Remedy, Violation};

/// Property name whose mismatch is tolerated within the particle budget.
pub const MAX_PARTICLES_PROPERTY: &str = "maxNumParticles";

#[derive(Debug, Clone, Default)]
pub struct PrefabJudicator {
	pub presets: PresetSet,
	pub component_kind: String,
	pub particle_budget: Option<i64>,
}

impl PrefabJudicator {
	pub fn compile(lex: &Lex, rules: &ComponentRules) -> Self {
		Self {
			presets: PresetSet::resolve(lex, &rules.rules),
			component_kind: rules.component_kind.clone(),
			particle_budget: rules.particle_budget,
		}
	}

	pub fn adjudicate(&self, asset: &Asset, comparators: &Comparators) -> Findings {
		let AssetBody::Prefab { components } = &asset.body else {
			tracing::error!(path = %asset.path, "prefab judicator bound to a non-prefab asset");
			return Findings::unchecked();
		};
		if self.presets.is_empty() {
			tracing::warn!(path = %asset.path, "prefab judicator has no presets");
			return Findings::unchecked();
		}

		Findings::checked(
			components
				.iter()
				.filter(|c| c.kind == self.component_kind)
				.flat_map(|c| self.judge_component(asset, c, comparators))
				.collect(),
		)
	}

	fn judge_component(&self, asset: &Asset, component: &Component, comparators: &Comparators) -> Vec<Violation> {
		let within_budget = |m: &Mismatch| {
			let live = component.properties.get(&m.path).and_then(PropertyValue::as_int);
			m.path.contains(MAX_PARTICLES_PROPERTY)
				&& matches!((self.particle_budget, live), (Some(budget), Some(live)) if live <= budget)
		};
		let specs = self.presets.specs();
		let outcome = self
			.presets
			.matcher(comparators)
			.tolerating(&within_budget)
			.evaluate(&component.properties, &specs);

		match outcome {
			MatchOutcome::Pass { .. } => Vec::new(),
			MatchOutcome::Vacant => vec![Violation::unfixable(format!(
				"{} ({}) does not adhere to any of the provided presets",
				asset.name, component.name
			))],
			MatchOutcome::Fail(mismatches) => mismatches
				.into_iter()
				.map(|m| {
					let message = format!("{}/{}", component.name, m.mismatch);
					let expected = self.raw_expected(m.spec, &m.mismatch).to_string();
					Violation::fixable(message, Remedy::SetProperty {
						component: Some(component.name.clone()),
						path: m.mismatch.path,
						expected,
					})
				})
				.collect(),
		}
	}

	/// Expected text as stored in the specification, before normalization.
	fn raw_expected<'a>(&'a self, spec: usize, mismatch: &'a Mismatch) -> &'a str {
		self.presets
			.get(spec)
			.and_then(|r| r.spec.get(&mismatch.path))
			.unwrap_or(mismatch.expected.as_str())
	}
}
