//! Generic property-diff rule.

use lex_law::{Lex, PresetRules, Specification};
use lex_primitives::PropertySet;

use crate::compare::{CompareOptions, Comparators};
use crate::matcher::{MatchOutcome, Matcher};
use crate::remedy::{RemedyError, parse_for};
use super::Findings;
use crate::verdict::Violation;

/// A specification resolved by name from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpec {
	pub name: String,
	pub spec: Specification,
}

/// Presets of one judicator with their matching rules.
///
/// Unknown preset names stay as `None` entries so specification indices
/// line up with the configured list.
#[derive(Debug, Clone, Default)]
pub struct PresetSet {
	pub rules: PresetRules,
	specs: Vec<Option<ResolvedSpec>>,
}

impl PresetSet {
	pub fn resolve(lex: &Lex, rules: &PresetRules) -> Self {
		let specs = lex
			.resolve_presets(rules)
			.into_iter()
			.map(|named| named.map(|n| ResolvedSpec { name: n.name.to_string(), spec: n.spec.clone() }))
			.collect();
		Self { rules: rules.clone(), specs }
	}

	pub fn from_specs(rules: PresetRules, specs: Vec<Option<ResolvedSpec>>) -> Self {
		Self { rules, specs }
	}

	pub fn options(&self) -> CompareOptions {
		CompareOptions { precision: self.rules.precision }
	}

	pub fn matcher<'a>(&'a self, comparators: &'a Comparators) -> Matcher<'a> {
		Matcher::new(comparators, self.options())
			.ignoring(&self.rules.ignore)
			.with_policy(self.rules.policy)
	}

	pub fn specs(&self) -> Vec<Option<&Specification>> {
		self.specs.iter().map(|s| s.as_ref().map(|r| &r.spec)).collect()
	}

	pub fn get(&self, index: usize) -> Option<&ResolvedSpec> {
		self.specs.get(index).and_then(Option::as_ref)
	}

	pub fn is_empty(&self) -> bool {
		self.specs.is_empty()
	}

	/// Violations of `props` against the presets; empty when one matches.
	/// Judges `props` against the presets. With no usable preset nothing is
	/// compared and the findings are partial.
	pub fn adjudicate(&self, props: &PropertySet, comparators: &Comparators) -> Findings {
		match self.matcher(comparators).evaluate(props, &self.specs()) {
			MatchOutcome::Pass { .. } => Findings::checked(Vec::new()),
			MatchOutcome::Vacant => {
				tracing::warn!(presets = ?self.rules.presets, "no usable presets; nothing compared");
				Findings::unchecked()
			}
			MatchOutcome::Fail(mismatches) => Findings::checked(
				mismatches
					.iter()
					.map(|m| Violation::from_mismatch(&m.mismatch, m.spec))
					.collect(),
			),
		}
	}

	/// Applies specification `index` to `props`.
	///
	/// Every differing path is validated and parsed before anything is
	/// written, so a failure leaves `props` untouched. Returns the number of
	/// properties changed.
	pub fn apply(&self, index: usize, props: &mut PropertySet, comparators: &Comparators) -> Result<usize, RemedyError> {
		let resolved = self.get(index).ok_or(RemedyError::SpecificationMissing(index))?;
		let options = self.options();

		let mut staged = Vec::new();
		for modification in &resolved.spec.modifications {
			if self.rules.is_ignored(&modification.path) {
				continue;
			}
			let live = props
				.get(&modification.path)
				.ok_or_else(|| RemedyError::PropertyMissing(modification.path.clone()))?;
			if comparators
				.compare(&modification.path, &modification.value, live, options)
				.is_none()
			{
				continue;
			}
			staged.push((modification.path.as_str(), parse_for(props, &modification.path, &modification.value)?));
		}

		let changed = staged.len();
		for (path, value) in staged {
			props.set(path, value);
		}
		Ok(changed)
	}
}
