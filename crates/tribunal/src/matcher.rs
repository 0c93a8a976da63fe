//! Matching a property set against an ordered list of specifications.
//!
//! Specifications are tried in order and the first one with no mismatches
//! wins; later specifications are never compared. When none match, the
//! [`MatchPolicy`] decides which mismatches are reported.

use lex_law::{MatchPolicy, Specification};
use lex_primitives::PropertySet;

use crate::compare::{CompareOptions, Comparators, Mismatch};

/// A mismatch attributed to the specification that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecMismatch {
	/// Index of the specification in the judicator's list.
	pub spec: usize,
	pub mismatch: Mismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
	/// Specification `spec` matched.
	Pass { spec: usize },
	/// No specification matched.
	Fail(Vec<SpecMismatch>),
	/// Every specification entry was null; nothing was compared.
	Vacant,
}

impl MatchOutcome {
	pub fn is_pass(&self) -> bool {
		matches!(self, Self::Pass { .. })
	}
}

type Tolerance<'a> = dyn Fn(&Mismatch) -> bool + 'a;

/// Compares property sets against specifications.
pub struct Matcher<'a> {
	comparators: &'a Comparators,
	options: CompareOptions,
	ignore: &'a [String],
	policy: MatchPolicy,
	tolerance: Option<&'a Tolerance<'a>>,
}

impl<'a> Matcher<'a> {
	pub fn new(comparators: &'a Comparators, options: CompareOptions) -> Self {
		Self {
			comparators,
			options,
			ignore: &[],
			policy: MatchPolicy::default(),
			tolerance: None,
		}
	}

	/// Property paths never compared.
	pub fn ignoring(mut self, ignore: &'a [String]) -> Self {
		self.ignore = ignore;
		self
	}

	pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Mismatches for which `tolerate` returns true are dropped before a
	/// specification is judged.
	pub fn tolerating(mut self, tolerate: &'a Tolerance<'a>) -> Self {
		self.tolerance = Some(tolerate);
		self
	}

	/// Mismatches of `props` against one specification, in specification
	/// order. Paths absent from `props` are logged and skipped.
	pub fn diff(&self, props: &PropertySet, spec: &Specification) -> Vec<Mismatch> {
		let mut mismatches = Vec::new();
		for modification in &spec.modifications {
			if self.ignore.iter().any(|p| *p == modification.path) {
				continue;
			}
			let Some(actual) = props.get(&modification.path) else {
				tracing::warn!(path = %modification.path, "property not found on subject");
				continue;
			};
			if let Some(mismatch) =
				self.comparators
					.compare(&modification.path, &modification.value, actual, self.options)
				&& !self.tolerance.is_some_and(|tolerate| tolerate(&mismatch))
			{
				mismatches.push(mismatch);
			}
		}
		mismatches
	}

	pub fn evaluate(&self, props: &PropertySet, specs: &[Option<&Specification>]) -> MatchOutcome {
		let mut attempted = false;
		let mut failures: Vec<(usize, Vec<Mismatch>)> = Vec::new();

		for (index, spec) in specs.iter().enumerate() {
			let Some(spec) = spec else {
				continue;
			};
			attempted = true;
			let mismatches = self.diff(props, spec);
			if mismatches.is_empty() {
				return MatchOutcome::Pass { spec: index };
			}
			failures.push((index, mismatches));
		}

		if !attempted {
			return MatchOutcome::Vacant;
		}

		let attribute = |(spec, mismatches): (usize, Vec<Mismatch>)| {
			mismatches.into_iter().map(move |mismatch| SpecMismatch { spec, mismatch })
		};
		let reported = match self.policy {
			MatchPolicy::Union => failures.into_iter().flat_map(attribute).collect(),
			MatchPolicy::Closest => {
				let mut best: Option<(usize, Vec<Mismatch>)> = None;
				for failure in failures {
					if best.as_ref().is_none_or(|b| failure.1.len() < b.1.len()) {
						best = Some(failure);
					}
				}
				best.into_iter().flat_map(attribute).collect()
			}
		};
		MatchOutcome::Fail(reported)
	}
}

#[cfg(test)]
mod tests;
