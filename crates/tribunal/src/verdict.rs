//! Verdicts and the violations they carry.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compare::Mismatch;

/// Identifier of a violation, unique within its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationId(pub u32);

impl fmt::Display for ViolationId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// How a shader keyword deviates from the closest registered variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeywordClass {
	/// Required by the variant but not active.
	Missing,
	/// Active but outside the shader's keyword space.
	Illegal,
	/// Active and declared by the shader, but not part of the variant.
	Invalid,
}

impl KeywordClass {
	pub fn label(self) -> &'static str {
		match self {
			Self::Missing => "Missing",
			Self::Illegal => "Illegal",
			Self::Invalid => "Invalid",
		}
	}
}

impl fmt::Display for KeywordClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Typed corrective data kept alongside the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Remedy {
	/// No typed data; remediation falls back to parsing the message.
	None,
	/// Apply the judicator's specification at `spec` wholesale.
	ApplySpecification { spec: usize },
	/// Assign one property. `component` scopes the path to a prefab component.
	SetProperty {
		component: Option<String>,
		path: String,
		expected: String,
	},
	/// Assign the configured placeholder texture for a missing keyword.
	AssignPlaceholder { keyword: String },
	/// Remove an active keyword.
	StripKeyword { keyword: String, class: KeywordClass },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
	pub id: ViolationId,
	pub message: String,
	pub fixable: bool,
	pub remedy: Remedy,
}

impl Violation {
	/// Unfixable violation. Its id is assigned when added to a verdict.
	pub fn unfixable(message: impl Into<String>) -> Self {
		Self {
			id: ViolationId(0),
			message: message.into(),
			fixable: false,
			remedy: Remedy::None,
		}
	}

	pub fn fixable(message: impl Into<String>, remedy: Remedy) -> Self {
		Self {
			id: ViolationId(0),
			message: message.into(),
			fixable: true,
			remedy,
		}
	}

	/// Fixable property mismatch that re-applies specification `spec`.
	pub fn from_mismatch(mismatch: &Mismatch, spec: usize) -> Self {
		Self::fixable(mismatch.to_string(), Remedy::ApplySpecification { spec })
	}
}

impl fmt::Display for Violation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let marker = if self.fixable { "fixable" } else { "unfixable" };
		write!(f, "{} [{marker}] {}", self.id, self.message)
	}
}

#[derive(Debug, Error)]
pub enum AggregateError {
	/// A fresh verdict was requested without a subject.
	#[error("cannot open a verdict without a subject (judicator '{judicator}')")]
	MissingSubject { judicator: String },
	/// No violation list was supplied. The existing verdict is handed back.
	#[error("no violation list supplied to judicator '{judicator}'")]
	MissingViolations {
		judicator: String,
		existing: Option<Box<Verdict>>,
	},
}

impl AggregateError {
	/// Recovers the verdict passed in, if any.
	pub fn into_existing(self) -> Option<Verdict> {
		match self {
			Self::MissingSubject { .. } => None,
			Self::MissingViolations { existing, .. } => existing.map(|v| *v),
		}
	}
}

/// Open violations of one subject raised by one judicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
	pub subject: String,
	pub judicator: String,
	violations: Vec<Violation>,
	next_id: u32,
}

impl Verdict {
	pub fn new(subject: impl Into<String>, judicator: impl Into<String>) -> Self {
		Self {
			subject: subject.into(),
			judicator: judicator.into(),
			violations: Vec::new(),
			next_id: 1,
		}
	}

	/// Adds `violations` to `existing`, opening a verdict for `subject` when
	/// there is none.
	///
	/// An empty list leaves `existing` untouched, so `Ok(None)` is returned
	/// only when nothing was ever recorded.
	pub fn create_or_append(
		existing: Option<Verdict>,
		subject: Option<&str>,
		judicator: &str,
		violations: Option<Vec<Violation>>,
	) -> Result<Option<Verdict>, AggregateError> {
		let Some(violations) = violations else {
			return Err(AggregateError::MissingViolations {
				judicator: judicator.to_string(),
				existing: existing.map(Box::new),
			});
		};
		if violations.is_empty() {
			return Ok(existing);
		}
		let mut verdict = match (existing, subject) {
			(Some(verdict), _) => verdict,
			(None, Some(subject)) => Verdict::new(subject, judicator),
			(None, None) => return Err(AggregateError::MissingSubject { judicator: judicator.to_string() }),
		};
		verdict.extend(violations);
		Ok(Some(verdict))
	}

	/// Appends a violation under a fresh id.
	pub fn push(&mut self, mut violation: Violation) -> ViolationId {
		let id = ViolationId(self.next_id);
		self.next_id += 1;
		violation.id = id;
		self.violations.push(violation);
		id
	}

	pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
		for violation in violations {
			self.push(violation);
		}
	}

	pub fn violations(&self) -> &[Violation] {
		&self.violations
	}

	pub fn get(&self, id: ViolationId) -> Option<&Violation> {
		self.violations.iter().find(|v| v.id == id)
	}

	pub fn remove(&mut self, id: ViolationId) -> Option<Violation> {
		let index = self.violations.iter().position(|v| v.id == id)?;
		Some(self.violations.remove(index))
	}

	pub fn len(&self) -> usize {
		self.violations.len()
	}

	pub fn is_empty(&self) -> bool {
		self.violations.is_empty()
	}

	/// True once every violation has been remediated.
	pub fn is_resolved(&self) -> bool {
		self.violations.is_empty()
	}

	/// Drops an empty verdict.
	pub fn surfaced(self) -> Option<Self> {
		(!self.violations.is_empty()).then_some(self)
	}

	pub fn fixable_ids(&self) -> Vec<ViolationId> {
		self.violations.iter().filter(|v| v.fixable).map(|v| v.id).collect()
	}
}

impl fmt::Display for Verdict {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{} ({}):", self.subject, self.judicator)?;
		for violation in &self.violations {
			writeln!(f, "  {violation}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
