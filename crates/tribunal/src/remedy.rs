//! Remediation results and the property-level corrections shared by
//! judicators.

use lex_primitives::{Asset, AssetBody, PropertySet, PropertyValue, ValueParseError};
use thiserror::Error;

use crate::verdict::ViolationId;

/// Outcome of a successful remediation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remedied {
	/// The violation was corrected and removed from its verdict.
	Fixed(String),
	/// The violation was no longer part of the verdict.
	AlreadyResolved,
}

#[derive(Debug, Error)]
pub enum RemedyError {
	#[error("violation {0} is not fixable")]
	NotFixable(ViolationId),

	#[error("verdict for '{verdict}' cannot be applied to '{asset}'")]
	SubjectMismatch { verdict: String, asset: String },

	#[error("no asset at '{0}'")]
	SubjectMissing(String),

	#[error("verdict was raised by '{verdict}', not '{judicator}'")]
	WrongJudicator { verdict: String, judicator: String },

	#[error("judicator '{0}' is not configured")]
	UnknownJudicator(String),

	#[error("specification #{0} does not exist")]
	SpecificationMissing(usize),

	#[error("property '{0}' not found")]
	PropertyMissing(String),

	#[error("component '{0}' not found")]
	ComponentMissing(String),

	#[error("property '{path}': {source}")]
	Parse {
		path: String,
		#[source]
		source: ValueParseError,
	},

	#[error("no placeholder configured for keyword {0}")]
	PlaceholderMissing(String),

	#[error("'{asset}' is not a {expected}")]
	WrongBody { asset: String, expected: &'static str },

	#[error("cannot derive a correction from '{0}'")]
	Unparseable(String),

	#[error("judicator '{judicator}' cannot apply a {remedy} remedy")]
	Inapplicable { judicator: String, remedy: &'static str },
}

/// Renders a remediation result as a one-line status for UI callers.
pub trait RemediationStatus {
	fn describe(&self) -> String;
}

impl RemediationStatus for Result<Remedied, RemedyError> {
	fn describe(&self) -> String {
		match self {
			Ok(Remedied::Fixed(message)) => message.clone(),
			Ok(Remedied::AlreadyResolved) => "Violation already resolved.".to_string(),
			Err(error) => format!("Remediation failed: {error}"),
		}
	}
}

/// Expected value recovered from a violation message of the form
/// `[component/]path : expected X, found Y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
	pub component: Option<String>,
	pub path: String,
	pub expected: String,
}

pub fn parse_expectation(message: &str) -> Option<Expectation> {
	let (target, rest) = message.split_once(": expected ")?;
	let (expected, _) = rest.split_once(", found ")?;
	let target = target.trim();
	if target.is_empty() {
		return None;
	}
	let (component, path) = match target.split_once('/') {
		Some((component, path)) => (Some(component.to_string()), path),
		None => (None, target),
	};
	Some(Expectation { component, path: path.to_string(), expected: expected.to_string() })
}

/// Parses `expected` as the live type of `path`.
pub(crate) fn parse_for(props: &PropertySet, path: &str, expected: &str) -> Result<PropertyValue, RemedyError> {
	let live = props.get(path).ok_or_else(|| RemedyError::PropertyMissing(path.to_string()))?;
	PropertyValue::parse_as(live.ty(), expected).map_err(|source| RemedyError::Parse { path: path.to_string(), source })
}

/// Assigns one property on the asset's settings or on a named component.
pub(crate) fn set_property(
	asset: &mut Asset,
	component: Option<&str>,
	path: &str,
	expected: &str,
) -> Result<String, RemedyError> {
	let props = match component {
		None => &mut asset.settings,
		Some(name) => {
			let AssetBody::Prefab { components } = &mut asset.body else {
				return Err(RemedyError::WrongBody { asset: asset.path.clone(), expected: "prefab" });
			};
			let component = components
				.iter_mut()
				.find(|c| c.name == name)
				.ok_or_else(|| RemedyError::ComponentMissing(name.to_string()))?;
			&mut component.properties
		}
	};
	let value = parse_for(props, path, expected)?;
	props.set(path, value);
	Ok(format!("Set {path} to {expected}."))
}

/// Correction for violations that carry no typed remedy.
pub(crate) fn set_from_message(asset: &mut Asset, message: &str) -> Result<String, RemedyError> {
	let expectation = parse_expectation(message).ok_or_else(|| RemedyError::Unparseable(message.to_string()))?;
	set_property(asset, expectation.component.as_deref(), &expectation.path, &expectation.expected)
}

#[cfg(test)]
mod tests;
