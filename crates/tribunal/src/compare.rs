//! Property comparison.
//!
//! Expected values arrive as host-serialized text and live values as typed
//! [`PropertyValue`]s. A [`Comparators`] registry maps each [`PropertyType`]
//! to a normalizer that renders both sides as display strings; the property
//! matches iff the strings are equal.

use std::fmt;
use std::sync::{Arc, LazyLock};

use lex_law::DEFAULT_PRECISION;
use lex_primitives::{EMPTY_LABEL, NONE_LABEL, PropertyType, PropertyValue, format_fixed, parse_invariant_float};
use rustc_hash::FxHashMap as HashMap;

/// Actual-side text for types without a registered normalizer.
pub const UNRECOGNIZED: &str = "Unrecognized Type";

/// Actual-side text for opaque compound properties.
pub const GENERIC: &str = "Generic";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
	/// Decimal digits kept when comparing floats.
	pub precision: usize,
}

impl Default for CompareOptions {
	fn default() -> Self {
		Self { precision: DEFAULT_PRECISION }
	}
}

/// Both sides of a comparison rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
	pub expected: String,
	pub actual: String,
}

impl Normalized {
	fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
		Self { expected: expected.into(), actual: actual.into() }
	}

	pub fn is_match(&self) -> bool {
		self.expected == self.actual
	}
}

/// A property whose live value differs from the expected text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
	pub path: String,
	pub expected: String,
	pub actual: String,
}

impl fmt::Display for Mismatch {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} : expected {}, found {}", self.path, self.expected, self.actual)
	}
}

pub type Normalizer = dyn Fn(&str, &PropertyValue, CompareOptions) -> Normalized + Send + Sync;

/// Registry of per-type normalizers.
#[derive(Clone)]
pub struct Comparators {
	table: HashMap<PropertyType, Arc<Normalizer>>,
}

static BUILTIN: LazyLock<Comparators> = LazyLock::new(Comparators::builtin);

impl Comparators {
	/// Registry with no normalizers; every comparison yields [`UNRECOGNIZED`].
	pub fn empty() -> Self {
		Self { table: HashMap::default() }
	}

	/// Registry covering every [`PropertyType`].
	pub fn builtin() -> Self {
		let mut comparators = Self::empty();
		comparators
			.register(PropertyType::String, normalize_string)
			.register(PropertyType::Integer, normalize_integer)
			.register(PropertyType::LayerMask, normalize_integer)
			.register(PropertyType::ArraySize, normalize_integer)
			.register(PropertyType::Boolean, normalize_boolean)
			.register(PropertyType::Float, normalize_float)
			.register(PropertyType::Enum, normalize_enum)
			.register(PropertyType::ObjectReference, normalize_reference)
			.register(PropertyType::Character, normalize_character)
			.register(PropertyType::Generic, |expected, _, _| Normalized::new(expected, GENERIC));
		for ty in [
			PropertyType::Color,
			PropertyType::Vector2,
			PropertyType::Vector3,
			PropertyType::Vector4,
			PropertyType::Quaternion,
			PropertyType::Rect,
			PropertyType::Bounds,
			PropertyType::Curve,
		] {
			comparators.register(ty, normalize_structured);
		}
		comparators
	}

	/// Process-wide builtin registry.
	pub fn shared() -> &'static Comparators {
		&BUILTIN
	}

	/// Registers (or replaces) the normalizer for `ty`.
	pub fn register<F>(&mut self, ty: PropertyType, normalizer: F) -> &mut Self
	where
		F: Fn(&str, &PropertyValue, CompareOptions) -> Normalized + Send + Sync + 'static,
	{
		self.table.insert(ty, Arc::new(normalizer));
		self
	}

	pub fn normalize(&self, expected: &str, actual: &PropertyValue, options: CompareOptions) -> Normalized {
		match self.table.get(&actual.ty()) {
			Some(normalizer) => normalizer(expected, actual, options),
			None => Normalized::new(expected, UNRECOGNIZED),
		}
	}

	/// Compares one property. Returns `None` when equal.
	pub fn compare(
		&self,
		path: &str,
		expected: &str,
		actual: &PropertyValue,
		options: CompareOptions,
	) -> Option<Mismatch> {
		let normalized = self.normalize(expected, actual, options);
		(!normalized.is_match()).then(|| Mismatch {
			path: path.to_string(),
			expected: normalized.expected,
			actual: normalized.actual,
		})
	}
}

impl Default for Comparators {
	fn default() -> Self {
		Self::builtin()
	}
}

impl fmt::Debug for Comparators {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut types: Vec<_> = self.table.keys().copied().collect();
		types.sort();
		f.debug_struct("Comparators").field("types", &types).finish()
	}
}

fn or_label<'a>(text: &'a str, label: &'a str) -> &'a str {
	if text.is_empty() { label } else { text }
}

fn normalize_string(expected: &str, actual: &PropertyValue, _: CompareOptions) -> Normalized {
	let actual = actual.as_str().unwrap_or_default();
	Normalized::new(or_label(expected, EMPTY_LABEL), or_label(actual, EMPTY_LABEL))
}

fn normalize_integer(expected: &str, actual: &PropertyValue, _: CompareOptions) -> Normalized {
	let actual = actual.as_int().map(|v| v.to_string()).unwrap_or_default();
	Normalized::new(expected, actual)
}

fn normalize_boolean(expected: &str, actual: &PropertyValue, _: CompareOptions) -> Normalized {
	let expected = if expected == "0" { "False" } else { "True" };
	let actual = match actual {
		PropertyValue::Boolean(true) => "True",
		_ => "False",
	};
	Normalized::new(expected, actual)
}

/// Unparseable expected text is kept verbatim and therefore mismatches.
fn normalize_float(expected: &str, actual: &PropertyValue, options: CompareOptions) -> Normalized {
	let precision = options.precision;
	let expected = match parse_invariant_float(expected) {
		Some(value) => format_fixed(value, precision),
		None => expected.to_string(),
	};
	let actual = actual.as_float().map(|v| format_fixed(v, precision)).unwrap_or_default();
	Normalized::new(expected, actual)
}

fn normalize_enum(expected: &str, actual: &PropertyValue, _: CompareOptions) -> Normalized {
	Normalized::new(expected, actual.as_str().unwrap_or_default())
}

fn normalize_reference(expected: &str, actual: &PropertyValue, _: CompareOptions) -> Normalized {
	let actual = match actual {
		PropertyValue::ObjectReference(Some(name)) if !name.is_empty() => name.as_str(),
		_ => NONE_LABEL,
	};
	Normalized::new(or_label(expected, NONE_LABEL), actual)
}

fn normalize_character(expected: &str, actual: &PropertyValue, _: CompareOptions) -> Normalized {
	let actual = match actual {
		PropertyValue::Character(c) => c.to_string(),
		_ => String::new(),
	};
	Normalized::new(expected, actual)
}

fn normalize_structured(expected: &str, actual: &PropertyValue, _: CompareOptions) -> Normalized {
	let actual = match actual {
		PropertyValue::Color(v) => v.to_string(),
		PropertyValue::Vector2(v) => v.to_string(),
		PropertyValue::Vector3(v) => v.to_string(),
		PropertyValue::Vector4(v) | PropertyValue::Quaternion(v) => v.to_string(),
		PropertyValue::Rect(v) => v.to_string(),
		PropertyValue::Bounds(v) => v.to_string(),
		PropertyValue::Curve(v) => v.to_string(),
		_ => UNRECOGNIZED.to_string(),
	};
	Normalized::new(expected, actual)
}

#[cfg(test)]
mod tests;
