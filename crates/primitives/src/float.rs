//! Serde adapters that keep non-finite floats.
//!
//! JSON has no spelling for infinities or NaN, so they are written as the
//! invariant strings `Infinity`, `-Infinity` and `NaN` and read back from
//! either a number or one of those strings. Binary formats keep the raw bits.

use std::fmt;

use serde::Deserialize;
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;

use crate::value::parse_invariant_float;

fn non_finite_label(value: f64) -> &'static str {
	if value.is_nan() {
		"NaN"
	} else if value.is_sign_positive() {
		"Infinity"
	} else {
		"-Infinity"
	}
}

struct FloatVisitor;

impl Visitor<'_> for FloatVisitor {
	type Value = f64;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a number, \"Infinity\", \"-Infinity\" or \"NaN\"")
	}

	fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
		Ok(value)
	}

	fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
		Ok(value as f64)
	}

	fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
		Ok(value as f64)
	}

	fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
		match value.trim() {
			"NaN" => Ok(f64::NAN),
			other => parse_invariant_float(other).ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self)),
		}
	}
}

/// `#[serde(with = "crate::float::double")]` for `f64` fields.
pub mod double {
	use super::*;

	pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
		if value.is_finite() || !serializer.is_human_readable() {
			serializer.serialize_f64(*value)
		} else {
			serializer.serialize_str(non_finite_label(*value))
		}
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
		if !deserializer.is_human_readable() {
			return f64::deserialize(deserializer);
		}
		deserializer.deserialize_any(FloatVisitor)
	}
}

/// `#[serde(with = "crate::float::single")]` for `f32` fields.
pub mod single {
	use super::*;

	pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
		if value.is_finite() || !serializer.is_human_readable() {
			serializer.serialize_f32(*value)
		} else {
			serializer.serialize_str(non_finite_label(f64::from(*value)))
		}
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
		if !deserializer.is_human_readable() {
			return f32::deserialize(deserializer);
		}
		deserializer.deserialize_any(FloatVisitor).map(|value| value as f32)
	}
}

#[cfg(test)]
mod tests;
