//! Typed property values.
//!
//! Hosts expose serialized properties as a path-addressed [`PropertySet`].
//! Reference specifications store expected values as the host's serialized
//! text, so this module also owns the locale-invariant number handling used to
//! compare and re-parse that text.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Color, Rect, Vec2, Vec3, Vec4};

/// Semantic type tag of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
	String,
	Integer,
	Boolean,
	Float,
	Enum,
	ObjectReference,
	Color,
	Vector2,
	Vector3,
	Vector4,
	Quaternion,
	Rect,
	Bounds,
	Curve,
	LayerMask,
	ArraySize,
	Character,
	Generic,
}

impl PropertyType {
	pub fn name(self) -> &'static str {
		match self {
			Self::String => "string",
			Self::Integer => "integer",
			Self::Boolean => "boolean",
			Self::Float => "float",
			Self::Enum => "enum",
			Self::ObjectReference => "object_reference",
			Self::Color => "color",
			Self::Vector2 => "vector2",
			Self::Vector3 => "vector3",
			Self::Vector4 => "vector4",
			Self::Quaternion => "quaternion",
			Self::Rect => "rect",
			Self::Bounds => "bounds",
			Self::Curve => "curve",
			Self::LayerMask => "layer_mask",
			Self::ArraySize => "array_size",
			Self::Character => "character",
			Self::Generic => "generic",
		}
	}
}

impl fmt::Display for PropertyType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A single animation curve key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
	#[serde(with = "crate::float::single")]
	pub time: f32,
	#[serde(with = "crate::float::single")]
	pub value: f32,
	#[serde(default, with = "crate::float::single")]
	pub in_tangent: f32,
	#[serde(default, with = "crate::float::single")]
	pub out_tangent: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curve {
	pub keys: Vec<Keyframe>,
}

impl fmt::Display for Curve {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Curve[")?;
		for (i, key) in self.keys.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(
				f,
				"({:.3}, {:.3}, {:.3}, {:.3})",
				key.time, key.value, key.in_tangent, key.out_tangent
			)?;
		}
		f.write_str("]")
	}
}

/// Live value of a serialized property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
	String(String),
	Integer(i64),
	Boolean(bool),
	Float(#[serde(with = "crate::float::double")] f64),
	/// Enum value by symbolic name.
	Enum(String),
	/// Referenced object's display name, `None` when unassigned.
	ObjectReference(Option<String>),
	Color(Color),
	Vector2(Vec2),
	Vector3(Vec3),
	Vector4(Vec4),
	Quaternion(Vec4),
	Rect(Rect),
	Bounds(Bounds),
	Curve(Curve),
	LayerMask(i64),
	ArraySize(i64),
	Character(char),
	Generic,
}

impl PropertyValue {
	pub fn ty(&self) -> PropertyType {
		match self {
			Self::String(_) => PropertyType::String,
			Self::Integer(_) => PropertyType::Integer,
			Self::Boolean(_) => PropertyType::Boolean,
			Self::Float(_) => PropertyType::Float,
			Self::Enum(_) => PropertyType::Enum,
			Self::ObjectReference(_) => PropertyType::ObjectReference,
			Self::Color(_) => PropertyType::Color,
			Self::Vector2(_) => PropertyType::Vector2,
			Self::Vector3(_) => PropertyType::Vector3,
			Self::Vector4(_) => PropertyType::Vector4,
			Self::Quaternion(_) => PropertyType::Quaternion,
			Self::Rect(_) => PropertyType::Rect,
			Self::Bounds(_) => PropertyType::Bounds,
			Self::Curve(_) => PropertyType::Curve,
			Self::LayerMask(_) => PropertyType::LayerMask,
			Self::ArraySize(_) => PropertyType::ArraySize,
			Self::Character(_) => PropertyType::Character,
			Self::Generic => PropertyType::Generic,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Integer(v) | Self::LayerMask(v) | Self::ArraySize(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(v) | Self::Enum(v) => Some(v),
			_ => None,
		}
	}

	/// Parses host text into a value of type `ty`.
	///
	/// Used when writing an expected value back onto a live property, so only
	/// the types a host can assign from text are supported.
	pub fn parse_as(ty: PropertyType, text: &str) -> Result<Self, ValueParseError> {
		let trimmed = text.trim();
		let invalid = || ValueParseError::Invalid { ty, text: trimmed.to_string() };
		match ty {
			PropertyType::String => Ok(Self::String(if text == EMPTY_LABEL { String::new() } else { text.to_string() })),
			PropertyType::Integer => trimmed.parse().map(Self::Integer).map_err(|_| invalid()),
			PropertyType::LayerMask => trimmed.parse().map(Self::LayerMask).map_err(|_| invalid()),
			PropertyType::ArraySize => trimmed.parse().map(Self::ArraySize).map_err(|_| invalid()),
			PropertyType::Boolean => parse_bool(trimmed).map(Self::Boolean).ok_or_else(invalid),
			PropertyType::Float => parse_invariant_float(trimmed).map(Self::Float).ok_or_else(invalid),
			PropertyType::Enum if trimmed.is_empty() => Err(invalid()),
			PropertyType::Enum => Ok(Self::Enum(trimmed.to_string())),
			PropertyType::ObjectReference => Ok(Self::ObjectReference(
				(!trimmed.is_empty() && trimmed != NONE_LABEL).then(|| trimmed.to_string()),
			)),
			PropertyType::Character => {
				let mut chars = trimmed.chars();
				match (chars.next(), chars.next()) {
					(Some(c), None) => Ok(Self::Character(c)),
					_ => Err(invalid()),
				}
			}
			PropertyType::Color => Color::from_html(trimmed).map(Self::Color).map_err(|_| invalid()),
			other => Err(ValueParseError::Unsupported(other)),
		}
	}
}

/// Label substituted for empty strings so reports stay readable.
pub const EMPTY_LABEL: &str = "Empty";

/// Label for unassigned object references.
pub const NONE_LABEL: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueParseError {
	#[error("cannot parse '{text}' as {ty}")]
	Invalid { ty: PropertyType, text: String },
	#[error("{0} properties cannot be assigned from text")]
	Unsupported(PropertyType),
}

/// Parses booleans as hosts serialize them: `0`/`1` or `true`/`false`.
pub fn parse_bool(text: &str) -> Option<bool> {
	match text.trim().to_ascii_lowercase().as_str() {
		"1" | "true" => Some(true),
		"0" | "false" => Some(false),
		_ => None,
	}
}

/// Parses a float with `.` as the only decimal separator.
///
/// Grouping and comma decimals are rejected so that results never depend on
/// the machine's locale.
pub fn parse_invariant_float(text: &str) -> Option<f64> {
	let trimmed = text.trim();
	if trimmed.is_empty() || trimmed.contains(',') {
		return None;
	}
	match trimmed {
		"Infinity" | "∞" => Some(f64::INFINITY),
		"-Infinity" | "-∞" => Some(f64::NEG_INFINITY),
		_ => trimmed.parse().ok(),
	}
}

/// Formats `value` with exactly `precision` decimals.
///
/// Negative zero collapses to zero so `-0.00001` and `0.00001` agree.
pub fn format_fixed(value: f64, precision: usize) -> String {
	let text = format!("{value:.precision$}");
	match text.strip_prefix('-') {
		Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
		_ => text,
	}
}

/// Ordered, path-addressed property values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySet {
	values: IndexMap<String, PropertyValue>,
}

impl PropertySet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, path: &str) -> Option<&PropertyValue> {
		self.values.get(path)
	}

	pub fn contains(&self, path: &str) -> bool {
		self.values.contains_key(path)
	}

	/// Inserts or replaces a value, returning the previous one.
	pub fn set(&mut self, path: impl Into<String>, value: PropertyValue) -> Option<PropertyValue> {
		self.values.insert(path.into(), value)
	}

	pub fn with(mut self, path: impl Into<String>, value: PropertyValue) -> Self {
		self.set(path, value);
		self
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl FromIterator<(String, PropertyValue)> for PropertySet {
	fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
		Self { values: iter.into_iter().collect() }
	}
}
