//! Small geometric value types carried by asset properties and meshes.
//!
//! `Display` implementations produce the canonical text used when comparing
//! structured properties, so they must stay stable.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Two-component vector (UV coordinates, 2D positions).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
	#[serde(with = "crate::float::single")]
	pub x: f32,
	#[serde(with = "crate::float::single")]
	pub y: f32,
}

impl Vec2 {
	pub const ZERO: Self = Self::new(0.0, 0.0);

	pub const fn new(x: f32, y: f32) -> Self {
		Self { x, y }
	}

	pub fn dot(self, other: Self) -> f32 {
		self.x * other.x + self.y * other.y
	}

	/// Counter-clockwise perpendicular.
	pub fn perpendicular(self) -> Self {
		Self::new(-self.y, self.x)
	}

	/// Z component of the 3D cross product.
	pub fn cross(self, other: Self) -> f32 {
		self.x * other.y - self.y * other.x
	}
}

impl Sub for Vec2 {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Add for Vec2 {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl fmt::Display for Vec2 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({:.2}, {:.2})", self.x, self.y)
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
	#[serde(with = "crate::float::single")]
	pub x: f32,
	#[serde(with = "crate::float::single")]
	pub y: f32,
	#[serde(with = "crate::float::single")]
	pub z: f32,
}

impl Vec3 {
	pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

	pub const fn new(x: f32, y: f32, z: f32) -> Self {
		Self { x, y, z }
	}

	/// Exact comparison against the origin; no epsilon.
	pub fn is_zero(self) -> bool {
		self.x == 0.0 && self.y == 0.0 && self.z == 0.0
	}
}

impl fmt::Display for Vec3 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
	}
}

/// Four-component vector; also used for quaternions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
	#[serde(with = "crate::float::single")]
	pub x: f32,
	#[serde(with = "crate::float::single")]
	pub y: f32,
	#[serde(with = "crate::float::single")]
	pub z: f32,
	#[serde(with = "crate::float::single")]
	pub w: f32,
}

impl Vec4 {
	pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
		Self { x, y, z, w }
	}
}

impl fmt::Display for Vec4 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({:.2}, {:.2}, {:.2}, {:.2})", self.x, self.y, self.z, self.w)
	}
}

/// Linear RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
	#[serde(with = "crate::float::single")]
	pub r: f32,
	#[serde(with = "crate::float::single")]
	pub g: f32,
	#[serde(with = "crate::float::single")]
	pub b: f32,
	#[serde(default = "opaque", with = "crate::float::single")]
	pub a: f32,
}

fn opaque() -> f32 {
	1.0
}

impl Default for Color {
	fn default() -> Self {
		Self::new(0.0, 0.0, 0.0, 1.0)
	}
}

/// Errors from [`Color::from_html`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
	#[error("color must start with '#': {0}")]
	MissingHash(String),
	#[error("expected 3, 4, 6, or 8 hex digits: {0}")]
	Length(String),
	#[error("invalid hex digit in color: {0}")]
	Digit(String),
}

impl Color {
	pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
		Self { r, g, b, a }
	}

	/// Parses `#RGB`, `#RGBA`, `#RRGGBB`, or `#RRGGBBAA`.
	pub fn from_html(text: &str) -> Result<Self, ColorParseError> {
		let trimmed = text.trim();
		let hex = trimmed
			.strip_prefix('#')
			.ok_or_else(|| ColorParseError::MissingHash(trimmed.to_string()))?;
		if !hex.is_ascii() {
			return Err(ColorParseError::Digit(trimmed.to_string()));
		}

		let digits: Vec<u8> = match hex.len() {
			3 | 4 => hex
				.chars()
				.map(|c| u8::from_str_radix(&format!("{c}{c}"), 16))
				.collect::<Result<_, _>>()
				.map_err(|_| ColorParseError::Digit(trimmed.to_string()))?,
			6 | 8 => (0..hex.len())
				.step_by(2)
				.map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
				.collect::<Result<_, _>>()
				.map_err(|_| ColorParseError::Digit(trimmed.to_string()))?,
			_ => return Err(ColorParseError::Length(trimmed.to_string())),
		};

		let channel = |i: usize| digits.get(i).map_or(1.0, |&d| f32::from(d) / 255.0);
		Ok(Self::new(channel(0), channel(1), channel(2), channel(3)))
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({:.3}, {:.3}, {:.3}, {:.3})", self.r, self.g, self.b, self.a)
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
	#[serde(with = "crate::float::single")]
	pub x: f32,
	#[serde(with = "crate::float::single")]
	pub y: f32,
	#[serde(with = "crate::float::single")]
	pub width: f32,
	#[serde(with = "crate::float::single")]
	pub height: f32,
}

impl fmt::Display for Rect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"(x:{:.2}, y:{:.2}, width:{:.2}, height:{:.2})",
			self.x, self.y, self.width, self.height
		)
	}
}

/// Axis-aligned box stored as centre and half-size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
	pub center: Vec3,
	pub extents: Vec3,
}

impl Bounds {
	pub const fn new(center: Vec3, extents: Vec3) -> Self {
		Self { center, extents }
	}
}

impl fmt::Display for Bounds {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Center: {}, Extents: {}", self.center, self.extents)
	}
}

#[cfg(test)]
mod tests;
