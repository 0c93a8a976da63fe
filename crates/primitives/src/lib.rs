//! Core value types for lex: typed properties, geometry, and asset snapshots.

/// Asset snapshots and kind-specific payloads.
pub mod asset;
/// Serde adapters for floats that may be non-finite.
pub mod float;
/// Vectors, colors, and bounds.
pub mod geometry;
/// Typed property values and locale-invariant number handling.
pub mod value;

pub use asset::{Asset, AssetBody, Component, Dependency, MaterialBody, Mesh, Node, Shader, SourceKind, UnknownSourceKind};
pub use geometry::{Bounds, Color, ColorParseError, Rect, Vec2, Vec3, Vec4};
pub use value::{
	Curve, EMPTY_LABEL, Keyframe, NONE_LABEL, PropertySet, PropertyType, PropertyValue, ValueParseError, format_fixed,
	parse_bool, parse_invariant_float,
};
