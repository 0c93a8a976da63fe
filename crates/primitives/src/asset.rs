//! Asset descriptions handed to the engine by the host.
//!
//! An [`Asset`] is a snapshot of one addressable object: its importer
//! settings as a [`PropertySet`] plus a kind-specific [`AssetBody`].

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Vec2};
use crate::value::PropertySet;

/// Importer (source) kind that produced an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceKind {
	AssetImporter,
	AudioImporter,
	ComputeShaderImporter,
	GUISkin,
	ModelImporter,
	MonoImporter,
	PrefabImporter,
	ShaderGraphImporter,
	ShaderImporter,
	TextureImporter,
	TrueTypeFontImporter,
	VideoClipImporter,
}

impl SourceKind {
	pub const ALL: [SourceKind; 12] = [
		Self::AssetImporter,
		Self::AudioImporter,
		Self::ComputeShaderImporter,
		Self::GUISkin,
		Self::ModelImporter,
		Self::MonoImporter,
		Self::PrefabImporter,
		Self::ShaderGraphImporter,
		Self::ShaderImporter,
		Self::TextureImporter,
		Self::TrueTypeFontImporter,
		Self::VideoClipImporter,
	];

	pub fn name(self) -> &'static str {
		match self {
			Self::AssetImporter => "AssetImporter",
			Self::AudioImporter => "AudioImporter",
			Self::ComputeShaderImporter => "ComputeShaderImporter",
			Self::GUISkin => "GUISkin",
			Self::ModelImporter => "ModelImporter",
			Self::MonoImporter => "MonoImporter",
			Self::PrefabImporter => "PrefabImporter",
			Self::ShaderGraphImporter => "ShaderGraphImporter",
			Self::ShaderImporter => "ShaderImporter",
			Self::TextureImporter => "TextureImporter",
			Self::TrueTypeFontImporter => "TrueTypeFontImporter",
			Self::VideoClipImporter => "VideoClipImporter",
		}
	}
}

impl fmt::Display for SourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown source kind: {0}")]
pub struct UnknownSourceKind(pub String);

impl FromStr for SourceKind {
	type Err = UnknownSourceKind;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|kind| kind.name() == s)
			.ok_or_else(|| UnknownSourceKind(s.to_string()))
	}
}

/// Snapshot of one corpus entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
	/// Project-relative path; the asset's identity.
	pub path: String,
	pub name: String,
	/// Runtime type name, e.g. `Texture2D` or `Material`.
	pub object_type: String,
	pub source_kind: SourceKind,
	/// Importer settings compared against presets.
	#[serde(default)]
	pub settings: PropertySet,
	#[serde(default)]
	pub body: AssetBody,
	/// Set when remediation changed the asset and it must be saved.
	#[serde(skip)]
	dirty: bool,
}

impl Asset {
	pub fn new(path: impl Into<String>, object_type: impl Into<String>, source_kind: SourceKind) -> Self {
		let path = path.into();
		let name = file_stem(&path).to_string();
		Self {
			path,
			name,
			object_type: object_type.into(),
			source_kind,
			settings: PropertySet::new(),
			body: AssetBody::Plain,
			dirty: false,
		}
	}

	pub fn with_settings(mut self, settings: PropertySet) -> Self {
		self.settings = settings;
		self
	}

	pub fn with_body(mut self, body: AssetBody) -> Self {
		self.body = body;
		self
	}

	pub fn mark_dirty(&mut self) {
		self.dirty = true;
	}

	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	/// Clears the dirty flag once the host has saved the asset.
	pub fn mark_saved(&mut self) {
		self.dirty = false;
	}
}

fn file_stem(path: &str) -> &str {
	let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
	match file.rfind('.') {
		Some(0) | None => file,
		Some(dot) => &file[..dot],
	}
}

/// Kind-specific payload of an asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetBody {
	#[default]
	Plain,
	Model {
		#[serde(default)]
		mesh: Option<Mesh>,
		hierarchy: Node,
	},
	Material(MaterialBody),
	Prefab {
		#[serde(default)]
		components: Vec<Component>,
	},
	Scene {
		#[serde(default)]
		dependencies: Vec<Dependency>,
	},
}

/// Triangle mesh with up to two UV channels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
	/// Vertex indices, three per triangle.
	pub triangles: Vec<u32>,
	#[serde(default)]
	pub uv: Vec<Vec2>,
	#[serde(default)]
	pub uv2: Vec<Vec2>,
	#[serde(default)]
	pub bounds: Bounds,
}

impl Mesh {
	pub fn triangle_count(&self) -> usize {
		self.triangles.len() / 3
	}

	pub fn has_secondary_uv(&self) -> bool {
		!self.uv2.is_empty()
	}
}

/// Node of an object hierarchy. `components` lists component type names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub name: String,
	#[serde(default)]
	pub components: Vec<String>,
	#[serde(default)]
	pub children: Vec<Node>,
}

impl Node {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), ..Self::default() }
	}

	pub fn with_component(mut self, component: impl Into<String>) -> Self {
		self.components.push(component.into());
		self
	}

	pub fn with_child(mut self, child: Node) -> Self {
		self.children.push(child);
		self
	}

	pub fn has_component(&self, component: &str) -> bool {
		self.components.iter().any(|c| c == component)
	}

	/// Depth-first walk including `self`.
	pub fn walk(&self) -> impl Iterator<Item = &Node> {
		let mut stack = vec![self];
		std::iter::from_fn(move || {
			let node = stack.pop()?;
			stack.extend(node.children.iter().rev());
			Some(node)
		})
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shader {
	pub name: String,
	/// Every keyword the shader declares.
	#[serde(default)]
	pub keyword_space: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialBody {
	pub shader: Shader,
	/// Active shader keywords.
	#[serde(default)]
	pub keywords: Vec<String>,
	/// Texture slots by property name; `None` when empty.
	#[serde(default)]
	pub textures: IndexMap<String, Option<String>>,
}

impl MaterialBody {
	/// Active keywords sorted and de-duplicated.
	pub fn sorted_keywords(&self) -> Vec<String> {
		let mut keywords = self.keywords.clone();
		keywords.sort();
		keywords.dedup();
		keywords
	}
}

/// Component attached to a prefab, e.g. a particle system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
	pub name: String,
	/// Component type name, e.g. `ParticleSystem`.
	pub kind: String,
	#[serde(default)]
	pub properties: PropertySet,
}

/// An asset a scene depends on, with its runtime memory footprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
	pub path: String,
	pub memory_bytes: u64,
}

#[cfg(test)]
mod tests;
