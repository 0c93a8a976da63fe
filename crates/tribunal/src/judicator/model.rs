//! Mesh geometry rule with optional importer presets.

use lex_law::{Lex, ModelRules};
use lex_primitives::{Asset, AssetBody, Mesh, Node};

use super::Findings;
use super::preset::PresetSet;
use super::uv::{has_flipped_uvs, has_overlapping_uvs};
use crate::compare::Comparators;
use crate::verdict::Violation;

/// Component that marks a skeletal-rig subtree.
pub const RIG_COMPONENT: &str = "SkinnedMeshRenderer";

/// Component every node carries; it does not make a node non-empty.
const TRANSFORM: &str = "Transform";

#[derive(Debug, Clone, Default)]
pub struct ModelJudicator {
	pub importer: Option<PresetSet>,
	pub flag_redundant_secondary_uv: bool,
}

impl ModelJudicator {
	pub fn compile(lex: &Lex, rules: &ModelRules) -> Self {
		Self {
			importer: rules.importer.as_ref().map(|r| PresetSet::resolve(lex, r)),
			flag_redundant_secondary_uv: rules.flag_redundant_secondary_uv,
		}
	}

	pub fn adjudicate(&self, asset: &Asset, comparators: &Comparators) -> Findings {
		let mut findings = match &self.importer {
			Some(presets) => presets.adjudicate(&asset.settings, comparators),
			None => Findings::checked(Vec::new()),
		};

		let AssetBody::Model { mesh, hierarchy } = &asset.body else {
			tracing::error!(path = %asset.path, "model judicator bound to a non-model asset");
			findings.complete = false;
			return findings;
		};
		let Some(mesh) = mesh else {
			tracing::error!(path = %asset.path, "model has no mesh associated with it");
			findings.complete = false;
			return findings;
		};

		findings.violations.extend(self.geometry(&asset.name, mesh, hierarchy));
		findings
	}

	fn geometry(&self, name: &str, mesh: &Mesh, hierarchy: &Node) -> Vec<Violation> {
		let mut violations = Vec::new();

		if !mesh.bounds.center.is_zero() {
			violations.push(Violation::unfixable(format!(
				"{name}: the pivot is not at the origin (bounds centre {})",
				mesh.bounds.center
			)));
		}
		if !is_hierarchy_clean(hierarchy) {
			violations.push(Violation::unfixable(format!("{name}: the hierarchy contains empty leaf nodes")));
		}

		let flipped = has_flipped_uvs(&mesh.triangles, &mesh.uv);
		let overlapping = has_overlapping_uvs(&mesh.triangles, &mesh.uv);
		if !flipped && !overlapping {
			if self.flag_redundant_secondary_uv && mesh.has_secondary_uv() {
				violations.push(Violation::unfixable(format!(
					"{name}: the primary UV set is valid, so the secondary UV set is not needed"
				)));
			}
			return violations;
		}

		if flipped {
			violations.push(Violation::unfixable(format!("{name} has flipped UVs in the primary UV set")));
		}
		if overlapping {
			violations.push(Violation::unfixable(format!("{name} has overlapping UVs in the primary UV set")));
		}

		if !mesh.has_secondary_uv() {
			violations.push(Violation::unfixable(format!("{name} is missing a secondary UV set for lightmaps")));
			return violations;
		}
		if has_flipped_uvs(&mesh.triangles, &mesh.uv2) {
			violations.push(Violation::unfixable(format!("{name} has flipped UVs in the secondary UV set")));
		}
		if has_overlapping_uvs(&mesh.triangles, &mesh.uv2) {
			violations.push(Violation::unfixable(format!("{name} has overlapping UVs in the secondary UV set")));
		}
		violations
	}
}

/// True unless a leaf node without components exists outside every rig
/// subtree. Only the root's descendants are inspected.
pub fn is_hierarchy_clean(root: &Node) -> bool {
	root.children
		.iter()
		.filter(|child| !child.walk().any(|n| n.has_component(RIG_COMPONENT)))
		.flat_map(Node::walk)
		.all(|node| !is_empty_leaf(node))
}

fn is_empty_leaf(node: &Node) -> bool {
	node.children.is_empty() && node.components.iter().all(|c| c == TRANSFORM)
}
