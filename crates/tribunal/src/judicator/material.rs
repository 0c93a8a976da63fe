//! Shader-variant rule for materials.

use lex_law::{MaterialLaw, ShaderLaw};
use lex_primitives::{Asset, AssetBody, MaterialBody};
use smallvec::SmallVec;

use super::Findings;
use crate::remedy::RemedyError;
use crate::verdict::{KeywordClass, Remedy, Violation};

/// One keyword that separates a material from a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordDiff {
	pub keyword: String,
	pub class: KeywordClass,
}

pub type KeywordDiffs = SmallVec<[KeywordDiff; 4]>;

#[derive(Debug, Clone, Default)]
pub struct MaterialJudicator {
	law: MaterialLaw,
}

impl MaterialJudicator {
	/// Variants are normalized to sorted, de-duplicated sets.
	pub fn compile(law: &MaterialLaw) -> Self {
		let mut law = law.clone();
		for shader in &mut law.shaders {
			for variant in &mut shader.variants {
				variant.sort();
				variant.dedup();
			}
		}
		Self { law }
	}

	pub fn law(&self) -> &MaterialLaw {
		&self.law
	}

	pub fn adjudicate(&self, asset: &Asset) -> Findings {
		let AssetBody::Material(body) = &asset.body else {
			tracing::error!(path = %asset.path, "material judicator bound to a non-material asset");
			return Findings::unchecked();
		};

		let Some(shader) = self.law.shader(&body.shader.name) else {
			return Findings::checked(vec![Violation::unfixable(format!("Illegal Shader {}", body.shader.name))]);
		};

		let active = body.sorted_keywords();
		if shader.variants.contains(&active) {
			return Findings::checked(Vec::new());
		}

		Findings::checked(
			closest_variant(shader, body)
				.into_iter()
				.map(|diff| self.violation(&asset.name, diff))
				.collect(),
		)
	}

	fn violation(&self, name: &str, diff: KeywordDiff) -> Violation {
		let message = format!("{} {} on {name}", diff.class, diff.keyword);
		match diff.class {
			KeywordClass::Missing if self.law.placeholder(&diff.keyword).is_some() => {
				Violation::fixable(message, Remedy::AssignPlaceholder { keyword: diff.keyword })
			}
			KeywordClass::Missing => Violation::unfixable(message),
			class => Violation::fixable(message, Remedy::StripKeyword { keyword: diff.keyword, class }),
		}
	}

	/// Assigns the placeholder texture bound to `keyword` and activates it.
	pub fn assign_placeholder(&self, asset: &mut Asset, keyword: &str) -> Result<String, RemedyError> {
		let placeholder = self
			.law
			.placeholder(keyword)
			.ok_or_else(|| RemedyError::PlaceholderMissing(keyword.to_string()))?;
		let body = material_body(asset)?;
		body.textures
			.insert(placeholder.property.clone(), Some(placeholder.texture.clone()));
		if !body.keywords.iter().any(|k| k == keyword) {
			body.keywords.push(keyword.to_string());
		}
		Ok(format!(
			"Assigned placeholder {} to {} for keyword {keyword}.",
			placeholder.texture, placeholder.property
		))
	}
}

/// Removes every occurrence of `keyword` from the active set.
pub fn strip_keyword(asset: &mut Asset, keyword: &str) -> Result<String, RemedyError> {
	let body = material_body(asset)?;
	body.keywords.retain(|k| k != keyword);
	Ok(format!("Removed keyword {keyword}."))
}

fn material_body(asset: &mut Asset) -> Result<&mut MaterialBody, RemedyError> {
	match &mut asset.body {
		AssetBody::Material(body) => Ok(body),
		_ => Err(RemedyError::WrongBody { asset: asset.path.clone(), expected: "material" }),
	}
}

/// Diffs against the registered variant with the fewest differences.
/// Ties go to the earliest variant; a shader with no variants is diffed
/// against the empty set.
pub fn closest_variant(shader: &ShaderLaw, body: &MaterialBody) -> KeywordDiffs {
	let active = body.sorted_keywords();
	let empty = Vec::new();
	let mut best: Option<KeywordDiffs> = None;
	for variant in shader.variants.iter().chain(shader.variants.is_empty().then_some(&empty)) {
		let diffs = classify(variant, &active, &body.shader.keyword_space);
		if best.as_ref().is_none_or(|b| diffs.len() < b.len()) {
			best = Some(diffs);
		}
	}
	best.unwrap_or_default()
}

/// Missing keywords first in variant order, then extras in active order.
pub fn classify(variant: &[String], active: &[String], keyword_space: &[String]) -> KeywordDiffs {
	let missing = variant
		.iter()
		.filter(|k| !active.contains(k))
		.map(|k| KeywordDiff { keyword: k.clone(), class: KeywordClass::Missing });
	let extra = active.iter().filter(|k| !variant.contains(k)).map(|k| KeywordDiff {
		keyword: k.clone(),
		class: if keyword_space.contains(k) { KeywordClass::Invalid } else { KeywordClass::Illegal },
	});
	missing.chain(extra).collect()
}
