use lex_primitives::SourceKind;
use pretty_assertions::assert_eq;

use super::load::{LOCAL_FILE, load_from_dir};
use super::*;
use crate::judicator::{MatchPolicy, QualityProfile};

const SAMPLE: &str = r#"
[[binding]]
object_type = "Texture2D"
source_kind = "TextureImporter"
judicator = "textures"

[[binding]]
object_type = "SceneAsset"
source_kind = "AssetImporter"
judicator = "scenes"
enabled = false

[presets.texture_default]
modifications = [
	{ path = "m_MaxTextureSize", value = "2048" },
	{ path = "m_IsReadable", value = "0" },
]

[judicators.textures]
kind = "preset"
presets = ["texture_default", "missing"]
ignore = ["m_FileIDToRecycleName"]
policy = "closest"

[judicators.scenes]
kind = "scene"

[[judicators.scenes.profiles]]
quality_level = "Mobile"
max_draw_calls = 120
"#;

#[test]
fn parses_sample_document() {
	let lex = Lex::from_toml_str(SAMPLE).unwrap();
	assert_eq!(lex.bindings.len(), 2);
	assert!(lex.bindings[0].enabled);
	assert!(!lex.bindings[1].enabled);

	let Some(JudicatorConfig::Preset(rules)) = lex.judicators.get("textures") else {
		panic!("textures should be a preset judicator");
	};
	assert_eq!(rules.precision, 4);
	assert_eq!(rules.policy, MatchPolicy::Closest);
	assert!(rules.is_ignored("m_FileIDToRecycleName"));

	let Some(JudicatorConfig::Scene(standards)) = lex.judicators.get("scenes") else {
		panic!("scenes should be a scene judicator");
	};
	assert_eq!(
		standards.profiles[0],
		QualityProfile { quality_level: "Mobile".into(), max_draw_calls: 120, ..QualityProfile::default() }
	);
}

#[test]
fn unknown_presets_resolve_to_none() {
	let lex = Lex::from_toml_str(SAMPLE).unwrap();
	let rules = lex.judicators["textures"].preset_rules().unwrap();
	let resolved = lex.resolve_presets(rules);
	assert_eq!(resolved.len(), 2);
	assert_eq!(resolved[0].map(|n| n.name), Some("texture_default"));
	assert_eq!(resolved[0].unwrap().spec.get("m_IsReadable"), Some("0"));
	assert!(resolved[1].is_none());
}

#[test]
fn duplicate_bindings_are_rejected() {
	let doc = r#"
[[binding]]
object_type = "Material"
source_kind = "AssetImporter"

[[binding]]
object_type = "Material"
source_kind = "AssetImporter"
judicator = "materials"
"#;
	let err = Lex::from_toml_str(doc).unwrap_err();
	assert!(matches!(err, ConfigError::DuplicateBinding(ref key) if key.object_type == "Material"));
}

#[test]
fn excessive_precision_is_rejected() {
	let doc = "[judicators.t]\nkind = \"preset\"\nprecision = 40\n";
	assert!(matches!(Lex::from_toml_str(doc), Err(ConfigError::Precision { precision: 40, .. })));
}

#[test]
fn save_and_load_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("lex.toml");
	let lex = Lex::from_toml_str(SAMPLE).unwrap();
	lex.save(&path).unwrap();
	assert_eq!(Lex::load(&path).unwrap(), lex);
	assert!(!path.with_extension("toml.tmp").exists());
}

#[test]
fn local_layer_overrides_base() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::write(dir.path().join("lex.toml"), SAMPLE).unwrap();
	std::fs::write(
		dir.path().join(LOCAL_FILE),
		"[[binding]]\nobject_type = \"SceneAsset\"\nsource_kind = \"AssetImporter\"\njudicator = \"scenes\"\n",
	)
	.unwrap();

	let lex = load_from_dir(dir.path()).into_result().unwrap().unwrap();
	assert_eq!(lex.bindings.len(), 2);
	let scene = lex.binding_table().unwrap();
	assert!(scene.lookup("SceneAsset", SourceKind::AssetImporter).unwrap().enabled);
}

#[test]
fn empty_directory_loads_nothing() {
	let dir = tempfile::tempdir().unwrap();
	let report = load_from_dir(dir.path());
	assert!(report.config.is_none());
	assert!(report.errors.is_empty());
}

#[test]
fn broken_layer_is_reported() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::write(dir.path().join("lex.toml"), "[[binding]\n").unwrap();
	let report = load_from_dir(dir.path());
	assert_eq!(report.errors.len(), 1);
	assert!(report.into_result().is_err());
}
