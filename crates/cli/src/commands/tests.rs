use std::fs;
use std::path::PathBuf;

use lex_law::JudicatorConfig;
use lex_primitives::PropertyValue;
use pretty_assertions::assert_eq;

use super::*;

const LAW: &str = r#"
[[binding]]
object_type = "Texture2D"
source_kind = "TextureImporter"
judicator = "textures"

[presets.texture_default]
modifications = [{ path = "m_MaxTextureSize", value = "2048" }]

[judicators.textures]
kind = "preset"
presets = ["texture_default"]
"#;

const CORPUS: &str = r#"{
	"assets": [
		{
			"path": "Assets/rock.png",
			"name": "rock",
			"object_type": "Texture2D",
			"source_kind": "TextureImporter",
			"settings": { "m_MaxTextureSize": { "type": "integer", "value": 4096 } }
		},
		{
			"path": "Assets/rock.mat",
			"name": "rock",
			"object_type": "Material",
			"source_kind": "AssetImporter",
			"body": {
				"kind": "material",
				"shader": { "name": "Lit", "keyword_space": ["_EMISSION", "_NORMALMAP"] },
				"keywords": ["_NORMALMAP"]
			}
		}
	],
	"dependencies": { "Assets/rock.mat": ["Assets/rock.png"] }
}"#;

struct Workspace {
	_dir: tempfile::TempDir,
	config: PathBuf,
	corpus: PathBuf,
}

fn workspace() -> Workspace {
	let dir = tempfile::tempdir().unwrap();
	fs::write(dir.path().join("lex.toml"), LAW).unwrap();
	let corpus = dir.path().join("corpus.json");
	fs::write(&corpus, CORPUS).unwrap();
	Workspace { config: dir.path().to_path_buf(), corpus, _dir: dir }
}

fn target(ws: &Workspace) -> Target {
	Target { corpus: ws.corpus.clone(), paths: Vec::new() }
}

#[test]
fn judge_reports_violations() {
	let ws = workspace();
	assert!(!judge(&ws.config, &target(&ws), None, false).unwrap());
}

#[test]
fn fix_saves_remediated_corpus() {
	let ws = workspace();
	assert!(fix(&ws.config, &target(&ws), false).unwrap());

	let db = MemoryDatabase::load(&ws.corpus).unwrap();
	assert_eq!(
		db.asset("Assets/rock.png").unwrap().settings.get("m_MaxTextureSize"),
		Some(&PropertyValue::Integer(2048))
	);
	assert!(judge(&ws.config, &target(&ws), None, false).unwrap());
}

#[test]
fn dry_run_leaves_corpus_untouched() {
	let ws = workspace();
	fix(&ws.config, &target(&ws), true).unwrap();
	assert_eq!(fs::read_to_string(&ws.corpus).unwrap(), CORPUS);
}

#[test]
fn cached_pass_is_skipped() {
	let ws = workspace();
	let cache = ws.config.join("cache/verdicts.bin");
	let target = Target { corpus: ws.corpus.clone(), paths: vec!["Assets/rock.mat".into()] };

	judge(&ws.config, &target, Some(&cache), false).unwrap();
	assert!(cache.exists());
	let cache = VerdictCache::open(&cache).unwrap();
	assert_eq!(cache.len(), 1);
}

#[test]
fn bind_appends_unbound_entry_once() {
	let ws = workspace();
	bind(&ws.config, "AudioClip", SourceKind::AudioImporter).unwrap();
	bind(&ws.config, "AudioClip", SourceKind::AudioImporter).unwrap();

	let lex = load_lex(&ws.config).unwrap();
	assert_eq!(lex.bindings.len(), 2);
	assert_eq!(lex.bindings[1].judicator, None);
}

#[test]
fn legislate_records_material_variant() {
	let ws = workspace();
	legislate(&ws.config, &ws.corpus, "Assets/rock.mat", false).unwrap();
	let lex = load_lex(&ws.config).unwrap();
	let Some(JudicatorConfig::Material(law)) = lex.judicators.get("materials") else {
		panic!("material judicator not created");
	};
	assert_eq!(law.shader("Lit").unwrap().variants, [vec!["_NORMALMAP".to_string()]]);

	legislate(&ws.config, &ws.corpus, "Assets/rock.mat", true).unwrap();
	let lex = load_lex(&ws.config).unwrap();
	let Some(JudicatorConfig::Material(law)) = lex.judicators.get("materials") else {
		panic!("material judicator missing");
	};
	assert_eq!(law.shader("Lit").unwrap().variants.len(), 4);
}

#[test]
fn legislate_rejects_non_materials() {
	let ws = workspace();
	let error = legislate(&ws.config, &ws.corpus, "Assets/rock.png", false).unwrap_err();
	assert_eq!(error.to_string(), "Assets/rock.png is not a material");
}

#[test]
fn missing_law_is_an_error() {
	let dir = tempfile::tempdir().unwrap();
	assert!(load_lex(dir.path()).is_err());
}
