use super::*;

#[test]
fn name_defaults_to_file_stem() {
	let asset = Asset::new("Assets/Art/rock.fbx", "GameObject", SourceKind::ModelImporter);
	assert_eq!(asset.name, "rock");
	assert_eq!(Asset::new(".hidden", "Object", SourceKind::AssetImporter).name, ".hidden");
	assert_eq!(Asset::new("plain", "Object", SourceKind::AssetImporter).name, "plain");
}

#[test]
fn source_kind_parses_display_names() {
	for kind in SourceKind::ALL {
		assert_eq!(kind.name().parse::<SourceKind>(), Ok(kind));
	}
	assert!("FbxImporter".parse::<SourceKind>().is_err());
}

#[test]
fn hierarchy_walk_is_depth_first() {
	let root = Node::new("root")
		.with_child(Node::new("a").with_child(Node::new("a1")))
		.with_child(Node::new("b"));
	let names: Vec<_> = root.walk().map(|n| n.name.as_str()).collect();
	assert_eq!(names, ["root", "a", "a1", "b"]);
}

#[test]
fn dirty_flag_is_not_serialized() {
	let mut asset = Asset::new("Assets/m.mat", "Material", SourceKind::AssetImporter);
	asset.mark_dirty();
	let json = serde_json::to_string(&asset).unwrap();
	let back: Asset = serde_json::from_str(&json).unwrap();
	assert!(!back.is_dirty());
	assert!(asset.is_dirty());
}

#[test]
fn sorted_keywords_dedup() {
	let body = MaterialBody {
		keywords: vec!["_B".into(), "_A".into(), "_B".into()],
		..MaterialBody::default()
	};
	assert_eq!(body.sorted_keywords(), ["_A", "_B"]);
}

#[test]
fn body_deserializes_from_kind_tag() {
	let json = r#"{
		"path": "Assets/Scenes/main.unity",
		"name": "main",
		"object_type": "SceneAsset",
		"source_kind": "AssetImporter",
		"body": { "kind": "scene", "dependencies": [{ "path": "Assets/t.png", "memory_bytes": 1024 }] }
	}"#;
	let asset: Asset = serde_json::from_str(json).unwrap();
	match asset.body {
		AssetBody::Scene { dependencies } => assert_eq!(dependencies[0].memory_bytes, 1024),
		other => panic!("unexpected body: {other:?}"),
	}
}
