use lex_primitives::{Asset, PropertyValue, SourceKind};

use super::*;

#[test]
fn bytes_hash_is_prefixed_hex() {
	let fp = Fingerprint::of_bytes(b"abc");
	assert_eq!(
		fp.as_str(),
		"sha256:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
	);
}

#[test]
fn asset_fingerprint_tracks_content() {
	let asset = Asset::new("Assets/a.png", "Texture2D", SourceKind::TextureImporter)
		.with_settings([("m_MaxTextureSize".to_string(), PropertyValue::Integer(2048))].into_iter().collect());
	let same = asset.clone();
	let mut changed = asset.clone();
	changed.settings.set("m_MaxTextureSize", PropertyValue::Integer(1024));

	let fp = Fingerprint::of_asset(&asset).unwrap();
	assert_eq!(fp, Fingerprint::of_asset(&same).unwrap());
	assert_ne!(fp, Fingerprint::of_asset(&changed).unwrap());
}

#[test]
fn file_fingerprint_matches_bytes() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("a.bin");
	std::fs::write(&path, b"abc").unwrap();
	assert_eq!(Fingerprint::of_file(&path).unwrap(), Fingerprint::of_bytes(b"abc"));
}

#[test]
fn non_finite_floats_hash_apart() {
	let with = |value: f64| {
		let asset = Asset::new("Assets/m.mat", "Material", SourceKind::AssetImporter)
			.with_settings([("_Cutoff".to_string(), PropertyValue::Float(value))].into_iter().collect());
		Fingerprint::of_asset(&asset).unwrap()
	};
	let fingerprints = [with(f64::INFINITY), with(f64::NEG_INFINITY), with(f64::NAN), with(0.0)];
	for (i, a) in fingerprints.iter().enumerate() {
		for b in &fingerprints[i + 1..] {
			assert_ne!(a, b);
		}
	}
	assert_eq!(with(f64::NAN), with(f64::NAN));
}
