use lex_primitives::SourceKind;

use crate::legislate::DEFAULT_MATERIAL_JUDICATOR;
use crate::*;

fn keywords(list: &[&str]) -> Vec<String> {
	list.iter().map(|k| k.to_string()).collect()
}

#[test]
fn create_binding_appends_unbound_entry_once() {
	let mut lex = Lex::default();
	let created = lex.create_binding("Texture2D", SourceKind::TextureImporter);
	assert!(matches!(created, BindingOutcome::Created(_)));
	assert_eq!(lex.bindings[0].judicator, None);

	let again = lex.create_binding("Texture2D", SourceKind::TextureImporter);
	assert!(matches!(again, BindingOutcome::AlreadyExists(_)));
	assert_eq!(lex.bindings.len(), 1);
	assert!(again.to_string().contains("Texture2D/TextureImporter"));
}

#[test]
fn binding_table_lookup_is_keyed_on_both_parts() {
	let table = BindingTable::new(vec![
		Binding::new("GameObject", SourceKind::ModelImporter, "models"),
		Binding::new("GameObject", SourceKind::PrefabImporter, "prefabs"),
	])
	.unwrap();
	assert_eq!(
		table.lookup("GameObject", SourceKind::PrefabImporter).and_then(|b| b.judicator.as_deref()),
		Some("prefabs")
	);
	assert!(table.lookup("GameObject", SourceKind::TextureImporter).is_none());
}

#[test]
fn record_variant_creates_material_judicator() {
	let mut lex = Lex::default();
	let outcome = lex.record_variant("Lit", &keywords(&["_NORMALMAP", "_EMISSION"]));
	assert_eq!(outcome, VariantOutcome::Recorded);

	let Some(JudicatorConfig::Material(law)) = lex.judicators.get(DEFAULT_MATERIAL_JUDICATOR) else {
		panic!("material judicator should exist");
	};
	assert_eq!(law.shader("Lit").unwrap().variants, [keywords(&["_EMISSION", "_NORMALMAP"])]);
	assert_eq!(
		lex.binding_table()
			.unwrap()
			.lookup("Material", SourceKind::AssetImporter)
			.and_then(|b| b.judicator.as_deref()),
		Some(DEFAULT_MATERIAL_JUDICATOR)
	);

	assert_eq!(
		lex.record_variant("Lit", &keywords(&["_EMISSION", "_NORMALMAP"])),
		VariantOutcome::AlreadyRecorded
	);
}

#[test]
fn record_variant_uses_existing_material_binding() {
	let mut lex = Lex::default();
	lex.judicators.insert("mats".into(), JudicatorConfig::Material(MaterialLaw::default()));
	lex.bindings.push(Binding::new("Material", SourceKind::AssetImporter, "mats"));
	lex.record_variant("Unlit", &[]);
	assert_eq!(lex.judicators.len(), 1);
	let Some(JudicatorConfig::Material(law)) = lex.judicators.get("mats") else {
		panic!("mats should stay a material judicator");
	};
	assert_eq!(law.shader("Unlit").unwrap().variants, [Vec::<String>::new()]);
}

#[test]
fn created_judicator_does_not_clobber_existing_name() {
	let mut lex = Lex::default();
	lex.judicators.insert(DEFAULT_MATERIAL_JUDICATOR.into(), JudicatorConfig::Preset(PresetRules::default()));
	lex.record_variant("Lit", &[]);
	assert!(matches!(lex.judicators.get(DEFAULT_MATERIAL_JUDICATOR), Some(JudicatorConfig::Preset(_))));
	assert!(matches!(lex.judicators.get("materials_2"), Some(JudicatorConfig::Material(_))));
}

#[test]
fn permutations_record_power_set() {
	let mut lex = Lex::default();
	let recorded = lex.record_all_permutations("Lit", &keywords(&["_C", "_A", "_B", "_A"])).unwrap();
	assert_eq!(recorded, 8);

	let Some(JudicatorConfig::Material(law)) = lex.judicators.get(DEFAULT_MATERIAL_JUDICATOR) else {
		panic!("material judicator should exist");
	};
	let variants = &law.shader("Lit").unwrap().variants;
	assert!(variants.contains(&Vec::new()));
	assert!(variants.contains(&keywords(&["_A", "_C"])));
	assert!(variants.iter().all(|v| v.windows(2).all(|w| w[0] < w[1])));

	assert_eq!(lex.record_all_permutations("Lit", &keywords(&["_A", "_B"])).unwrap(), 0);
}

#[test]
fn permutations_skip_recorded_variants() {
	let mut lex = Lex::default();
	lex.record_variant("Lit", &keywords(&["_B"]));
	assert_eq!(lex.record_all_permutations("Lit", &keywords(&["_A", "_B"])).unwrap(), 3);

	let Some(JudicatorConfig::Material(law)) = lex.judicators.get(DEFAULT_MATERIAL_JUDICATOR) else {
		panic!("material judicator should exist");
	};
	assert_eq!(
		law.shader("Lit").unwrap().variants,
		[keywords(&["_B"]), Vec::new(), keywords(&["_A"]), keywords(&["_A", "_B"])]
	);
}

#[test]
fn permutations_refuse_huge_keyword_sets() {
	let mut lex = Lex::default();
	let many: Vec<String> = (0..20).map(|i| format!("_K{i}")).collect();
	assert!(matches!(lex.record_all_permutations("Lit", &many), Err(ConfigError::TooManyKeywords(20))));
}
