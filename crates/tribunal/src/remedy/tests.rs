use lex_primitives::{Color, Component, SourceKind};
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn parses_settings_and_component_messages() {
	assert_eq!(
		parse_expectation("m_MaxTextureSize : expected 2048, found 1024"),
		Some(Expectation { component: None, path: "m_MaxTextureSize".into(), expected: "2048".into() })
	);
	assert_eq!(
		parse_expectation("Sparks/InitialModule.maxNumParticles: expected 100, found 900"),
		Some(Expectation {
			component: Some("Sparks".into()),
			path: "InitialModule.maxNumParticles".into(),
			expected: "100".into(),
		})
	);
	assert_eq!(parse_expectation("Illegal Shader Foo"), None);
	assert_eq!(parse_expectation(" : expected 1, found 2"), None);
}

#[test]
fn set_property_parses_live_type() {
	let mut asset = Asset::new("Assets/fx.prefab", "GameObject", SourceKind::PrefabImporter).with_body(
		AssetBody::Prefab {
			components: vec![Component {
				name: "Sparks".into(),
				kind: "ParticleSystem".into(),
				properties: PropertySet::new()
					.with("lengthInSec", PropertyValue::Float(5.0))
					.with("startColor", PropertyValue::Color(Color::new(0.0, 0.0, 0.0, 1.0))),
			}],
		},
	);

	set_property(&mut asset, Some("Sparks"), "lengthInSec", "2.5").unwrap();
	set_from_message(&mut asset, "Sparks/startColor : expected #FF0000, found black").unwrap();

	let AssetBody::Prefab { components } = &asset.body else {
		unreachable!();
	};
	assert_eq!(components[0].properties.get("lengthInSec"), Some(&PropertyValue::Float(2.5)));
	assert_eq!(
		components[0].properties.get("startColor"),
		Some(&PropertyValue::Color(Color::new(1.0, 0.0, 0.0, 1.0)))
	);
}

#[test]
fn failed_parse_leaves_value_untouched() {
	let mut asset = Asset::new("Assets/a.png", "Texture2D", SourceKind::TextureImporter)
		.with_settings(PropertySet::new().with("m_MaxTextureSize", PropertyValue::Integer(1024)));
	let err = set_property(&mut asset, None, "m_MaxTextureSize", "big").unwrap_err();
	assert!(matches!(err, RemedyError::Parse { .. }));
	assert_eq!(asset.settings.get("m_MaxTextureSize"), Some(&PropertyValue::Integer(1024)));
	assert!(matches!(
		set_property(&mut asset, None, "missing", "1"),
		Err(RemedyError::PropertyMissing(_))
	));
	assert!(matches!(
		set_property(&mut asset, Some("Sparks"), "x", "1"),
		Err(RemedyError::WrongBody { .. })
	));
}

#[test]
fn status_strings() {
	let fixed: Result<Remedied, RemedyError> = Ok(Remedied::Fixed("Set x to 1.".into()));
	assert_eq!(fixed.describe(), "Set x to 1.");
	let resolved: Result<Remedied, RemedyError> = Ok(Remedied::AlreadyResolved);
	assert_eq!(resolved.describe(), "Violation already resolved.");
	let failed: Result<Remedied, RemedyError> = Err(RemedyError::PropertyMissing("x".into()));
	assert_eq!(failed.describe(), "Remediation failed: property 'x' not found");
}
