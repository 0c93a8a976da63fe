use lex_primitives::{Color, Vec3};
use proptest::prelude::*;

use super::*;

fn opts() -> CompareOptions {
	CompareOptions::default()
}

fn cmp(expected: &str, actual: PropertyValue) -> Option<Mismatch> {
	Comparators::shared().compare("p", expected, &actual, opts())
}

#[test]
fn empty_strings_use_label() {
	let mismatch = cmp("", PropertyValue::String("x".into())).unwrap();
	assert_eq!(mismatch.expected, "Empty");
	assert_eq!(mismatch.actual, "x");
	assert!(cmp("", PropertyValue::String(String::new())).is_none());
}

#[test]
fn booleans_decode_serialized_digits() {
	assert!(cmp("0", PropertyValue::Boolean(false)).is_none());
	assert!(cmp("1", PropertyValue::Boolean(true)).is_none());
	let mismatch = cmp("0", PropertyValue::Boolean(true)).unwrap();
	assert_eq!((mismatch.expected.as_str(), mismatch.actual.as_str()), ("False", "True"));
}

#[test]
fn floats_compare_at_precision() {
	assert!(cmp("0.5", PropertyValue::Float(0.500_04)).is_none());
	assert!(cmp("0.5", PropertyValue::Float(0.5002)).is_some());
	assert!(cmp("-0.00001", PropertyValue::Float(0.0)).is_none());
}

#[test]
fn comma_decimal_never_matches() {
	let mismatch = cmp("0,5", PropertyValue::Float(0.5)).unwrap();
	assert_eq!(mismatch.expected, "0,5");
	assert_eq!(mismatch.actual, "0.5000");
}

#[test]
fn references_and_enums_use_names() {
	assert!(cmp("", PropertyValue::ObjectReference(None)).is_none());
	assert!(cmp("None", PropertyValue::ObjectReference(Some(String::new()))).is_none());
	assert!(cmp("Brick", PropertyValue::ObjectReference(Some("Brick".into()))).is_none());
	assert!(cmp("Clamp", PropertyValue::Enum("Clamp".into())).is_none());
	assert!(cmp("1", PropertyValue::Enum("Clamp".into())).is_some());
}

#[test]
fn structured_values_use_display_form() {
	let color = Color::new(1.0, 0.0, 0.0, 1.0);
	assert!(cmp(&color.to_string(), PropertyValue::Color(color)).is_none());
	let v = Vec3::new(1.0, 2.0, 3.0);
	let mismatch = cmp("(1, 2, 3)", PropertyValue::Vector3(v)).unwrap();
	assert_eq!(mismatch.actual, v.to_string());
}

#[test]
fn generic_and_unregistered_use_sentinels() {
	assert_eq!(cmp("x", PropertyValue::Generic).unwrap().actual, GENERIC);

	let empty = Comparators::empty();
	let mismatch = empty.compare("p", "3", &PropertyValue::Integer(3), opts()).unwrap();
	assert_eq!(mismatch.actual, UNRECOGNIZED);
}

#[test]
fn registered_normalizer_replaces_builtin() {
	let mut comparators = Comparators::builtin();
	comparators.register(PropertyType::Integer, |_, _, _| Normalized {
		expected: "same".into(),
		actual: "same".into(),
	});
	assert!(comparators.compare("p", "1", &PropertyValue::Integer(2), opts()).is_none());
}

#[test]
fn mismatch_message_format() {
	let mismatch = cmp("2048", PropertyValue::Integer(1024)).unwrap();
	assert_eq!(mismatch.to_string(), "p : expected 2048, found 1024");
}

proptest! {
	#[test]
	fn noise_below_precision_is_ignored(whole in -10_000i32..10_000, noise in -4.0e-6f64..4.0e-6) {
		let base = f64::from(whole) / 100.0;
		let expected = format_fixed(base, 6);
		prop_assert!(cmp(&expected, PropertyValue::Float(base + noise)).is_none());
	}
}
