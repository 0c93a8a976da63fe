use crate::{PropertyValue, Vec2};

#[test]
fn non_finite_values_survive_json() {
	for value in [f64::INFINITY, f64::NEG_INFINITY, 1.5, -0.25] {
		let json = serde_json::to_string(&PropertyValue::Float(value)).unwrap();
		assert_eq!(serde_json::from_str::<PropertyValue>(&json).unwrap(), PropertyValue::Float(value));
	}

	let json = serde_json::to_string(&PropertyValue::Float(f64::NAN)).unwrap();
	assert_eq!(json, r#"{"type":"float","value":"NaN"}"#);
	let Ok(PropertyValue::Float(nan)) = serde_json::from_str::<PropertyValue>(&json) else {
		panic!("NaN did not round trip");
	};
	assert!(nan.is_nan());
}

#[test]
fn single_precision_fields_keep_their_text() {
	let uv = Vec2::new(0.1, f32::NEG_INFINITY);
	let json = serde_json::to_string(&uv).unwrap();
	assert_eq!(json, r#"{"x":0.1,"y":"-Infinity"}"#);
	assert_eq!(serde_json::from_str::<Vec2>(&json).unwrap(), uv);
}

#[test]
fn integers_and_invariant_text_are_accepted() {
	assert_eq!(serde_json::from_str::<Vec2>(r#"{"x":2,"y":"Infinity"}"#).unwrap(), Vec2::new(2.0, f32::INFINITY));
	assert!(serde_json::from_str::<Vec2>(r#"{"x":"1,5","y":0}"#).is_err());
}
