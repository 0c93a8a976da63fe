use super::{Bounds, Color, ColorParseError, Vec2, Vec3};

#[test]
fn perpendicular_is_orthogonal() {
	let v = Vec2::new(3.0, -2.0);
	assert_eq!(v.dot(v.perpendicular()), 0.0);
}

#[test]
fn cross_sign_follows_winding() {
	let a = Vec2::new(1.0, 0.0);
	let b = Vec2::new(0.0, 1.0);
	assert!(a.cross(b) > 0.0);
	assert!(b.cross(a) < 0.0);
}

#[test]
fn html_color_accepts_short_and_long_forms() {
	assert_eq!(Color::from_html("#fff").unwrap(), Color::new(1.0, 1.0, 1.0, 1.0));
	assert_eq!(Color::from_html("#FF000080").unwrap().a, 128.0 / 255.0);
	assert_eq!(Color::from_html(" #00ff00 ").unwrap(), Color::new(0.0, 1.0, 0.0, 1.0));
}

#[test]
fn html_color_rejects_garbage() {
	assert!(matches!(Color::from_html("fff"), Err(ColorParseError::MissingHash(_))));
	assert!(matches!(Color::from_html("#ff"), Err(ColorParseError::Length(_))));
	assert!(matches!(Color::from_html("#gggggg"), Err(ColorParseError::Digit(_))));
}

#[test]
fn canonical_forms_are_stable() {
	assert_eq!(Vec2::new(0.5, 1.0).to_string(), "(0.50, 1.00)");
	assert_eq!(Color::default().to_string(), "RGBA(0.000, 0.000, 0.000, 1.000)");
	let bounds = Bounds::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
	assert_eq!(bounds.to_string(), "Center: (0.00, 0.00, 0.00), Extents: (1.00, 2.00, 3.00)");
}

#[test]
fn origin_check_is_exact() {
	assert!(Vec3::ZERO.is_zero());
	assert!(!Vec3::new(0.0, 1e-7, 0.0).is_zero());
}
