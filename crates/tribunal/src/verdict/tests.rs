use super::*;

#[test]
fn create_opens_verdict_with_monotonic_ids() {
	let verdict = Verdict::create_or_append(
		None,
		Some("Assets/a.png"),
		"textures",
		Some(vec![Violation::unfixable("one"), Violation::unfixable("two")]),
	)
	.unwrap()
	.unwrap();
	let ids: Vec<_> = verdict.violations().iter().map(|v| v.id).collect();
	assert_eq!(ids, [ViolationId(1), ViolationId(2)]);

	let verdict = Verdict::create_or_append(Some(verdict), None, "textures", Some(vec![Violation::unfixable("three")]))
		.unwrap()
		.unwrap();
	assert_eq!(verdict.len(), 3);
	assert_eq!(verdict.violations()[2].id, ViolationId(3));
}

#[test]
fn empty_list_never_opens_verdict() {
	assert!(
		Verdict::create_or_append(None, Some("a"), "j", Some(Vec::new()))
			.unwrap()
			.is_none()
	);
}

#[test]
fn missing_subject_is_a_configuration_error() {
	let err = Verdict::create_or_append(None, None, "j", Some(vec![Violation::unfixable("x")])).unwrap_err();
	assert!(matches!(err, AggregateError::MissingSubject { .. }));
}

#[test]
fn missing_violations_hands_back_existing() {
	let mut existing = Verdict::new("a", "j");
	existing.push(Violation::unfixable("x"));
	let err = Verdict::create_or_append(Some(existing.clone()), Some("a"), "j", None).unwrap_err();
	assert_eq!(err.into_existing(), Some(existing));
}

#[test]
fn ids_are_not_reused_after_removal() {
	let mut verdict = Verdict::new("a", "j");
	let first = verdict.push(Violation::unfixable("x"));
	assert!(verdict.remove(first).is_some());
	assert!(verdict.is_resolved());
	let second = verdict.push(Violation::unfixable("y"));
	assert_ne!(first, second);
	assert!(verdict.remove(first).is_none());
}

#[test]
fn surfaced_drops_empty_verdicts() {
	assert!(Verdict::new("a", "j").surfaced().is_none());
	let mut verdict = Verdict::new("a", "j");
	verdict.push(Violation::fixable("x", Remedy::None));
	assert_eq!(verdict.clone().surfaced(), Some(verdict.clone()));
	assert_eq!(verdict.fixable_ids(), [ViolationId(1)]);
}
