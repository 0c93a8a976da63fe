use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use lex_primitives::{PropertyType, PropertyValue};
use pretty_assertions::assert_eq;

use super::*;
use crate::compare::Normalized;

fn props() -> PropertySet {
	PropertySet::new()
		.with("a", PropertyValue::Integer(1))
		.with("b", PropertyValue::Integer(2))
}

fn spec(pairs: &[(&str, &str)]) -> Specification {
	pairs.iter().fold(Specification::new(), |s, (p, v)| s.with(*p, *v))
}

#[test]
fn first_match_short_circuits() {
	let calls = Arc::new(AtomicUsize::new(0));
	let mut comparators = Comparators::builtin();
	let counter = Arc::clone(&calls);
	comparators.register(PropertyType::Integer, move |expected, actual, _| {
		counter.fetch_add(1, Ordering::SeqCst);
		Normalized {
			expected: expected.to_string(),
			actual: actual.as_int().map(|v| v.to_string()).unwrap_or_default(),
		}
	});

	let a = spec(&[("a", "1"), ("b", "2")]);
	let b = spec(&[("a", "9"), ("b", "9")]);
	let matcher = Matcher::new(&comparators, CompareOptions::default());
	assert_eq!(matcher.evaluate(&props(), &[Some(&a), Some(&b)]), MatchOutcome::Pass { spec: 0 });
	assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn null_entries_are_skipped() {
	let b = spec(&[("a", "1")]);
	let matcher = Matcher::new(Comparators::shared(), CompareOptions::default());
	assert_eq!(matcher.evaluate(&props(), &[None, Some(&b)]), MatchOutcome::Pass { spec: 1 });
	assert_eq!(matcher.evaluate(&props(), &[None, None]), MatchOutcome::Vacant);
	assert_eq!(matcher.evaluate(&props(), &[]), MatchOutcome::Vacant);
}

#[test]
fn union_reports_every_spec_in_order() {
	let a = spec(&[("a", "5")]);
	let b = spec(&[("a", "6"), ("b", "7")]);
	let matcher = Matcher::new(Comparators::shared(), CompareOptions::default());
	let MatchOutcome::Fail(mismatches) = matcher.evaluate(&props(), &[Some(&a), Some(&b)]) else {
		panic!("expected failure");
	};
	let summary: Vec<_> = mismatches.iter().map(|m| (m.spec, m.mismatch.path.as_str())).collect();
	assert_eq!(summary, [(0, "a"), (1, "a"), (1, "b")]);
}

#[test]
fn closest_reports_fewest_mismatches_first_wins_ties() {
	let a = spec(&[("a", "5"), ("b", "5")]);
	let b = spec(&[("a", "6")]);
	let c = spec(&[("b", "6")]);
	let matcher = Matcher::new(Comparators::shared(), CompareOptions::default()).with_policy(MatchPolicy::Closest);
	let MatchOutcome::Fail(mismatches) = matcher.evaluate(&props(), &[Some(&a), Some(&b), Some(&c)]) else {
		panic!("expected failure");
	};
	assert_eq!(mismatches.len(), 1);
	assert_eq!(mismatches[0].spec, 1);
}

#[test]
fn ignored_and_missing_paths_are_skipped() {
	let s = spec(&[("a", "5"), ("missing", "1"), ("b", "2")]);
	let ignore = vec!["a".to_string()];
	let matcher = Matcher::new(Comparators::shared(), CompareOptions::default()).ignoring(&ignore);
	assert!(matcher.evaluate(&props(), &[Some(&s)]).is_pass());
}

#[test]
fn tolerated_mismatches_do_not_fail() {
	let s = spec(&[("a", "5")]);
	let tolerate = |m: &Mismatch| m.path == "a";
	let matcher = Matcher::new(Comparators::shared(), CompareOptions::default()).tolerating(&tolerate);
	assert!(matcher.evaluate(&props(), &[Some(&s)]).is_pass());
}
