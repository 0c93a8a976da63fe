//! Human-readable judgment output.

use lex_tribunal::JudgmentReport;

/// Renders verdicts followed by a one-line summary.
pub fn render(report: &JudgmentReport) -> String {
	let mut out = String::new();
	for verdict in &report.verdicts {
		out.push_str(&verdict.to_string());
	}

	out.push_str(&format!(
		"{} judged, {} skipped, {} unjudged: {} violation(s) in {} asset(s)",
		report.evaluated,
		report.skipped,
		report.unjudged,
		report.violation_count(),
		report.verdicts.len()
	));
	if report.partial > 0 {
		out.push_str(&format!("; {} judged only partially", report.partial));
	}
	if !report.is_complete() {
		out.push_str(" (cancelled, results partial)");
	}
	out.push('\n');
	out
}
