//! Plain-text reports for fixture runs.

use crate::runner::{CaseOutcome, CaseResult, FixtureReport};

/// Describe one failed case.
pub fn format_failure(fixture_name: &str, case: &CaseResult) -> String {
    let mut output = format!("FAIL: {} :: {}\n", fixture_name, case.name);
    output.push_str(&format!("  query: {}\n", case.query));
    if let CaseOutcome::Failed(mismatches) = &case.outcome {
        for mismatch in mismatches {
            output.push_str(&format!(
                "    \u{2717} {}: expected `{}`, found `{}`\n",
                mismatch.field, mismatch.expected, mismatch.actual
            ));
        }
    }
    output
}

/// One line per fixture followed by the failures, if any.
pub fn format_summary(reports: &[FixtureReport]) -> String {
    let mut output = String::new();
    let mut passed = 0;
    let mut total = 0;

    for report in reports {
        passed += report.passed();
        total += report.cases.len();
        let mark = if report.is_success() { "ok" } else { "FAILED" };
        output.push_str(&format!(
            "{:<28} {}/{} {}\n",
            report.fixture,
            report.passed(),
            report.cases.len(),
            mark
        ));
    }
    for report in reports {
        for case in report.failures() {
            output.push('\n');
            output.push_str(&format_failure(&report.fixture, case));
        }
    }
    output.push_str(&format!("\n{} of {} cases passed\n", passed, total));
    output
}
