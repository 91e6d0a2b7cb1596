//! Runs fixture cases through the evaluator and compares the results.

use crate::fixture::{SearchCase, SearchFixture};
use std::collections::BTreeMap;
use synsem_evaluator::Evaluator;
use synsem_query::SearchResponse;

/// One expectation that did not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed,
    Failed(Vec<Mismatch>),
}

#[derive(Debug, Clone)]
pub struct CaseResult {
    pub name: String,
    /// The parameters as a query string, for reporting.
    pub query: String,
    pub outcome: CaseOutcome,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.outcome == CaseOutcome::Passed
    }
}

/// Results of every case in one fixture.
#[derive(Debug, Clone)]
pub struct FixtureReport {
    pub fixture: String,
    pub cases: Vec<CaseResult>,
}

impl FixtureReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|case| case.passed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|case| !case.passed())
    }

    pub fn is_success(&self) -> bool {
        self.passed() == self.cases.len()
    }
}

/// Run every case of `fixture`.
pub fn run_fixture(name: &str, fixture: &SearchFixture) -> FixtureReport {
    let evaluator = fixture.evaluator();
    FixtureReport {
        fixture: name.to_string(),
        cases: fixture
            .cases
            .iter()
            .map(|case| run_case(&evaluator, case))
            .collect(),
    }
}

/// Run one case and check each expectation it states.
pub fn run_case(evaluator: &Evaluator, case: &SearchCase) -> CaseResult {
    let params = case.search_params();
    let response = evaluator.search(&params);
    let mismatches = check_response(case, &response);

    CaseResult {
        name: case.name.clone(),
        query: params.to_query_string(),
        outcome: if mismatches.is_empty() {
            CaseOutcome::Passed
        } else {
            CaseOutcome::Failed(mismatches)
        },
    }
}

fn check_response(case: &SearchCase, response: &SearchResponse) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    if let Some(expected) = &case.expect_members {
        let actual: Vec<String> = response.members().map(|m| m.id.clone()).collect();
        compare("members", expected, &actual, &mut mismatches);
    }
    if let Some(expected) = &case.expect_classes {
        let actual: Vec<String> = response.groups().map(|g| g.common_id.clone()).collect();
        compare("classes", expected, &actual, &mut mismatches);
    }
    if let Some(expected) = &case.expect_pages {
        let actual: Vec<usize> = response.pages.iter().map(Vec::len).collect();
        compare("pages", expected, &actual, &mut mismatches);
    }
    if let Some(expected) = &case.expect_lang_members {
        let actual: BTreeMap<String, usize> = response
            .lang_counts
            .iter()
            .map(|(language, count)| (language.code().to_string(), count.class_members))
            .collect();
        compare("lang_members", expected, &actual, &mut mismatches);
    }

    mismatches
}

fn compare<T>(field: &'static str, expected: &T, actual: &T, mismatches: &mut Vec<Mismatch>)
where
    T: PartialEq + std::fmt::Debug + ?Sized,
{
    if expected != actual {
        mismatches.push(Mismatch {
            field,
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        });
    }
}
