// SPDX-License-Identifier: PMPL-1.0-or-later
//! Text-direction rules.

use crate::facts::{Fact, FactCategory, FactKey, FactRegistry};
use crate::findings::{Finding, FindingSet, Severity};
use crate::rules::RuleEvaluator;

const REF_DIR: &str = "https://www.w3.org/International/questions/qa-html-dir";

/// Valid values for the `dir` attribute
const VALID_DIR: [&str; 3] = ["ltr", "rtl", "auto"];

/// Text-direction rule evaluator
pub struct DirectionRules;

impl RuleEvaluator for DirectionRules {
    fn name(&self) -> &'static str {
        "direction-rules"
    }

    fn evaluate(&self, facts: &FactRegistry, _markup: &str, findings: &mut FindingSet) {
        let dir = facts.get(FactKey::DirDefault);
        let Some(value) = dir.and_then(Fact::first_value) else {
            return;
        };

        // ERROR: incorrect value used for the dir attribute
        if !VALID_DIR.iter().any(|v| value.eq_ignore_ascii_case(v)) {
            let codes = dir
                .and_then(Fact::first_code)
                .map(str::to_string)
                .into_iter()
                .collect();
            findings.add(
                Finding::new(
                    "dir-invalid-value",
                    Severity::Error,
                    FactCategory::Direction,
                    "rep_dir_invalid",
                )
                .with_codes(codes)
                .with_remediation("rep_dir_invalid_todo")
                .with_reference(REF_DIR),
            );
        }
    }
}
