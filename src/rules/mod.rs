// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report engine: rule evaluators over the fact registry.
//!
//! Evaluators share one read-only contract: facts (and the normalized
//! document text) in, findings out. They never touch the document adapter
//! directly, so each can be tested with synthetic facts. Evaluation order
//! determines finding order.

pub mod charset;
pub mod direction;
pub mod language;

use crate::facts::FactRegistry;
use crate::findings::FindingSet;
use tracing::debug;

/// Trait implemented by all rule evaluators
pub trait RuleEvaluator {
    /// Human-readable name of this evaluator
    fn name(&self) -> &'static str;

    /// Read facts and the normalized markup text, emit findings
    fn evaluate(&self, facts: &FactRegistry, markup: &str, findings: &mut FindingSet);
}

/// Run the full evaluator set in its canonical order.
///
/// New evaluators slot in here without touching the existing ones or the
/// fact registry.
pub fn evaluate_all(facts: &FactRegistry, markup: &str) -> FindingSet {
    let evaluators: Vec<Box<dyn RuleEvaluator>> = vec![
        Box::new(charset::CharsetRules),
        Box::new(language::LanguageRules),
        Box::new(direction::DirectionRules),
    ];

    let mut findings = FindingSet::new();
    for evaluator in &evaluators {
        debug!("running rule evaluator: {}", evaluator.name());
        evaluator.evaluate(facts, markup, &mut findings);
    }
    findings
}
