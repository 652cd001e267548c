// SPDX-License-Identifier: PMPL-1.0-or-later
//! Language declaration rules.
//!
//! A deliberately small set over the root-tag language facts; further
//! checks (per-tag lang/xml:lang pairing, value well-formedness) can slot
//! in as additional evaluators without touching this one.

use crate::facts::{Fact, FactCategory, FactKey, FactRegistry};
use crate::findings::{Finding, FindingSet, Severity};
use crate::rules::RuleEvaluator;

const REF_LANG: &str = "https://www.w3.org/International/questions/qa-html-language-declarations";

/// Language declaration rule evaluator
pub struct LanguageRules;

impl RuleEvaluator for LanguageRules {
    fn name(&self) -> &'static str {
        "language-rules"
    }

    fn evaluate(&self, facts: &FactRegistry, _markup: &str, findings: &mut FindingSet) {
        let lang = facts.get(FactKey::LangAttr);
        let xml_lang = facts.get(FactKey::XmlLangAttr);

        let lang_value = lang.and_then(Fact::first_value);
        let xml_lang_value = xml_lang.and_then(Fact::first_value);

        // WARNING: the root tag declares no language at all
        let root_present = lang.and_then(Fact::first_code).is_some();
        if root_present && lang_value.is_none() && xml_lang_value.is_none() {
            let codes = lang
                .and_then(Fact::first_code)
                .map(str::to_string)
                .into_iter()
                .collect();
            findings.add(
                Finding::new(
                    "lang-missing",
                    Severity::Warning,
                    FactCategory::Language,
                    "rep_lang_missing",
                )
                .with_codes(codes)
                .with_remediation("rep_lang_missing_todo")
                .with_reference(REF_LANG),
            );
        }

        // ERROR: lang and xml:lang disagree on the root tag
        if let (Some(l), Some(x)) = (lang_value, xml_lang_value) {
            if !l.eq_ignore_ascii_case(x) {
                let codes = lang
                    .and_then(Fact::first_code)
                    .map(str::to_string)
                    .into_iter()
                    .collect();
                findings.add(
                    Finding::new(
                        "lang-xmllang-mismatch",
                        Severity::Error,
                        FactCategory::Language,
                        "rep_lang_xmllang_mismatch",
                    )
                    .with_codes(codes)
                    .with_remediation("rep_lang_xmllang_mismatch_todo")
                    .with_reference(REF_LANG),
                );
            }
        }

        // WARNING: xml:lang on a document that is not XML
        let family = facts.get(FactKey::Doctype).and_then(Fact::first_value);
        let non_xml = matches!(family, Some("HTML") | Some("HTML5"));
        if non_xml && xml_lang_value.is_some() {
            let codes = xml_lang
                .and_then(Fact::first_code)
                .map(str::to_string)
                .into_iter()
                .collect();
            findings.add(
                Finding::new(
                    "lang-xmllang-in-html",
                    Severity::Warning,
                    FactCategory::Language,
                    "rep_lang_xmllang_in_html",
                )
                .with_codes(codes)
                .with_remediation("rep_lang_xmllang_in_html_todo")
                .with_reference(REF_LANG),
            );
        }
    }
}
