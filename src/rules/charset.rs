// SPDX-License-Identifier: PMPL-1.0-or-later
//! Charset consistency rules.
//!
//! A fixed sequence over the charset facts. Rule 1 short-circuits the rest;
//! rules 2-7 are independent and several findings normally co-occur.

use crate::facts::{Fact, FactCategory, FactKey, FactRegistry};
use crate::findings::{Finding, FindingSet, Severity};
use crate::rules::RuleEvaluator;
use std::collections::BTreeSet;
use tracing::debug;

const REF_DECLARATIONS: &str =
    "https://www.w3.org/International/questions/qa-html-encoding-declarations";
const REF_CHOOSING: &str = "https://www.w3.org/International/questions/qa-choosing-encodings";
const REF_CHANGING: &str = "https://www.w3.org/International/questions/qa-changing-encoding";
const REF_BOM: &str = "https://www.w3.org/International/questions/qa-byte-order-mark";

/// The UTF-8 BOM bytes mis-decoded as Latin-1
const BOM_MOJIBAKE: &str = "\u{ef}\u{bb}\u{bf}";

/// All charset declaration sources, in report order. Meta declarations
/// count toward the union whichever key the document family routed them to.
const CHARSET_KEYS: [FactKey; 5] = [
    FactKey::CharsetHttp,
    FactKey::CharsetBom,
    FactKey::CharsetXml,
    FactKey::CharsetMeta,
    FactKey::CharsetMetaHtml5,
];

const IN_DOC_KEYS: [FactKey; 4] = [
    FactKey::CharsetBom,
    FactKey::CharsetXml,
    FactKey::CharsetMeta,
    FactKey::CharsetMetaHtml5,
];

/// Charset consistency rule evaluator
pub struct CharsetRules;

impl RuleEvaluator for CharsetRules {
    fn name(&self) -> &'static str {
        "charset-rules"
    }

    fn evaluate(&self, facts: &FactRegistry, markup: &str, findings: &mut FindingSet) {
        let mut values: Vec<&str> = Vec::new();
        let mut codes: Vec<String> = Vec::new();
        let mut non_utf8_codes: Vec<String> = Vec::new();

        for key in CHARSET_KEYS {
            let Some(fact) = facts.get(key) else { continue };
            for record in fact.records.iter().filter(|r| !r.values.is_empty()) {
                values.extend(record.values.iter().map(String::as_str));
                if let Some(code) = &record.code {
                    codes.push(code.clone());
                    if !record.values.iter().any(|v| v == "UTF-8") {
                        non_utf8_codes.push(code.clone());
                    }
                }
            }
        }

        // WARNING: no character encoding information at all
        if values.is_empty() {
            debug!("no charset information found for this document");
            findings.add(
                Finding::new(
                    "charset-missing",
                    Severity::Warning,
                    FactCategory::Charset,
                    "rep_charset_none",
                )
                .with_remediation("rep_charset_none_todo")
                .with_reference(REF_DECLARATIONS),
            );
            return;
        }

        let distinct: BTreeSet<&str> = values.iter().copied().collect();

        // INFO: non-UTF-8 charset declared
        if !values.contains(&"UTF-8") || distinct.len() > 1 {
            findings.add(
                Finding::new(
                    "charset-non-utf8",
                    Severity::Info,
                    FactCategory::Charset,
                    "rep_charset_no_utf8",
                )
                .with_codes(non_utf8_codes)
                .with_remediation("rep_charset_no_utf8_todo")
                .with_reference(REF_CHOOSING),
            );
        }

        // ERROR: conflicting character encoding declarations
        if distinct.len() != 1 {
            findings.add(
                Finding::new(
                    "charset-conflict",
                    Severity::Error,
                    FactCategory::Charset,
                    "rep_charset_conflict",
                )
                .with_codes(codes)
                .with_remediation("rep_charset_conflict_todo")
                .with_reference(REF_CHANGING),
            );
        }

        // WARNING: multiple encoding declarations using the meta tag
        if let Some(meta) = meta_fact(facts) {
            if meta.records.len() > 1 {
                let meta_codes = meta
                    .records
                    .iter()
                    .filter_map(|r| r.code.clone())
                    .collect();
                findings.add(
                    Finding::new(
                        "charset-multiple-meta",
                        Severity::Warning,
                        FactCategory::Charset,
                        "rep_charset_multiple_meta",
                    )
                    .with_codes(meta_codes)
                    .with_remediation("rep_charset_multiple_meta_todo")
                    .with_reference(REF_DECLARATIONS),
                );
            }
        }

        // WARNING: UTF-8 BOM found at start of file
        if facts
            .get(FactKey::CharsetBom)
            .and_then(Fact::first_value)
            .is_some_and(|v| v == "UTF-8")
        {
            findings.add(
                Finding::new(
                    "charset-utf8-bom",
                    Severity::Warning,
                    FactCategory::Charset,
                    "rep_charset_bom_found",
                )
                .with_remediation("rep_charset_bom_found_todo")
                .with_reference(REF_BOM),
            );
        }

        // WARNING: only transport-level metadata declared the encoding
        let in_doc_declared = IN_DOC_KEYS
            .iter()
            .filter_map(|key| facts.get(*key))
            .any(Fact::has_values);
        if !in_doc_declared {
            let http_code = facts
                .get(FactKey::CharsetHttp)
                .and_then(Fact::first_code)
                .map(str::to_string)
                .into_iter()
                .collect();
            findings.add(
                Finding::new(
                    "charset-http-only",
                    Severity::Warning,
                    FactCategory::Charset,
                    "rep_charset_no_in_doc",
                )
                .with_codes(http_code)
                .with_remediation("rep_charset_no_in_doc_todo")
                .with_reference(REF_DECLARATIONS),
            );
        }

        // WARNING: literal BOM bytes inside the content
        if markup.contains(BOM_MOJIBAKE) {
            findings.add(
                Finding::new(
                    "charset-bom-in-content",
                    Severity::Warning,
                    FactCategory::Charset,
                    "rep_charset_bom_in_content",
                )
                .with_remediation("rep_charset_bom_in_content_todo")
                .with_reference(REF_BOM),
            );
        }
    }
}

/// The meta charset fact, whichever key the document family routed it to.
fn meta_fact(facts: &FactRegistry) -> Option<&Fact> {
    facts
        .get(FactKey::CharsetMeta)
        .or_else(|| facts.get(FactKey::CharsetMetaHtml5))
}
