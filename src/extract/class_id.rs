// SPDX-License-Identifier: PMPL-1.0-or-later
//! Identifier normalization audit: non-ASCII and non-NFC class/id values.
//!
//! Two-stage filter over immutable snapshots: first keep only tokens with
//! at least one non-ASCII code point, then, among those survivors, keep the
//! records whose concatenated tokens are not NFC-normalized. ASCII text is
//! trivially NFC, so normalization is never computed for unflagged nodes.

use crate::extract::{ExtractContext, Extractor};
use crate::facts::{Fact, FactKey, FactRegistry, Reason, SourceRecord};
use unicode_normalization::is_nfc;

/// Flags class/id attribute values that are not ASCII-only, and the subset
/// of those that is not in Normalization Form C.
pub struct ClassIdAudit;

impl Extractor for ClassIdAudit {
    fn name(&self) -> &'static str {
        "class-id-audit"
    }

    fn extract(&self, cx: &ExtractContext<'_>, facts: &mut FactRegistry) {
        let mut nodes: Vec<SourceRecord> = Vec::new();
        for (code, tokens) in cx.doc.nodes_with_class() {
            nodes.push(SourceRecord::new(Some(code), tokens));
        }
        for (code, tokens) in cx.doc.nodes_with_id() {
            nodes.push(SourceRecord::new(Some(code), tokens));
        }

        let non_ascii: Vec<SourceRecord> = nodes
            .into_iter()
            .filter_map(|record| {
                let tokens: Vec<String> = record
                    .values
                    .into_iter()
                    .filter(|t| t.chars().any(|c| c < '\u{20}' || c > '\u{7e}'))
                    .collect();
                (!tokens.is_empty()).then(|| SourceRecord::new(record.code, tokens))
            })
            .collect();

        facts.insert(audit_fact(FactKey::ClassIdNonAscii, non_ascii.clone()));

        let non_nfc: Vec<SourceRecord> = non_ascii
            .into_iter()
            .filter(|record| !is_nfc(&record.values.concat()))
            .collect();

        facts.insert(audit_fact(FactKey::ClassIdNonNfc, non_nfc));
    }
}

fn audit_fact(key: FactKey, records: Vec<SourceRecord>) -> Fact {
    if records.is_empty() {
        Fact::new(key).with_reason(Reason::NothingFlagged)
    } else {
        Fact::new(key).with_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::transport::Transport;

    fn run(markup: &str) -> FactRegistry {
        let transport = Transport::new().with_content_type("text/html");
        let doc = Document::parse(markup.to_string(), &transport).unwrap();
        let cx = ExtractContext { doc: &doc, transport: &transport };
        let mut facts = FactRegistry::new();
        ClassIdAudit.extract(&cx, &mut facts);
        facts
    }

    #[test]
    fn test_ascii_identifiers_excluded_entirely() {
        let facts = run(
            "<!DOCTYPE html><html><body><p class=\"button primary\" id=\"main\">x</p></body></html>",
        );
        assert_eq!(
            facts.get(FactKey::ClassIdNonAscii).unwrap().reason,
            Some(Reason::NothingFlagged)
        );
        assert_eq!(
            facts.get(FactKey::ClassIdNonNfc).unwrap().reason,
            Some(Reason::NothingFlagged)
        );
    }

    #[test]
    fn test_nfc_non_ascii_flagged_once() {
        // "café" with a precomposed e-acute: non-ASCII, already NFC
        let facts = run("<!DOCTYPE html><html><body><p class=\"caf\u{e9}\">x</p></body></html>");
        let non_ascii = facts.get(FactKey::ClassIdNonAscii).unwrap();
        assert_eq!(non_ascii.values(), vec!["caf\u{e9}"]);
        assert_eq!(
            facts.get(FactKey::ClassIdNonNfc).unwrap().reason,
            Some(Reason::NothingFlagged)
        );
    }

    #[test]
    fn test_decomposed_form_flagged_by_both() {
        // "café" with a combining acute accent: non-ASCII and non-NFC
        let facts = run("<!DOCTYPE html><html><body><p class=\"cafe\u{301}\">x</p></body></html>");
        let non_ascii = facts.get(FactKey::ClassIdNonAscii).unwrap();
        assert_eq!(non_ascii.values(), vec!["cafe\u{301}"]);
        let non_nfc = facts.get(FactKey::ClassIdNonNfc).unwrap();
        assert_eq!(non_nfc.values(), vec!["cafe\u{301}"]);
    }

    #[test]
    fn test_mixed_tokens_keep_only_non_ascii() {
        let facts = run(
            "<!DOCTYPE html><html><body><p class=\"button caf\u{e9}\">x</p></body></html>",
        );
        let non_ascii = facts.get(FactKey::ClassIdNonAscii).unwrap();
        assert_eq!(non_ascii.values(), vec!["caf\u{e9}"]);
    }

    #[test]
    fn test_id_attributes_audited_too() {
        let facts = run("<!DOCTYPE html><html><body><div id=\"na\u{ef}ve\">x</div></body></html>");
        let non_ascii = facts.get(FactKey::ClassIdNonAscii).unwrap();
        assert_eq!(non_ascii.values(), vec!["na\u{ef}ve"]);
        assert!(non_ascii.first_code().unwrap().starts_with("<div"));
    }
}
