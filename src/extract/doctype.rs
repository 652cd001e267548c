// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document-family and MIME-type extractor.

use crate::extract::{ExtractContext, Extractor};
use crate::facts::{Fact, FactKey, FactRegistry};

/// Records the family classification and the transport MIME type.
///
/// Both facts are unconditional; the mimetype value may legitimately be
/// empty when the transport layer reported no Content-Type.
pub struct DoctypeMime;

impl Extractor for DoctypeMime {
    fn name(&self) -> &'static str {
        "doctype-mime"
    }

    fn extract(&self, cx: &ExtractContext<'_>, facts: &mut FactRegistry) {
        facts.insert(
            Fact::new(FactKey::Doctype).with_record(None, vec![cx.doc.family().as_str().to_string()]),
        );

        let mimetype = cx
            .doc
            .mimetype_from_http()
            .map(|m| vec![m.to_string()])
            .unwrap_or_default();
        facts.insert(Fact::new(FactKey::Mimetype).with_record(None, mimetype));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::transport::Transport;

    #[test]
    fn test_family_and_mimetype_facts() {
        let transport = Transport::new().with_content_type("text/html; charset=utf-8");
        let doc = Document::parse("<!DOCTYPE html><html></html>".to_string(), &transport).unwrap();
        let cx = ExtractContext { doc: &doc, transport: &transport };
        let mut facts = FactRegistry::new();
        DoctypeMime.extract(&cx, &mut facts);

        assert_eq!(facts.values(FactKey::Doctype), vec!["HTML5"]);
        assert_eq!(facts.values(FactKey::Mimetype), vec!["text/html"]);
    }

    #[test]
    fn test_mimetype_may_be_empty_without_reason() {
        let transport = Transport::new();
        let doc = Document::parse("<!DOCTYPE html><html></html>".to_string(), &transport).unwrap();
        let cx = ExtractContext { doc: &doc, transport: &transport };
        let mut facts = FactRegistry::new();
        DoctypeMime.extract(&cx, &mut facts);

        let fact = facts.get(FactKey::Mimetype).unwrap();
        assert!(!fact.has_values());
        assert_eq!(fact.reason, None);
    }
}
