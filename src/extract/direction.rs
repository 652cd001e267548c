// SPDX-License-Identifier: PMPL-1.0-or-later
//! Text-direction extractor.

use crate::extract::{ExtractContext, Extractor};
use crate::facts::{Fact, FactKey, FactRegistry, Reason};

/// Default text direction from the root tag's `dir` attribute.
///
/// When the attribute is absent the fact stays absent; the `ltr` default
/// is applied at read time via `FactRegistry::resolved_direction`, never
/// substituted into the gathered value.
pub struct DirAttr;

impl Extractor for DirAttr {
    fn name(&self) -> &'static str {
        "dir-attr"
    }

    fn extract(&self, cx: &ExtractContext<'_>, facts: &mut FactRegistry) {
        let code = cx.doc.html_tag();
        let value = cx.doc.dir_from_html();

        let fact = match (code, value) {
            (Some(code), Some(value)) => {
                Fact::new(FactKey::DirDefault).with_record(Some(code), vec![value])
            }
            (Some(code), None) => Fact::new(FactKey::DirDefault)
                .with_record(Some(code), vec![])
                .with_reason(Reason::NoRecognizedValue),
            (None, _) => Fact::new(FactKey::DirDefault).with_reason(Reason::NoRootTag),
        };
        facts.insert(fact);
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
        DirAttr.extract(&cx, &mut facts);
        facts
    }

    #[test]
    fn test_dir_declared() {
        let facts = run("<!DOCTYPE html><html dir=\"rtl\"></html>");
        assert_eq!(facts.values(FactKey::DirDefault), vec!["rtl"]);
        assert_eq!(facts.resolved_direction(), "rtl");
    }

    #[test]
    fn test_dir_absent_stays_absent_with_default_at_read_time() {
        let facts = run("<!DOCTYPE html><html lang=\"en\"></html>");
        let fact = facts.get(FactKey::DirDefault).unwrap();
        assert!(!fact.has_values());
        assert_eq!(fact.reason, Some(Reason::NoRecognizedValue));
        assert_eq!(facts.resolved_direction(), "ltr");
    }
}
