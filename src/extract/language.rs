// SPDX-License-Identifier: PMPL-1.0-or-later
//! Language extractors: root-tag attributes, HTTP header, meta tag.

use crate::extract::{ExtractContext, Extractor};
use crate::facts::{Fact, FactKey, FactRegistry, Reason, SourceRecord};

fn root_attr_fact(key: FactKey, code: Option<String>, value: Option<String>) -> Fact {
    match (code, value) {
        (Some(code), Some(value)) => Fact::new(key).with_record(Some(code), vec![value]),
        (Some(code), None) => Fact::new(key)
            .with_record(Some(code), vec![])
            .with_reason(Reason::NoRecognizedValue),
        (None, _) => Fact::new(key).with_reason(Reason::NoRootTag),
    }
}

/// Language from the root tag's `lang` attribute.
pub struct LangAttr;

impl Extractor for LangAttr {
    fn name(&self) -> &'static str {
        "lang-attr"
    }

    fn extract(&self, cx: &ExtractContext<'_>, facts: &mut FactRegistry) {
        facts.insert(root_attr_fact(
            FactKey::LangAttr,
            cx.doc.html_tag(),
            cx.doc.lang_from_html(),
        ));
    }
}

/// Language from the root tag's `xml:lang` attribute.
///
/// Recorded only when the document is XML or a value was actually found;
/// a non-XML document with no `xml:lang` produces no fact at all.
pub struct XmlLangAttr;

impl Extractor for XmlLangAttr {
    fn name(&self) -> &'static str {
        "xml-lang-attr"
    }

    fn extract(&self, cx: &ExtractContext<'_>, facts: &mut FactRegistry) {
        let value = cx.doc.xml_lang_from_html();
        if !cx.doc.is_xml() && value.is_none() {
            return;
        }
        facts.insert(root_attr_fact(FactKey::XmlLangAttr, cx.doc.html_tag(), value));
    }
}

/// Language from the Content-Language response header.
pub struct HttpContentLanguage;

impl Extractor for HttpContentLanguage {
    fn name(&self) -> &'static str {
        "lang-http"
    }

    fn extract(&self, cx: &ExtractContext<'_>, facts: &mut FactRegistry) {
        let fact = match cx.transport.content_language.as_deref() {
            Some(value) => Fact::new(FactKey::LangHttp).with_record(
                Some(format!("Content-Language: {}", value)),
                vec![value.to_string()],
            ),
            None => Fact::new(FactKey::LangHttp).with_reason(Reason::SourceMissing),
        };
        facts.insert(fact);
    }
}

/// Language from `<meta http-equiv="Content-Language">` declarations.
pub struct MetaContentLanguage;

impl Extractor for MetaContentLanguage {
    fn name(&self) -> &'static str {
        "lang-meta"
    }

    fn extract(&self, cx: &ExtractContext<'_>, facts: &mut FactRegistry) {
        let records: Vec<SourceRecord> = cx
            .doc
            .langs_from_meta()
            .into_iter()
            .map(|(code, values)| SourceRecord::new(Some(code), values))
            .collect();

        let fact = if records.is_empty() {
            Fact::new(FactKey::LangMeta).with_reason(Reason::SourceMissing)
        } else {
            Fact::new(FactKey::LangMeta).with_records(records)
        };
        facts.insert(fact);
    }
}
