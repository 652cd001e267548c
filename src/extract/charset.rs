// SPDX-License-Identifier: PMPL-1.0-or-later
//! Charset extractors: HTTP header, XML declaration, meta tags.
//!
//! Each source classifies into one of three presentation states: value
//! found (code and value recorded), source present but no recognizable
//! charset token, or source entirely absent.

use crate::extract::{ExtractContext, Extractor};
use crate::facts::{Fact, FactKey, FactRegistry, Reason, SourceRecord};

/// Charset from the Content-Type response header.
pub struct HttpCharset;

impl Extractor for HttpCharset {
    fn name(&self) -> &'static str {
        "charset-http"
    }

    fn extract(&self, cx: &ExtractContext<'_>, facts: &mut FactRegistry) {
        let code = cx
            .transport
            .content_type
            .as_deref()
            .map(|ct| format!("Content-Type: {}", ct));
        let value = cx.doc.charset_from_http();

        let fact = match (code, value) {
            (Some(code), Some(value)) => {
                Fact::new(FactKey::CharsetHttp).with_record(Some(code), vec![value])
            }
            (Some(code), None) => Fact::new(FactKey::CharsetHttp)
                .with_record(Some(code), vec![])
                .with_reason(Reason::NoRecognizedValue),
            (None, _) => Fact::new(FactKey::CharsetHttp).with_reason(Reason::SourceMissing),
        };
        facts.insert(fact);
    }
}

/// Charset from the XML declaration's encoding pseudo-attribute.
///
/// Only runs when the document is XML or served as `application/xhtml+xml`.
pub struct XmlDeclarationCharset;

impl Extractor for XmlDeclarationCharset {
    fn name(&self) -> &'static str {
        "charset-xml-declaration"
    }

    fn extract(&self, cx: &ExtractContext<'_>, facts: &mut FactRegistry) {
        let served_xhtml = cx
            .doc
            .mimetype_from_http()
            .is_some_and(|m| m.eq_ignore_ascii_case("application/xhtml+xml"));
        if !cx.doc.is_xml() && !served_xhtml {
            return;
        }

        let code = cx.doc.xml_declaration();
        let value = cx.doc.charset_from_xml();

        let fact = match (code, value) {
            (Some(code), Some(value)) => {
                Fact::new(FactKey::CharsetXml).with_record(Some(code), vec![value])
            }
            (Some(code), None) => Fact::new(FactKey::CharsetXml)
                .with_record(Some(code), vec![])
                .with_reason(Reason::NoRecognizedValue),
            (None, _) => Fact::new(FactKey::CharsetXml).with_reason(Reason::SourceMissing),
        };
        facts.insert(fact);
    }
}

/// Charset from meta declarations.
///
/// HTML5/XHTML5 documents record under a distinct key; either form may
/// occur several times, which drives the "multiple meta declarations"
/// finding downstream.
pub struct MetaCharset;

impl Extractor for MetaCharset {
    fn name(&self) -> &'static str {
        "charset-meta"
    }

    fn extract(&self, cx: &ExtractContext<'_>, facts: &mut FactRegistry) {
        let key = if cx.doc.is_html5() || cx.doc.is_xhtml5() {
            FactKey::CharsetMetaHtml5
        } else {
            FactKey::CharsetMeta
        };

        let records: Vec<SourceRecord> = cx
            .doc
            .charsets_from_html()
            .into_iter()
            .map(|(code, value)| SourceRecord::new(Some(code), value.into_iter().collect()))
            .collect();

        let mut fact = Fact::new(key);
        if records.is_empty() {
            fact = fact.with_reason(Reason::SourceMissing);
        } else if records.iter().all(|r| r.values.is_empty()) {
            fact = fact.with_records(records).with_reason(Reason::NoRecognizedValue);
        } else {
            fact = fact.with_records(records);
        }
        facts.insert(fact);
    }
}
