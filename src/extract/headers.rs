// SPDX-License-Identifier: PMPL-1.0-or-later
//! Client request-header extractor: Accept-Language and Accept-Charset.

use crate::extract::{ExtractContext, Extractor};
use crate::facts::{Fact, FactKey, FactRegistry, Reason};
use crate::transport::parse_header;

/// Records the client's Accept-Language and Accept-Charset preferences as
/// ordered token lists; charset tokens are case-normalized to upper case.
pub struct AcceptHeaders;

impl Extractor for AcceptHeaders {
    fn name(&self) -> &'static str {
        "accept-headers"
    }

    fn extract(&self, cx: &ExtractContext<'_>, facts: &mut FactRegistry) {
        facts.insert(header_fact(
            FactKey::AcceptLanguage,
            "Accept-Language",
            cx.transport.accept_language.as_deref(),
            false,
        ));
        facts.insert(header_fact(
            FactKey::AcceptCharset,
            "Accept-Charset",
            cx.transport.accept_charset.as_deref(),
            true,
        ));
    }
}

fn header_fact(key: FactKey, header: &str, raw: Option<&str>, uppercase: bool) -> Fact {
    match raw {
        Some(raw) => {
            let mut tokens = parse_header(raw);
            if uppercase {
                tokens = tokens.into_iter().map(|t| t.to_uppercase()).collect();
            }
            let code = format!("{}: {}", header, raw);
            if tokens.is_empty() {
                Fact::new(key)
                    .with_record(Some(code), vec![])
                    .with_reason(Reason::NoRecognizedValue)
            } else {
                Fact::new(key).with_record(Some(code), tokens)
            }
        }
        None => Fact::new(key).with_reason(Reason::SourceMissing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::transport::Transport;

    fn run(transport: Transport) -> FactRegistry {
        let doc = Document::parse("<!DOCTYPE html><html></html>".to_string(), &transport).unwrap();
        let cx = ExtractContext { doc: &doc, transport: &transport };
        let mut facts = FactRegistry::new();
        AcceptHeaders.extract(&cx, &mut facts);
        facts
    }

    #[test]
    fn test_accept_language_ordered_tokens() {
        let facts = run(
            Transport::new()
                .with_content_type("text/html")
                .with_accept_language("en-US,en;q=0.9,nl;q=0.8"),
        );
        let fact = facts.get(FactKey::AcceptLanguage).unwrap();
        assert_eq!(fact.values(), vec!["en-US", "en", "nl"]);
        assert_eq!(fact.first_code(), Some("Accept-Language: en-US,en;q=0.9,nl;q=0.8"));
    }

    #[test]
    fn test_accept_charset_uppercased() {
        let facts = run(
            Transport::new()
                .with_content_type("text/html")
                .with_accept_charset("utf-8,iso-8859-1;q=0.5"),
        );
        let fact = facts.get(FactKey::AcceptCharset).unwrap();
        assert_eq!(fact.values(), vec!["UTF-8", "ISO-8859-1"]);
    }

    #[test]
    fn test_absent_headers() {
        let facts = run(Transport::new().with_content_type("text/html"));
        assert_eq!(
            facts.get(FactKey::AcceptLanguage).unwrap().reason,
            Some(Reason::SourceMissing)
        );
        assert_eq!(
            facts.get(FactKey::AcceptCharset).unwrap().reason,
            Some(Reason::SourceMissing)
        );
    }
}
