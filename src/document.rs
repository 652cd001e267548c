// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document adapter over the parsed markup tree.
//!
//! Wraps `scraper::Html` and answers the typed queries the extractors need:
//! document-family flags, declared charset/lang/dir values, and node lookups
//! by attribute. Every method is a pure query over the already-parsed
//! document; extraction and reporting never touch the parser directly.

use crate::error::{Error, Result};
use crate::transport::{charset_param, Transport};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Document family classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFamily {
    /// XHTML 1.x
    Xhtml,
    /// HTML 4.x or earlier
    Html,
    /// HTML5 vocabulary served as XML
    Xhtml5,
    /// HTML5
    Html5,
    /// No recognizable doctype
    Na,
}

impl DocFamily {
    /// Stable string form used in facts
    pub fn as_str(&self) -> &'static str {
        match self {
            DocFamily::Xhtml => "XHTML",
            DocFamily::Html => "HTML",
            DocFamily::Xhtml5 => "XHTML5",
            DocFamily::Html5 => "HTML5",
            DocFamily::Na => "NA",
        }
    }
}

impl std::fmt::Display for DocFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed document plus the transport facts needed to classify it.
pub struct Document {
    markup: String,
    html: Html,
    content_type: Option<String>,
    xhtml: bool,
    legacy_html: bool,
    html5_doctype: bool,
    xml: bool,
}

impl Document {
    /// Parse the normalized markup text.
    ///
    /// Fails only when the input carries no recognizable markup at all;
    /// missing declarations are a matter for the extractors, not an error.
    pub fn parse(markup: String, transport: &Transport) -> Result<Self> {
        if !markup.contains('<') {
            return Err(Error::Parse("document contains no markup".to_string()));
        }
        let html = Html::parse_document(&markup);

        let doctype = html.tree.nodes().find_map(|node| match node.value() {
            Node::Doctype(d) => Some((
                d.name().to_string(),
                d.public_id().to_string(),
                d.system_id().to_string(),
            )),
            _ => None,
        });

        let (xhtml, legacy_html, html5_doctype) = match &doctype {
            Some((name, public_id, system_id)) => {
                let xhtml = public_id.contains("XHTML");
                let legacy = public_id.contains("HTML") && !xhtml;
                let html5 = name.eq_ignore_ascii_case("html")
                    && public_id.is_empty()
                    && (system_id.is_empty() || system_id == "about:legacy-compat");
                (xhtml, legacy, html5)
            }
            None => (false, false, false),
        };

        let mimetype = transport.mimetype().map(str::to_string);
        let xml = is_xml_mimetype(mimetype.as_deref())
            || markup
                .trim_start_matches('\u{feff}')
                .trim_start()
                .starts_with("<?xml");

        Ok(Self {
            markup,
            html,
            content_type: transport.content_type.clone(),
            xhtml,
            legacy_html,
            html5_doctype,
            xml,
        })
    }

    /// Normalized markup text this document was parsed from
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Document is XML (served with an XML MIME type or carrying an XML declaration)
    pub fn is_xml(&self) -> bool {
        self.xml
    }

    /// Document carries a legacy HTML (pre-5) doctype
    pub fn is_html(&self) -> bool {
        self.legacy_html
    }

    /// Document carries an XHTML 1.x doctype
    pub fn is_xhtml(&self) -> bool {
        self.xhtml
    }

    /// Document carries the HTML5 doctype and is not XML
    pub fn is_html5(&self) -> bool {
        self.html5_doctype && !self.xml
    }

    /// Document carries the HTML5 doctype and is XML
    pub fn is_xhtml5(&self) -> bool {
        self.html5_doctype && self.xml
    }

    /// Family classification; the first true flag wins, legacy families
    /// checked before their "5" counterparts.
    pub fn family(&self) -> DocFamily {
        if self.is_xhtml() {
            DocFamily::Xhtml
        } else if self.is_html() {
            DocFamily::Html
        } else if self.is_xhtml5() {
            DocFamily::Xhtml5
        } else if self.is_html5() {
            DocFamily::Html5
        } else {
            DocFamily::Na
        }
    }

    /// MIME type from transport metadata, without parameters
    pub fn mimetype_from_http(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
            .filter(|m| !m.is_empty())
    }

    /// Charset parameter of the Content-Type header, upper-cased
    pub fn charset_from_http(&self) -> Option<String> {
        self.content_type.as_deref().and_then(charset_param)
    }

    /// The XML declaration verbatim, if the document starts with one
    pub fn xml_declaration(&self) -> Option<String> {
        let text = self.markup.trim_start_matches('\u{feff}').trim_start();
        if !text.starts_with("<?xml") {
            return None;
        }
        let end = text.find("?>")?;
        Some(text[..end + 2].to_string())
    }

    /// Encoding pseudo-attribute of the XML declaration, upper-cased
    pub fn charset_from_xml(&self) -> Option<String> {
        let decl = self.xml_declaration()?;
        pseudo_attr(&decl, "encoding").map(|v| v.to_uppercase())
    }

    /// Meta charset declarations in document order.
    ///
    /// Covers both the HTML5 `<meta charset>` form and the legacy
    /// `<meta http-equiv="Content-Type">` form. An occurrence whose content
    /// carries no charset token is returned with a `None` value so the
    /// extractor can tell "present but unrecognizable" from "absent".
    pub fn charsets_from_html(&self) -> Vec<(String, Option<String>)> {
        let selector = Selector::parse("meta").expect("valid selector");
        let mut out = Vec::new();
        for el in self.html.select(&selector) {
            let v = el.value();
            if let Some(charset) = v.attr("charset") {
                let token = charset.trim();
                let value = (!token.is_empty()).then(|| token.to_uppercase());
                out.push((open_tag(el), value));
            } else if v
                .attr("http-equiv")
                .is_some_and(|h| h.eq_ignore_ascii_case("content-type"))
            {
                let value = v.attr("content").and_then(charset_param);
                out.push((open_tag(el), value));
            }
        }
        out
    }

    /// Serialized root-tag snippet as authored, used as an origin code
    pub fn html_tag(&self) -> Option<String> {
        let lower = self.markup.to_ascii_lowercase();
        let mut from = 0;
        while let Some(rel) = lower[from..].find("<html") {
            let start = from + rel;
            let after = lower.as_bytes().get(start + 5).copied();
            let boundary = matches!(after, None | Some(b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/'));
            if boundary {
                let end = self.markup[start..].find('>')?;
                return Some(self.markup[start..start + end + 1].to_string());
            }
            from = start + 5;
        }
        None
    }

    /// `lang` attribute of the root element
    pub fn lang_from_html(&self) -> Option<String> {
        self.root_attr("lang")
    }

    /// `xml:lang` attribute of the root element
    pub fn xml_lang_from_html(&self) -> Option<String> {
        self.root_attr("xml:lang")
    }

    /// `dir` attribute of the root element
    pub fn dir_from_html(&self) -> Option<String> {
        self.root_attr("dir")
    }

    /// `<meta http-equiv="Content-Language">` declarations in document order
    pub fn langs_from_meta(&self) -> Vec<(String, Vec<String>)> {
        let selector = Selector::parse("meta").expect("valid selector");
        self.html
            .select(&selector)
            .filter(|el| {
                el.value()
                    .attr("http-equiv")
                    .is_some_and(|h| h.eq_ignore_ascii_case("content-language"))
            })
            .map(|el| {
                let values = el
                    .value()
                    .attr("content")
                    .map(|c| {
                        c.split(',')
                            .map(str::trim)
                            .filter(|t| !t.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default();
                (open_tag(el), values)
            })
            .collect()
    }

    /// Every node carrying a `class` attribute: (origin snippet, tokens)
    pub fn nodes_with_class(&self) -> Vec<(String, Vec<String>)> {
        self.nodes_with_attr("class")
    }

    /// Every node carrying an `id` attribute: (origin snippet, tokens)
    pub fn nodes_with_id(&self) -> Vec<(String, Vec<String>)> {
        self.nodes_with_attr("id")
    }

    fn nodes_with_attr(&self, attr: &str) -> Vec<(String, Vec<String>)> {
        self.html
            .tree
            .nodes()
            .filter_map(ElementRef::wrap)
            .filter_map(|el| {
                el.value().attr(attr).map(|value| {
                    let tokens = value.split_whitespace().map(String::from).collect();
                    (open_tag(el), tokens)
                })
            })
            .collect()
    }

    fn root_attr(&self, attr: &str) -> Option<String> {
        self.html
            .root_element()
            .value()
            .attr(attr)
            .map(str::to_string)
            .filter(|v| !v.is_empty())
    }
}

fn is_xml_mimetype(mimetype: Option<&str>) -> bool {
    match mimetype {
        Some(m) => {
            m.eq_ignore_ascii_case("application/xhtml+xml")
                || m.eq_ignore_ascii_case("application/xml")
                || m.eq_ignore_ascii_case("text/xml")
                || m.to_ascii_lowercase().ends_with("+xml")
        }
        None => false,
    }
}

/// Pseudo-attribute lookup inside an XML declaration.
fn pseudo_attr(decl: &str, name: &str) -> Option<String> {
    let lower = decl.to_ascii_lowercase();
    let pos = lower.find(name)?;
    let rest = decl[pos + name.len()..].trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

/// Re-serialize an element's opening tag for display as an origin code.
fn open_tag(el: ElementRef<'_>) -> String {
    let v = el.value();
    let mut out = format!("<{}", v.name());
    for (name, value) in v.attrs() {
        out.push_str(&format!(" {}=\"{}\"", name, value));
    }
    out.push('>');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(markup: &str, content_type: Option<&str>) -> Document {
        let mut transport = Transport::new();
        if let Some(ct) = content_type {
            transport = transport.with_content_type(ct);
        }
        Document::parse(markup.to_string(), &transport).expect("parse succeeds")
    }

    #[test]
    fn test_family_html5() {
        let doc = parse("<!DOCTYPE html><html></html>", Some("text/html"));
        assert_eq!(doc.family(), DocFamily::Html5);
        assert!(doc.is_html5());
        assert!(!doc.is_xml());
    }

    #[test]
    fn test_family_xhtml5() {
        let doc = parse(
            "<!DOCTYPE html><html xmlns=\"http://www.w3.org/1999/xhtml\"></html>",
            Some("application/xhtml+xml"),
        );
        assert_eq!(doc.family(), DocFamily::Xhtml5);
    }

    #[test]
    fn test_family_legacy_html() {
        let doc = parse(
            "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\"><html></html>",
            Some("text/html"),
        );
        assert_eq!(doc.family(), DocFamily::Html);
    }

    #[test]
    fn test_family_xhtml_beats_xhtml5() {
        let doc = parse(
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\"><html></html>",
            Some("application/xhtml+xml"),
        );
        assert_eq!(doc.family(), DocFamily::Xhtml);
    }

    #[test]
    fn test_family_na_without_doctype() {
        let doc = parse("<html><body></body></html>", Some("text/html"));
        assert_eq!(doc.family(), DocFamily::Na);
    }

    #[test]
    fn test_parse_rejects_non_markup() {
        let res = Document::parse("just plain text".to_string(), &Transport::new());
        assert!(res.is_err());
    }

    #[test]
    fn test_xml_declaration_and_charset() {
        let doc = parse(
            "<?xml version=\"1.0\" encoding=\"iso-8859-1\"?><!DOCTYPE html><html></html>",
            Some("application/xhtml+xml"),
        );
        assert_eq!(
            doc.xml_declaration().as_deref(),
            Some("<?xml version=\"1.0\" encoding=\"iso-8859-1\"?>")
        );
        assert_eq!(doc.charset_from_xml().as_deref(), Some("ISO-8859-1"));
        assert!(doc.is_xml());
    }

    #[test]
    fn test_xml_declaration_without_encoding() {
        let doc = parse(
            "<?xml version=\"1.0\"?><!DOCTYPE html><html></html>",
            Some("application/xhtml+xml"),
        );
        assert!(doc.xml_declaration().is_some());
        assert_eq!(doc.charset_from_xml(), None);
    }

    #[test]
    fn test_charsets_from_html_both_forms() {
        let doc = parse(
            "<!DOCTYPE html><html><head>\
             <meta charset=\"utf-8\">\
             <meta http-equiv=\"Content-Type\" content=\"text/html; charset=iso-8859-1\">\
             </head></html>",
            Some("text/html"),
        );
        let metas = doc.charsets_from_html();
        assert_eq!(metas.len(), 2);
        assert_eq!(metas[0].1.as_deref(), Some("UTF-8"));
        assert_eq!(metas[1].1.as_deref(), Some("ISO-8859-1"));
        assert!(metas[0].0.contains("charset=\"utf-8\""));
    }

    #[test]
    fn test_meta_content_type_without_charset_kept_valueless() {
        let doc = parse(
            "<!DOCTYPE html><html><head>\
             <meta http-equiv=\"Content-Type\" content=\"text/html\">\
             </head></html>",
            Some("text/html"),
        );
        let metas = doc.charsets_from_html();
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].1, None);
    }

    #[test]
    fn test_html_tag_snippet() {
        let doc = parse(
            "<!DOCTYPE html>\n<html lang=\"en\" dir=\"rtl\">\n<body></body></html>",
            Some("text/html"),
        );
        assert_eq!(doc.html_tag().as_deref(), Some("<html lang=\"en\" dir=\"rtl\">"));
        assert_eq!(doc.lang_from_html().as_deref(), Some("en"));
        assert_eq!(doc.dir_from_html().as_deref(), Some("rtl"));
    }

    #[test]
    fn test_html_tag_absent_in_fragment() {
        let doc = parse("<p>hi</p>", Some("text/html"));
        assert_eq!(doc.html_tag(), None);
        assert_eq!(doc.lang_from_html(), None);
    }

    #[test]
    fn test_xml_lang_attribute() {
        let doc = parse(
            "<!DOCTYPE html><html lang=\"fr\" xml:lang=\"fr\"></html>",
            Some("application/xhtml+xml"),
        );
        assert_eq!(doc.xml_lang_from_html().as_deref(), Some("fr"));
    }

    #[test]
    fn test_langs_from_meta() {
        let doc = parse(
            "<!DOCTYPE html><html><head>\
             <meta http-equiv=\"Content-Language\" content=\"de, fr\">\
             </head></html>",
            Some("text/html"),
        );
        let langs = doc.langs_from_meta();
        assert_eq!(langs.len(), 1);
        assert_eq!(langs[0].1, vec!["de", "fr"]);
    }

    #[test]
    fn test_nodes_with_class_and_id() {
        let doc = parse(
            "<!DOCTYPE html><html><body>\
             <p class=\"a b\">x</p><div id=\"main\">y</div>\
             </body></html>",
            Some("text/html"),
        );
        let classes = doc.nodes_with_class();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].1, vec!["a", "b"]);
        let ids = doc.nodes_with_id();
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].1, vec!["main"]);
    }
}
