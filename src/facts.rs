// SPDX-License-Identifier: PMPL-1.0-or-later
//! Fact model and registry.
//!
//! A `Fact` is one gathered observation about a declared property and its
//! source: the human-readable origin snippet (`code`), the extracted values,
//! and, when nothing was found, a symbolic reason telling a missing source
//! apart from a source that carried no recognizable value. The
//! `FactRegistry` is the single boundary between gathering and reporting:
//! extractors write facts, rule evaluators only ever read them.

use serde::{Serialize, Serializer};
use tracing::warn;

/// Grouping tag for facts and findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactCategory {
    /// Document family and MIME type
    Document,
    /// Character encoding declarations
    Charset,
    /// Language declarations
    Language,
    /// Text direction
    Direction,
    /// Class/id identifier audits
    ClassId,
    /// Client request headers
    Headers,
}

impl FactCategory {
    /// Stable string form used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            FactCategory::Document => "doc",
            FactCategory::Charset => "charset",
            FactCategory::Language => "lang",
            FactCategory::Direction => "dir",
            FactCategory::ClassId => "classId",
            FactCategory::Headers => "headers",
        }
    }
}

impl std::fmt::Display for FactCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FactCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Specific declaration source a fact was gathered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactKey {
    /// Document family classification (XHTML/HTML/XHTML5/HTML5/NA)
    Doctype,
    /// MIME type reported by the transport layer
    Mimetype,
    /// Charset parameter of the Content-Type header
    CharsetHttp,
    /// Byte-order mark at the start of the document
    CharsetBom,
    /// Encoding pseudo-attribute of the XML declaration
    CharsetXml,
    /// Legacy `<meta http-equiv="Content-Type">` declarations
    CharsetMeta,
    /// HTML5 `<meta charset>` declarations
    CharsetMetaHtml5,
    /// `lang` attribute on the root tag
    LangAttr,
    /// `xml:lang` attribute on the root tag
    XmlLangAttr,
    /// Content-Language response header
    LangHttp,
    /// `<meta http-equiv="Content-Language">` declarations
    LangMeta,
    /// `dir` attribute on the root tag
    DirDefault,
    /// Class/id tokens containing non-ASCII code points
    ClassIdNonAscii,
    /// Non-ASCII class/id tokens that are not NFC-normalized
    ClassIdNonNfc,
    /// Accept-Language request header tokens
    AcceptLanguage,
    /// Accept-Charset request header tokens
    AcceptCharset,
}

impl FactKey {
    /// Stable string form used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            FactKey::Doctype => "dtd",
            FactKey::Mimetype => "mimetype",
            FactKey::CharsetHttp => "charset_http",
            FactKey::CharsetBom => "charset_bom",
            FactKey::CharsetXml => "charset_xml",
            FactKey::CharsetMeta => "charset_meta",
            FactKey::CharsetMetaHtml5 => "charset_meta_html5",
            FactKey::LangAttr => "lang_attr_lang",
            FactKey::XmlLangAttr => "lang_attr_xmllang",
            FactKey::LangHttp => "lang_http",
            FactKey::LangMeta => "lang_meta",
            FactKey::DirDefault => "dir_default",
            FactKey::ClassIdNonAscii => "classId_non_ascii",
            FactKey::ClassIdNonNfc => "classId_non_nfc",
            FactKey::AcceptLanguage => "headers_accept_language",
            FactKey::AcceptCharset => "headers_accept_charset",
        }
    }

    /// Category this key belongs to
    pub fn category(&self) -> FactCategory {
        match self {
            FactKey::Doctype | FactKey::Mimetype => FactCategory::Document,
            FactKey::CharsetHttp
            | FactKey::CharsetBom
            | FactKey::CharsetXml
            | FactKey::CharsetMeta
            | FactKey::CharsetMetaHtml5 => FactCategory::Charset,
            FactKey::LangAttr | FactKey::XmlLangAttr | FactKey::LangHttp | FactKey::LangMeta => {
                FactCategory::Language
            }
            FactKey::DirDefault => FactCategory::Direction,
            FactKey::ClassIdNonAscii | FactKey::ClassIdNonNfc => FactCategory::ClassId,
            FactKey::AcceptLanguage | FactKey::AcceptCharset => FactCategory::Headers,
        }
    }
}

impl std::fmt::Display for FactKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FactKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Symbolic reason for an absent or empty fact value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// The declaration source was entirely absent
    SourceMissing,
    /// The source was present but carried no recognizable value
    NoRecognizedValue,
    /// No root tag was found to read the attribute from
    NoRootTag,
    /// The audit ran and flagged nothing
    NothingFlagged,
}

/// One occurrence of a declaration source: its origin snippet and values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRecord {
    /// Human-readable origin (header line, serialized tag, ...)
    pub code: Option<String>,
    /// Values extracted from this occurrence
    pub values: Vec<String>,
}

impl SourceRecord {
    /// Create a record from an origin snippet and its values
    pub fn new(code: Option<String>, values: Vec<String>) -> Self {
        Self { code, values }
    }
}

/// One gathered observation, immutable once inserted into the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fact {
    /// Grouping tag
    pub category: FactCategory,
    /// Declaration source
    pub key: FactKey,
    /// Occurrences of this source; empty when nothing was found
    pub records: Vec<SourceRecord>,
    /// Why the values are absent, when they are
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
}

impl Fact {
    /// Create an empty fact for a key; category is derived from the key
    pub fn new(key: FactKey) -> Self {
        Self {
            category: key.category(),
            key,
            records: Vec::new(),
            reason: None,
        }
    }

    /// Append one source occurrence
    pub fn with_record(mut self, code: Option<String>, values: Vec<String>) -> Self {
        self.records.push(SourceRecord::new(code, values));
        self
    }

    /// Replace the occurrence list wholesale
    pub fn with_records(mut self, records: Vec<SourceRecord>) -> Self {
        self.records = records;
        self
    }

    /// Set the absence reason
    pub fn with_reason(mut self, reason: Reason) -> Self {
        self.reason = Some(reason);
        self
    }

    /// All non-empty values across occurrences, in order
    pub fn values(&self) -> Vec<&str> {
        self.records
            .iter()
            .flat_map(|r| r.values.iter().map(String::as_str))
            .collect()
    }

    /// Origin snippets of occurrences that carried at least one value
    pub fn valued_codes(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| !r.values.is_empty())
            .filter_map(|r| r.code.as_deref())
            .collect()
    }

    /// Whether any occurrence carried a value
    pub fn has_values(&self) -> bool {
        self.records.iter().any(|r| !r.values.is_empty())
    }

    /// First value of the first occurrence, if any
    pub fn first_value(&self) -> Option<&str> {
        self.records
            .first()
            .and_then(|r| r.values.first())
            .map(String::as_str)
    }

    /// Origin snippet of the first occurrence, if any
    pub fn first_code(&self) -> Option<&str> {
        self.records.first().and_then(|r| r.code.as_deref())
    }
}

/// Insertion-ordered, append-only store of facts for one analysis run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FactRegistry {
    facts: Vec<Fact>,
}

impl FactRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fact; a key may be written at most once per run.
    ///
    /// A duplicate write is a programming error in an extractor and is
    /// dropped with a warning rather than overwriting the first fact.
    pub fn insert(&mut self, fact: Fact) {
        if self.get(fact.key).is_some() {
            warn!("duplicate fact for key {}, keeping first", fact.key);
            return;
        }
        self.facts.push(fact);
    }

    /// Look up a fact by key
    pub fn get(&self, key: FactKey) -> Option<&Fact> {
        self.facts.iter().find(|f| f.key == key)
    }

    /// All non-empty values recorded under a key
    pub fn values(&self, key: FactKey) -> Vec<&str> {
        self.get(key).map(|f| f.values()).unwrap_or_default()
    }

    /// All facts in a category, in insertion order
    pub fn by_category(&self, category: FactCategory) -> Vec<&Fact> {
        self.facts.iter().filter(|f| f.category == category).collect()
    }

    /// Iterate over all facts in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Fact> {
        self.facts.iter()
    }

    /// Total fact count
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Is empty
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Text direction with the `ltr` default applied.
    ///
    /// The `dir_default` fact itself stays absent when no attribute was
    /// declared; the default belongs to read time, not gathering time.
    pub fn resolved_direction(&self) -> &str {
        self.get(FactKey::DirDefault)
            .and_then(|f| f.first_value())
            .unwrap_or("ltr")
    }
}

impl<'a> IntoIterator for &'a FactRegistry {
    type Item = &'a Fact;
    type IntoIter = std::slice::Iter<'a, Fact>;

    fn into_iter(self) -> Self::IntoIter {
        self.facts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_category_mapping() {
        assert_eq!(FactKey::CharsetBom.category(), FactCategory::Charset);
        assert_eq!(FactKey::ClassIdNonNfc.category(), FactCategory::ClassId);
        assert_eq!(FactKey::AcceptCharset.category(), FactCategory::Headers);
    }

    #[test]
    fn test_insert_and_get() {
        let mut reg = FactRegistry::new();
        reg.insert(
            Fact::new(FactKey::CharsetHttp)
                .with_record(Some("Content-Type: text/html".into()), vec!["UTF-8".into()]),
        );
        let fact = reg.get(FactKey::CharsetHttp).expect("fact present");
        assert_eq!(fact.values(), vec!["UTF-8"]);
        assert_eq!(fact.first_code(), Some("Content-Type: text/html"));
    }

    #[test]
    fn test_duplicate_key_keeps_first() {
        let mut reg = FactRegistry::new();
        reg.insert(Fact::new(FactKey::Doctype).with_record(None, vec!["HTML5".into()]));
        reg.insert(Fact::new(FactKey::Doctype).with_record(None, vec!["HTML".into()]));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.values(FactKey::Doctype), vec!["HTML5"]);
    }

    #[test]
    fn test_valued_codes_skip_empty_records() {
        let fact = Fact::new(FactKey::CharsetMeta)
            .with_record(Some("<meta charset=\"utf-8\">".into()), vec!["UTF-8".into()])
            .with_record(Some("<meta http-equiv=\"Content-Type\">".into()), vec![]);
        assert_eq!(fact.valued_codes(), vec!["<meta charset=\"utf-8\">"]);
        assert_eq!(fact.values(), vec!["UTF-8"]);
    }

    #[test]
    fn test_resolved_direction_default() {
        let mut reg = FactRegistry::new();
        assert_eq!(reg.resolved_direction(), "ltr");
        reg.insert(
            Fact::new(FactKey::DirDefault).with_record(Some("<html dir=\"rtl\">".into()), vec!["rtl".into()]),
        );
        assert_eq!(reg.resolved_direction(), "rtl");
    }

    #[test]
    fn test_category_filter_preserves_order() {
        let mut reg = FactRegistry::new();
        reg.insert(Fact::new(FactKey::CharsetBom).with_reason(Reason::SourceMissing));
        reg.insert(Fact::new(FactKey::Doctype).with_record(None, vec!["NA".into()]));
        reg.insert(Fact::new(FactKey::CharsetHttp).with_reason(Reason::SourceMissing));
        let charset: Vec<_> = reg.by_category(FactCategory::Charset).iter().map(|f| f.key).collect();
        assert_eq!(charset, vec![FactKey::CharsetBom, FactKey::CharsetHttp]);
    }
}
