// SPDX-License-Identifier: PMPL-1.0-or-later
//! Extractors: one per declaration source.
//!
//! Each extractor reads the document adapter and/or transport metadata and
//! writes its facts into the registry. Extractors are independent and
//! order-insensitive among themselves; the byte normalizer has already run
//! before any of them, and family-dependent extractors gate on the adapter's
//! flags internally.

pub mod charset;
pub mod class_id;
pub mod direction;
pub mod doctype;
pub mod headers;
pub mod language;

use crate::document::Document;
use crate::facts::FactRegistry;
use crate::transport::Transport;
use tracing::debug;

/// Read-only inputs shared by every extractor
pub struct ExtractContext<'a> {
    /// Parsed document adapter
    pub doc: &'a Document,
    /// HTTP transport metadata
    pub transport: &'a Transport,
}

/// Trait implemented by all extractors
pub trait Extractor {
    /// Human-readable name of this extractor
    fn name(&self) -> &'static str;

    /// Gather facts from one declaration source into the registry
    fn extract(&self, cx: &ExtractContext<'_>, facts: &mut FactRegistry);
}

/// Run the full extractor set in its canonical order.
pub fn run_extractors(cx: &ExtractContext<'_>, facts: &mut FactRegistry) {
    let extractors: Vec<Box<dyn Extractor>> = vec![
        Box::new(doctype::DoctypeMime),
        Box::new(charset::HttpCharset),
        Box::new(charset::XmlDeclarationCharset),
        Box::new(charset::MetaCharset),
        Box::new(language::LangAttr),
        Box::new(language::XmlLangAttr),
        Box::new(language::HttpContentLanguage),
        Box::new(language::MetaContentLanguage),
        Box::new(direction::DirAttr),
        Box::new(class_id::ClassIdAudit),
        Box::new(headers::AcceptHeaders),
    ];

    for extractor in &extractors {
        debug!("running extractor: {}", extractor.name());
        extractor.extract(cx, facts);
    }
}
