// SPDX-License-Identifier: PMPL-1.0-or-later
//! Analysis pipeline: normalize, parse, extract, evaluate.
//!
//! One `Checker` analyzes one document; the resulting fact registry and
//! findings are owned by the returned `Analysis` and no state survives
//! between runs.

use crate::document::Document;
use crate::error::Result;
use crate::extract::{self, ExtractContext};
use crate::facts::FactRegistry;
use crate::findings::FindingSet;
use crate::normalize;
use crate::rules;
use crate::transport::Transport;
use serde::Serialize;
use tracing::{debug, info};

/// The two artifacts of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Gathered facts, in extraction order
    pub facts: FactRegistry,
    /// Diagnostic findings, in rule-evaluation order
    pub findings: FindingSet,
}

/// One-shot analyzer for a fetched document.
pub struct Checker {
    transport: Transport,
    bytes: Vec<u8>,
}

impl Checker {
    /// Create a checker for one document's raw bytes and transport metadata
    pub fn new(transport: Transport, bytes: Vec<u8>) -> Self {
        Self { transport, bytes }
    }

    /// Run the full pipeline.
    ///
    /// Byte normalization runs first so the BOM fact exists before parsing
    /// and all downstream steps see canonical UTF-8 text. A decode or parse
    /// failure aborts the run; no partial analysis escapes.
    pub fn check(&self) -> Result<Analysis> {
        let (markup, bom) = normalize::decode(&self.bytes)?;

        let mut facts = FactRegistry::new();
        facts.insert(normalize::bom_fact(bom));

        let doc = Document::parse(markup, &self.transport)?;
        debug!("document family: {}", doc.family());

        let cx = ExtractContext {
            doc: &doc,
            transport: &self.transport,
        };
        extract::run_extractors(&cx, &mut facts);

        let findings = rules::evaluate_all(&facts, doc.markup());
        info!(
            "analysis complete: {} facts, {} findings",
            facts.len(),
            findings.len()
        );

        Ok(Analysis { facts, findings })
    }
}
