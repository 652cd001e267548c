// SPDX-License-Identifier: PMPL-1.0-or-later
//! i18n-checker - Internationalization checker for markup documents
//!
//! Inspects a fetched HTML/XHTML document together with its HTTP transport
//! metadata and produces two artifacts: a registry of *facts* about
//! character-encoding and language declarations, text direction, and
//! non-ASCII/non-NFC class/id attributes; and a list of *findings*
//! (errors, warnings, info) derived by cross-referencing those facts.
//!
//! ## Declaration sources
//!
//! - **BOM**: byte-order mark at the start of the raw document
//! - **HTTP**: `Content-Type` charset parameter, `Content-Language` header
//! - **XML declaration**: `<?xml version="1.0" encoding="..."?>`
//! - **Meta**: `<meta charset>`, `<meta http-equiv="Content-Type">`,
//!   `<meta http-equiv="Content-Language">`
//! - **Root tag**: `lang`, `xml:lang`, `dir` attributes
//! - **Request**: `Accept-Language` / `Accept-Charset` headers
//!
//! Markup parsing is delegated to `scraper`; the pipeline never fetches,
//! renders, or localizes anything itself.

pub mod checker;
pub mod document;
pub mod error;
pub mod extract;
pub mod facts;
pub mod findings;
pub mod normalize;
pub mod report;
pub mod rules;
pub mod transport;
