// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for i18n-checker

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for i18n-checker
///
/// Missing or malformed declaration sources are never errors; they are
/// recorded as facts with a reason. The only fatal boundaries are byte
/// decoding and parser construction: when either fails, no partial fact
/// registry or findings are produced.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid UTF-16 document: {0}")]
    InvalidUtf16(String),

    #[error("Unparseable document: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
