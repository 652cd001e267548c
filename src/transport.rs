// SPDX-License-Identifier: PMPL-1.0-or-later
//! Transport metadata for a fetched document.
//!
//! The checker never fetches anything itself; the caller hands it the raw
//! response body plus this record of the HTTP exchange. The `url` is kept
//! for diagnostics only.

use serde::Serialize;

/// HTTP response and request metadata accompanying the raw document bytes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transport {
    /// Original request URL, for diagnostics only
    pub url: Option<String>,
    /// Raw `Content-Type` response header value
    pub content_type: Option<String>,
    /// Raw `Content-Language` response header value
    pub content_language: Option<String>,
    /// Raw `Accept-Language` request header value
    pub accept_language: Option<String>,
    /// Raw `Accept-Charset` request header value
    pub accept_charset: Option<String>,
}

impl Transport {
    /// Create an empty transport record (no headers known)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content type
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// Set the content language
    pub fn with_content_language(mut self, content_language: &str) -> Self {
        self.content_language = Some(content_language.to_string());
        self
    }

    /// Set the request Accept-Language header
    pub fn with_accept_language(mut self, accept_language: &str) -> Self {
        self.accept_language = Some(accept_language.to_string());
        self
    }

    /// Set the request Accept-Charset header
    pub fn with_accept_charset(mut self, accept_charset: &str) -> Self {
        self.accept_charset = Some(accept_charset.to_string());
        self
    }

    /// Set the request URL
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// MIME type from the Content-Type header, without parameters
    pub fn mimetype(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
            .filter(|m| !m.is_empty())
    }

    /// Charset parameter from the Content-Type header, upper-cased
    pub fn charset(&self) -> Option<String> {
        self.content_type.as_deref().and_then(charset_param)
    }
}

/// Extract a `charset=` parameter from a Content-Type style value.
///
/// Returns the charset token upper-cased, with surrounding quotes stripped.
pub(crate) fn charset_param(value: &str) -> Option<String> {
    for param in value.split(';').skip(1) {
        let param = param.trim();
        if let Some(rest) = param
            .get(..8)
            .filter(|p| p.eq_ignore_ascii_case("charset="))
            .map(|_| &param[8..])
        {
            let token = rest.trim().trim_matches(|c| c == '"' || c == '\'').trim();
            if !token.is_empty() {
                return Some(token.to_uppercase());
            }
        }
    }
    None
}

/// Parse an Accept-* header into its ordered value tokens.
///
/// Quality parameters are dropped; order of appearance is preserved.
pub(crate) fn parse_header(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|part| part.split(';').next().unwrap_or("").trim())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
