// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for an analysis.
//!
//! Supports two output formats:
//! - Text: human-readable facts and findings, with a built-in English
//!   rendering of the message identifiers
//! - JSON: the structured analysis for programmatic consumption
//!
//! Localized presentation belongs to the consumer; the text renderer here
//! exists for the CLI and tests.

use crate::checker::Analysis;
use crate::facts::{Fact, Reason};
use crate::findings::Severity;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Generate a report from a completed analysis
pub fn generate_report(analysis: &Analysis, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(analysis),
        OutputFormat::Json => generate_json_report(analysis),
    }
}

/// English text for a message identifier; unknown identifiers fall through
/// verbatim so new rules degrade gracefully.
pub fn message_text(id: &str) -> &str {
    match id {
        "rep_charset_none" => "No character encoding information was found",
        "rep_charset_no_utf8" => "An encoding other than UTF-8 was declared",
        "rep_charset_conflict" => "Conflicting character encoding declarations",
        "rep_charset_multiple_meta" => "Multiple encoding declarations using the meta tag",
        "rep_charset_bom_found" => "UTF-8 BOM found at the start of the file",
        "rep_charset_no_in_doc" => "No charset declaration within the document",
        "rep_charset_bom_in_content" => "BOM found in the content",
        "rep_lang_missing" => "The html tag has no language attribute",
        "rep_lang_xmllang_mismatch" => "The lang and xml:lang attribute values do not match",
        "rep_lang_xmllang_in_html" => "This non-XML document uses xml:lang",
        "rep_dir_invalid" => "Incorrect value used for the dir attribute",
        other => other,
    }
}

fn reason_text(reason: Reason) -> &'static str {
    match reason {
        Reason::SourceMissing => "not found",
        Reason::NoRecognizedValue => "no recognizable value",
        Reason::NoRootTag => "no html tag found",
        Reason::NothingFlagged => "none flagged",
    }
}

fn fact_line(fact: &Fact) -> String {
    if fact.has_values() {
        format!("  {}: {}", fact.key, fact.values().join(", "))
    } else if let Some(reason) = fact.reason {
        format!("  {}: ({})", fact.key, reason_text(reason))
    } else {
        format!("  {}: (empty)", fact.key)
    }
}

/// Generate human-readable text report
fn generate_text_report(analysis: &Analysis) -> String {
    let mut output = String::new();

    output.push_str("=== i18n-checker Analysis Report ===\n\n");

    output.push_str("Facts:\n");
    for fact in &analysis.facts {
        output.push_str(&fact_line(fact));
        output.push('\n');
    }
    output.push_str(&format!(
        "  resolved direction: {}{}\n\n",
        analysis.facts.resolved_direction(),
        if analysis
            .facts
            .get(crate::facts::FactKey::DirDefault)
            .is_some_and(Fact::has_values)
        {
            ""
        } else {
            " (default)"
        }
    ));

    let findings = &analysis.findings;
    if findings.is_empty() {
        output.push_str("No internationalization issues found. All checks passed.\n");
        return output;
    }

    let errors = findings.errors().len();
    let warnings = findings.warnings().len();
    let total = findings.len();
    output.push_str(&format!(
        "Found {} issue(s): {} error(s), {} warning(s), {} info\n\n",
        total,
        errors,
        warnings,
        total - errors - warnings
    ));

    for severity in &[Severity::Error, Severity::Warning, Severity::Info] {
        let sev_findings = findings.by_severity(*severity);
        if sev_findings.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", severity, sev_findings.len()));

        for finding in sev_findings {
            output.push_str(&format!(
                "[{}] {}\n",
                finding.rule_id,
                message_text(&finding.title)
            ));

            for code in &finding.codes {
                output.push_str(&format!("  Origin: {}\n", code));
            }

            if let Some(ref reference) = finding.reference {
                output.push_str(&format!("  See: {}\n", reference));
            }

            output.push('\n');
        }
    }

    if errors > 0 {
        output.push_str("RESULT: FAIL (errors found)\n");
    } else if warnings > 0 {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

/// Generate JSON report
fn generate_json_report(analysis: &Analysis) -> String {
    serde_json::to_string_pretty(analysis)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize analysis: {}\"}}", e))
}
