// SPDX-License-Identifier: PMPL-1.0-or-later
//! Finding representation for analysis diagnostics.
//!
//! Title and remediation fields carry message-catalog identifiers, not
//! prose: the consumer is responsible for localized text lookup. The only
//! presentation work done here is assembling the origin-code list a
//! finding's explanation embeds.

use crate::facts::FactCategory;
use serde::Serialize;

/// Severity levels for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A genuine conflict between declarations
    Error,
    /// Should be addressed
    Warning,
    /// Informational
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// One diagnostic result derived from the fact registry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// Rule/check identifier (e.g., "charset-conflict")
    pub rule_id: String,
    /// Category this finding belongs to
    pub category: FactCategory,
    /// Severity level
    pub severity: Severity,
    /// Message-catalog identifier for the title/explanation pair
    pub title: String,
    /// Origin snippets embedded in the explanation
    pub codes: Vec<String>,
    /// Message-catalog identifier for the remediation hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
    /// Reference link for further reading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Finding {
    /// Create a new finding
    pub fn new(rule_id: &str, severity: Severity, category: FactCategory, title: &str) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            category,
            severity,
            title: title.to_string(),
            codes: Vec::new(),
            remediation: None,
            reference: None,
        }
    }

    /// Attach the origin snippets the explanation should list
    pub fn with_codes(mut self, codes: Vec<String>) -> Self {
        self.codes = codes;
        self
    }

    /// Set the remediation message identifier
    pub fn with_remediation(mut self, remediation: &str) -> Self {
        self.remediation = Some(remediation.to_string());
        self
    }

    /// Set the reference link
    pub fn with_reference(mut self, reference: &str) -> Self {
        self.reference = Some(reference.to_string());
        self
    }
}

/// Findings in emission order, with aggregation helpers.
///
/// Rule evaluation order determines finding order; nothing is re-sorted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FindingSet {
    /// All findings
    pub findings: Vec<Finding>,
}

impl FindingSet {
    /// Create empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finding
    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Extend with multiple findings
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// Get findings by severity
    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    }

    /// Get findings by category
    pub fn by_category(&self, category: FactCategory) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.category == category)
            .collect()
    }

    /// Get all errors
    pub fn errors(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Error)
    }

    /// Get all warnings
    pub fn warnings(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Warning)
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Total count
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Is empty
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl IntoIterator for FindingSet {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.into_iter()
    }
}

impl<'a> IntoIterator for &'a FindingSet {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(rule_id: &str, severity: Severity) -> Finding {
        Finding::new(rule_id, severity, FactCategory::Charset, "rep_charset_conflict")
    }

    #[test]
    fn test_emission_order_preserved() {
        let mut set = FindingSet::new();
        set.add(sample("b", Severity::Info));
        set.add(sample("a", Severity::Error));
        let ids: Vec<_> = set.findings.iter().map(|f| f.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_severity_filters() {
        let mut set = FindingSet::new();
        set.add(sample("a", Severity::Error));
        set.add(sample("b", Severity::Warning));
        set.add(sample("c", Severity::Warning));
        assert_eq!(set.errors().len(), 1);
        assert_eq!(set.warnings().len(), 2);
        assert!(set.has_errors());
    }

    #[test]
    fn test_builder_fields() {
        let f = sample("a", Severity::Warning)
            .with_codes(vec!["<meta charset=\"utf-8\">".into()])
            .with_remediation("rep_charset_conflict_todo")
            .with_reference("https://www.w3.org/International/questions/qa-changing-encoding");
        assert_eq!(f.codes.len(), 1);
        assert!(f.remediation.is_some());
        assert!(f.reference.is_some());
    }
}
