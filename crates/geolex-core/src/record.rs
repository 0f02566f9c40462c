//! The canonical compliance record.
//!
//! Every resolution call produces exactly one [`ComplianceRecord`]. The
//! record has no identity or lifecycle beyond that call: it is constructed,
//! handed to the caller, and discarded. Callers serialize it into whatever
//! wire format their service uses.

use serde::{Deserialize, Serialize};

/// Maximum length of the free-text `notes` field, in characters.
pub const NOTES_MAX_CHARS: usize = 400;

/// A single legal citation supporting a compliance decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegalCitation {
    /// The law or regulation (e.g., "GDPR")
    #[serde(default)]
    pub law: String,

    /// The article or section within the law (e.g., "7(1)")
    #[serde(default)]
    pub article: String,

    /// The territory code the citation applies to (e.g., "EU")
    #[serde(default)]
    pub jurisdiction: String,
}

/// A compliance risk with severity and suggested mitigation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    /// What could go wrong
    #[serde(default)]
    pub risk: String,

    /// Severity label, always lower-cased (e.g., "high")
    #[serde(default)]
    pub severity: String,

    /// How to address the risk
    #[serde(default)]
    pub mitigation: String,
}

/// An ordered implementation step with priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationStep {
    /// What to do
    #[serde(default)]
    pub step: String,

    /// Priority rank; lower means sooner
    #[serde(default = "default_priority")]
    pub priority: i64,
}

impl Default for ImplementationStep {
    fn default() -> Self {
        Self {
            step: String::new(),
            priority: default_priority(),
        }
    }
}

pub(crate) fn default_priority() -> i64 {
    1
}

/// Structured geo-compliance decision for a single feature description.
///
/// `Default` yields the fully degraded record: every flag false, every list
/// empty, empty notes, zero confidence. The normalizer substitutes these
/// defaults field-by-field for anything malformed rather than rejecting
/// the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceRecord {
    /// Whether the feature needs jurisdiction-aware logic
    pub need_geo_logic: bool,

    /// Territory codes the feature must account for (e.g., "EU", "US-CA")
    pub jurisdictions: Vec<String>,

    /// Citations supporting the decision
    pub legal_citations: Vec<LegalCitation>,

    /// Kinds of data the feature touches (e.g., "cookies", "analytics")
    pub data_categories: Vec<String>,

    /// Legal justifications for processing (e.g., "consent")
    pub lawful_basis: Vec<String>,

    /// Whether user consent must be collected before processing
    pub consent_required: bool,

    /// Free-text advisory, at most [`NOTES_MAX_CHARS`] characters
    pub notes: String,

    /// Identified compliance risks
    pub risks: Vec<Risk>,

    /// Suggested implementation steps
    pub implementation: Vec<ImplementationStep>,

    /// Heuristic evidence score in [0.0, 1.0]; not statistically calibrated
    pub confidence: f64,
}

/// Truncate free text to at most `max` characters, respecting char
/// boundaries.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_fully_degraded() {
        let record = ComplianceRecord::default();
        assert!(!record.need_geo_logic);
        assert!(!record.consent_required);
        assert!(record.jurisdictions.is_empty());
        assert!(record.legal_citations.is_empty());
        assert!(record.data_categories.is_empty());
        assert!(record.lawful_basis.is_empty());
        assert!(record.risks.is_empty());
        assert!(record.implementation.is_empty());
        assert!(record.notes.is_empty());
        assert_eq!(record.confidence, 0.0);
    }

    #[test]
    fn test_step_priority_defaults_to_one() {
        let step = ImplementationStep::default();
        assert_eq!(step.priority, 1);

        let parsed: ImplementationStep =
            serde_json::from_str(r#"{"step": "detect region"}"#).unwrap();
        assert_eq!(parsed.priority, 1);
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = ComplianceRecord {
            need_geo_logic: true,
            jurisdictions: vec!["EU".to_string()],
            confidence: 0.55,
            ..Default::default()
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: ComplianceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 4).chars().count(), 4);
        assert_eq!(truncate_chars("short", 400), "short");
    }
}
