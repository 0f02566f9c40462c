//! Heuristic fallback classifier.
//!
//! When the generated text cannot be recovered as structured data, the
//! record is derived directly from the raw text using the fixed rule tables
//! in [`rules`]. The classifier is a pure function of its two text inputs:
//! no parsing, no I/O, and it cannot fail. An empty generated-text argument
//! is fine, which is how callers handle a generation backend that failed
//! outright.

pub mod rules;

use std::collections::BTreeSet;

use crate::record::{
    truncate_chars, ComplianceRecord, ImplementationStep, LegalCitation, Risk, NOTES_MAX_CHARS,
};
use rules::{
    ADVISORY_NOTES, CITATION_RULES, CONFIDENCE_MATCHED, CONFIDENCE_UNMATCHED,
    CONSENT_TRIGGER_KEYWORDS, DATA_CATEGORY_RULES, EU_USERS_PHRASE, GENERIC_ADVISORY,
    GEO_LOGIC_KEYWORDS, IMPLEMENTATION_STEPS, JURISDICTION_RULES, LAWFUL_BASIS_RULES, RISK_RULES,
};

/// Derive a compliance record from raw text using the fixed rule tables.
///
/// `generated_text` is whatever the generation backend produced (possibly
/// empty); `feature_text` is the original feature description. Both are
/// combined and lower-cased for matching.
pub fn classify(generated_text: &str, feature_text: &str) -> ComplianceRecord {
    let combined = format!("{} {}", generated_text, feature_text).to_lowercase();

    // BTreeSets keep the emitted lists in sorted, deterministic order.
    let jurisdictions: BTreeSet<&str> = JURISDICTION_RULES
        .iter()
        .filter(|rule| rule.matches(&combined))
        .map(|rule| rule.code)
        .collect();

    let categories: BTreeSet<&str> = DATA_CATEGORY_RULES
        .iter()
        .filter(|rule| rule.matches(&combined))
        .map(|rule| rule.label)
        .collect();

    let basis: BTreeSet<&str> = LAWFUL_BASIS_RULES
        .iter()
        .filter(|rule| rule.matches(&combined))
        .map(|rule| rule.label)
        .collect();

    let consent_required = jurisdictions.contains("EU")
        && CONSENT_TRIGGER_KEYWORDS.iter().any(|kw| combined.contains(kw));

    // Any detected jurisdiction forces the flag; wording alone can also
    // trip it.
    let need_geo_logic = !jurisdictions.is_empty()
        || GEO_LOGIC_KEYWORDS.iter().all(|kw| combined.contains(kw))
        || combined.contains(EU_USERS_PHRASE);

    let legal_citations: Vec<LegalCitation> = CITATION_RULES
        .iter()
        .filter(|rule| jurisdictions.contains(rule.jurisdiction))
        .filter(|rule| {
            rule.requires_any.is_empty()
                || rule.requires_any.iter().any(|kw| combined.contains(kw))
        })
        .map(|rule| LegalCitation {
            law: rule.law.to_string(),
            article: rule.article.to_string(),
            jurisdiction: rule.jurisdiction.to_string(),
        })
        .collect();

    let risks: Vec<Risk> = RISK_RULES
        .iter()
        .filter(|rule| jurisdictions.contains(rule.jurisdiction))
        .map(|rule| Risk {
            risk: rule.risk.to_string(),
            severity: rule.severity.to_string(),
            mitigation: rule.mitigation.to_string(),
        })
        .collect();

    let implementation: Vec<ImplementationStep> = if jurisdictions.is_empty() {
        Vec::new()
    } else {
        IMPLEMENTATION_STEPS
            .iter()
            .map(|step| ImplementationStep {
                step: step.to_string(),
                priority: 1,
            })
            .collect()
    };

    let mut notes: Vec<&str> = ADVISORY_NOTES
        .iter()
        .filter(|note| jurisdictions.contains(note.jurisdiction))
        .map(|note| note.text)
        .collect();
    if notes.is_empty() {
        notes.push(GENERIC_ADVISORY);
    }

    let matched = !jurisdictions.is_empty()
        || !categories.is_empty()
        || !basis.is_empty()
        || consent_required;
    let confidence = if matched {
        CONFIDENCE_MATCHED
    } else {
        CONFIDENCE_UNMATCHED
    };

    ComplianceRecord {
        need_geo_logic,
        jurisdictions: jurisdictions.into_iter().map(String::from).collect(),
        legal_citations,
        data_categories: categories.into_iter().map(String::from).collect(),
        lawful_basis: basis.into_iter().map(String::from).collect(),
        consent_required,
        notes: truncate_chars(&notes.join(" "), NOTES_MAX_CHARS),
        risks,
        implementation,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_signals_yields_generic_low_confidence_record() {
        let record = classify("", "Dark Mode Toggle feature, no law context");
        assert!(!record.need_geo_logic);
        assert!(record.jurisdictions.is_empty());
        assert!(!record.consent_required);
        assert_eq!(record.notes, GENERIC_ADVISORY);
        assert!(record.implementation.is_empty());
        assert!(record.risks.is_empty());
        assert_eq!(record.confidence, CONFIDENCE_UNMATCHED);
    }

    #[test]
    fn test_eu_consent_scenario() {
        let record = classify(
            "",
            "Banner for EU users that blocks non-essential cookies until consent is given",
        );
        assert_eq!(record.jurisdictions, vec!["EU"]);
        assert!(record.consent_required);
        assert!(record.need_geo_logic);
        assert!(record
            .legal_citations
            .iter()
            .any(|c| c.law == "GDPR" && c.article == "7(1)"));
        // "cookie" appears, so the ePrivacy citation rides along.
        assert!(record
            .legal_citations
            .iter()
            .any(|c| c.law == "ePrivacy Directive" && c.article == "5(3)"));
        assert_eq!(record.lawful_basis, vec!["consent"]);
        assert_eq!(record.confidence, CONFIDENCE_MATCHED);
    }

    #[test]
    fn test_multi_jurisdiction_scenario() {
        let record = classify("", "Rollout covers california and eu users");
        assert!(record.need_geo_logic);
        assert!(record.jurisdictions.contains(&"EU".to_string()));
        assert!(record.jurisdictions.contains(&"US-CA".to_string()));
        // Sorted, deterministic order.
        assert_eq!(record.jurisdictions, vec!["EU", "US-CA"]);
    }

    #[test]
    fn test_any_jurisdiction_forces_geo_logic() {
        let record = classify("", "ccpa disclosures for opt-out");
        assert_eq!(record.jurisdictions, vec!["US-CA"]);
        assert!(record.need_geo_logic);
    }

    #[test]
    fn test_geo_logic_keywords_without_jurisdiction() {
        let record = classify("", "feature needs geo routing logic for pricing");
        assert!(record.need_geo_logic);
        assert!(record.jurisdictions.is_empty());
        // Keywords alone do not count as classification evidence.
        assert_eq!(record.confidence, CONFIDENCE_UNMATCHED);
    }

    #[test]
    fn test_eu_without_trigger_keywords_does_not_require_consent() {
        let record = classify("", "gdpr data inventory export tool");
        assert_eq!(record.jurisdictions, vec!["EU"]);
        assert!(!record.consent_required);
    }

    #[test]
    fn test_eu_risk_and_steps_emitted() {
        let record = classify("", "gdpr cookie banner");
        assert_eq!(record.risks.len(), 1);
        assert_eq!(record.risks[0].severity, "high");
        assert_eq!(record.implementation.len(), 3);
        assert!(record.implementation.iter().all(|s| s.priority == 1));
    }

    #[test]
    fn test_uk_detection_needs_both_keywords() {
        let record = classify("", "UK GDPR transfer assessment");
        assert!(record.jurisdictions.contains(&"UK".to_string()));
        // "gdpr" also selects EU.
        assert!(record.jurisdictions.contains(&"EU".to_string()));

        let record = classify("", "UK launch checklist");
        assert!(!record.jurisdictions.contains(&"UK".to_string()));
    }

    #[test]
    fn test_singapore_citation() {
        let record = classify("", "PDPA notification duty in Singapore");
        assert_eq!(record.jurisdictions, vec!["SG"]);
        assert!(record
            .legal_citations
            .iter()
            .any(|c| c.law == "PDPA" && c.jurisdiction == "SG"));
    }

    #[test]
    fn test_category_and_basis_detection() {
        let record = classify(
            "",
            "analytics SDK stores device identifier, legitimate interest claimed",
        );
        assert_eq!(record.data_categories, vec!["analytics", "identifiers"]);
        assert_eq!(record.lawful_basis, vec!["legitimate_interests"]);
        assert_eq!(record.confidence, CONFIDENCE_MATCHED);
    }

    #[test]
    fn test_notes_per_detected_jurisdiction() {
        let record = classify("", "gdpr and california rules apply");
        assert!(record.notes.contains("EU non-essential cookies"));
        assert!(record.notes.contains("California requires disclosures"));
        assert!(!record.notes.contains(GENERIC_ADVISORY));
    }

    #[test]
    fn test_generated_text_contributes_evidence() {
        // Signals may come from the model output rather than the feature.
        let record = classify("mentions gdpr compliance", "plain feature text");
        assert_eq!(record.jurisdictions, vec!["EU"]);
    }
}
