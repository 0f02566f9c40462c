//! Schema normalization for parsed values of unknown shape.
//!
//! The normalizer never fails: any type mismatch degrades to that field's
//! default instead of rejecting the whole record. A value that is not an
//! object at all yields the fully defaulted record.

use serde_json::Value;

use crate::record::{
    default_priority, truncate_chars, ComplianceRecord, ImplementationStep, LegalCitation, Risk,
    NOTES_MAX_CHARS,
};

/// Coerce an arbitrary parsed value into a well-formed [`ComplianceRecord`].
pub fn normalize(data: &Value) -> ComplianceRecord {
    let map = match data.as_object() {
        Some(map) => map,
        None => return ComplianceRecord::default(),
    };

    ComplianceRecord {
        need_geo_logic: truthy(map.get("need_geo_logic")),
        jurisdictions: string_list(map.get("jurisdictions")),
        legal_citations: citation_list(map.get("legal_citations")),
        data_categories: string_list(map.get("data_categories")),
        lawful_basis: string_list(map.get("lawful_basis")),
        consent_required: truthy(map.get("consent_required")),
        notes: truncate_chars(&stringify(map.get("notes")), NOTES_MAX_CHARS),
        risks: risk_list(map.get("risks")),
        implementation: step_list(map.get("implementation")),
        confidence: clamped_confidence(map.get("confidence")),
    }
}

/// Truthiness coercion: null, false, 0, "", [] and {} are all false.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Render a scalar as a string; missing or null yields the empty string.
fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Keep a list of strings only if the raw value is itself a list.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(|item| stringify(Some(item))).collect(),
        _ => Vec::new(),
    }
}

fn citation_list(value: Option<&Value>) -> Vec<LegalCitation> {
    mapping_list(value, |entry| LegalCitation {
        law: stringify(entry.get("law")),
        article: stringify(entry.get("article")),
        jurisdiction: stringify(entry.get("jurisdiction")),
    })
}

fn risk_list(value: Option<&Value>) -> Vec<Risk> {
    mapping_list(value, |entry| Risk {
        risk: stringify(entry.get("risk")),
        severity: stringify(entry.get("severity")).to_lowercase(),
        mitigation: stringify(entry.get("mitigation")),
    })
}

fn step_list(value: Option<&Value>) -> Vec<ImplementationStep> {
    mapping_list(value, |entry| ImplementationStep {
        step: stringify(entry.get("step")),
        priority: parse_priority(entry.get("priority")),
    })
}

/// Build sub-records from the mapping entries of a list, silently skipping
/// non-mapping entries. A non-list value yields an empty list.
fn mapping_list<T>(
    value: Option<&Value>,
    build: impl Fn(&serde_json::Map<String, Value>) -> T,
) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_object())
            .map(build)
            .collect(),
        _ => Vec::new(),
    }
}

/// Integer parse for step priorities: numbers truncate, strings parse,
/// anything else falls back to 1.
fn parse_priority(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or_else(default_priority),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_else(|_| default_priority()),
        Some(Value::Bool(b)) => *b as i64,
        _ => default_priority(),
    }
}

/// Numeric conversion then clamp to [0.0, 1.0]; unparseable yields 0.0.
fn clamped_confidence(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Bool(b)) => *b as u8 as f64,
        _ => 0.0,
    };

    if raw.is_finite() {
        raw.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_mapping_value_yields_defaults() {
        assert_eq!(normalize(&json!([1, 2, 3])), ComplianceRecord::default());
        assert_eq!(normalize(&json!("a string")), ComplianceRecord::default());
        assert_eq!(normalize(&Value::Null), ComplianceRecord::default());
    }

    #[test]
    fn test_well_formed_object_passes_through() {
        let value = json!({
            "need_geo_logic": true,
            "jurisdictions": ["EU"],
            "legal_citations": [
                {"law": "GDPR", "article": "7(1)", "jurisdiction": "EU"}
            ],
            "data_categories": ["cookies"],
            "lawful_basis": ["consent"],
            "consent_required": true,
            "notes": "EU opt-in required.",
            "risks": [
                {"risk": "pre-consent drop", "severity": "HIGH", "mitigation": "opt-in first"}
            ],
            "implementation": [{"step": "detect region", "priority": 2}],
            "confidence": 0.8
        });

        let record = normalize(&value);
        assert!(record.need_geo_logic);
        assert!(record.consent_required);
        assert_eq!(record.jurisdictions, vec!["EU"]);
        assert_eq!(record.legal_citations[0].law, "GDPR");
        assert_eq!(record.risks[0].severity, "high");
        assert_eq!(record.implementation[0].priority, 2);
        assert_eq!(record.confidence, 0.8);
    }

    #[test]
    fn test_wrong_typed_list_field_degrades_to_empty() {
        let value = json!({
            "need_geo_logic": true,
            "jurisdictions": ["EU"],
            "legal_citations": "none",
            "confidence": 0.6
        });

        let record = normalize(&value);
        assert!(record.legal_citations.is_empty());
        // Other fields still populated from the rest of the object.
        assert!(record.need_geo_logic);
        assert_eq!(record.jurisdictions, vec!["EU"]);
        assert_eq!(record.confidence, 0.6);
    }

    #[test]
    fn test_non_mapping_list_entries_are_dropped() {
        let value = json!({
            "risks": [
                "just a string",
                {"risk": "real", "severity": "Low", "mitigation": "m"},
                42
            ]
        });

        let record = normalize(&value);
        assert_eq!(record.risks.len(), 1);
        assert_eq!(record.risks[0].risk, "real");
        assert_eq!(record.risks[0].severity, "low");
    }

    #[test]
    fn test_citation_fields_default_when_missing() {
        let value = json!({"legal_citations": [{"law": "PDPA"}]});
        let record = normalize(&value);
        assert_eq!(record.legal_citations[0].law, "PDPA");
        assert_eq!(record.legal_citations[0].article, "");
        assert_eq!(record.legal_citations[0].jurisdiction, "");
    }

    #[test]
    fn test_unparsable_priority_defaults_to_one() {
        let value = json!({
            "implementation": [
                {"step": "a", "priority": "urgent"},
                {"step": "b", "priority": "3"},
                {"step": "c", "priority": 2.9},
                {"step": "d"}
            ]
        });

        let priorities: Vec<i64> = normalize(&value)
            .implementation
            .iter()
            .map(|s| s.priority)
            .collect();
        assert_eq!(priorities, vec![1, 3, 2, 1]);
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(normalize(&json!({"confidence": 1.7})).confidence, 1.0);
        assert_eq!(normalize(&json!({"confidence": -0.3})).confidence, 0.0);
        assert_eq!(normalize(&json!({"confidence": "0.4"})).confidence, 0.4);
        assert_eq!(normalize(&json!({"confidence": "n/a"})).confidence, 0.0);
        assert_eq!(normalize(&json!({})).confidence, 0.0);
    }

    #[test]
    fn test_notes_truncated_to_limit() {
        let value = json!({"notes": "x".repeat(1000)});
        assert_eq!(normalize(&value).notes.chars().count(), NOTES_MAX_CHARS);
    }

    #[test]
    fn test_boolean_fields_use_truthiness() {
        assert!(normalize(&json!({"need_geo_logic": 1})).need_geo_logic);
        assert!(normalize(&json!({"need_geo_logic": "yes"})).need_geo_logic);
        assert!(!normalize(&json!({"need_geo_logic": ""})).need_geo_logic);
        assert!(!normalize(&json!({"need_geo_logic": 0})).need_geo_logic);
        assert!(!normalize(&json!({"need_geo_logic": []})).need_geo_logic);
        assert!(!normalize(&json!({"consent_required": null})).consent_required);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let value = json!({
            "need_geo_logic": true,
            "jurisdictions": ["EU", "US-CA"],
            "legal_citations": [
                {"law": "GDPR", "article": "7(1)", "jurisdiction": "EU"}
            ],
            "data_categories": ["cookies"],
            "lawful_basis": ["consent"],
            "consent_required": true,
            "notes": "Advisory.",
            "risks": [
                {"risk": "r", "severity": "high", "mitigation": "m"}
            ],
            "implementation": [{"step": "s", "priority": 1}],
            "confidence": 0.55
        });

        let once = normalize(&value);
        let reserialized = serde_json::to_value(&once).unwrap();
        let twice = normalize(&reserialized);
        assert_eq!(once, twice);
    }
}
