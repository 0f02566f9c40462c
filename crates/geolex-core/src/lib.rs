//! # geolex-core
//!
//! Deterministic geo-compliance response-resolution engine.
//!
//! This crate turns raw, possibly malformed generated text plus the
//! original feature description into a structured [`ComplianceRecord`],
//! answering:
//! - Does this feature need jurisdiction-aware logic?
//! - Which laws apply, and what do they require?
//! - What should the implementation do about it?
//!
//! ## Key Guarantees
//!
//! 1. **Total**: [`resolve`] always returns a well-formed record; there is
//!    no fatal error path
//! 2. **Deterministic**: same inputs always produce the same record
//! 3. **Pure**: no I/O, no locks, no shared mutable state; safe to call
//!    concurrently from arbitrarily many callers
//!
//! ## Pipeline
//!
//! Raw generated text runs through extraction ([`extract`]), lenient
//! parsing ([`parse`]) and normalization ([`normalize`]). When any stage
//! yields nothing usable, the heuristic classifier ([`heuristics`]) derives
//! an equivalent record directly from the text using fixed rule tables.
//!
//! ## Example
//!
//! ```rust
//! use geolex_core::resolve;
//!
//! let generated = r#"Sure! {"need_geo_logic": true, "jurisdictions": ["EU"], "confidence": 0.8}"#;
//! let record = resolve(generated, "Cookie banner for EU users");
//!
//! assert!(record.need_geo_logic);
//! assert_eq!(record.jurisdictions, vec!["EU"]);
//! ```

pub mod extract;
pub mod heuristics;
pub mod normalize;
pub mod parse;
pub mod record;
pub mod resolver;

// Re-export main types at crate root
pub use record::{
    ComplianceRecord, ImplementationStep, LegalCitation, Risk, NOTES_MAX_CHARS,
};
pub use resolver::{
    resolve, resolve_detailed, FallbackReason, Resolution, ResolutionSource,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_path_end_to_end() {
        let generated = concat!(
            r#"Here is the analysis: {"need_geo_logic": true, "jurisdictions": ["EU"], "#,
            r#""legal_citations": [{"law": "GDPR", "article": "7(1)", "jurisdiction": "EU"}], "#,
            r#""consent_required": true, "confidence": 0.85, }"#,
        );

        let record = resolve(generated, "Cookie consent banner");
        assert!(record.need_geo_logic);
        assert!(record.consent_required);
        assert_eq!(record.legal_citations[0].law, "GDPR");
        assert_eq!(record.confidence, 0.85);
    }

    #[test]
    fn test_heuristic_path_end_to_end() {
        let record = resolve(
            "I could not produce JSON, sorry.",
            "Show a consent banner to EU users before dropping non-essential cookies",
        );

        assert_eq!(record.jurisdictions, vec!["EU"]);
        assert!(record.consent_required);
        assert!(record.need_geo_logic);
        assert_eq!(record.confidence, 0.55);
    }
}
