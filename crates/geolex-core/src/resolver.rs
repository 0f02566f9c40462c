//! Decision resolver: extraction, parsing, normalization, then heuristic
//! fallback.
//!
//! The resolver's postcondition is that it always returns a well-formed
//! [`ComplianceRecord`], however malformed its inputs are. Failures in the
//! model path are absorbed, not reported; the only trace they leave is the
//! [`FallbackReason`] on the detailed result.

use serde::Serialize;
use thiserror::Error;

use crate::extract::extract_object;
use crate::heuristics::classify;
use crate::normalize::normalize;
use crate::parse::parse_lenient;
use crate::record::ComplianceRecord;

/// Which path produced the final record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// The record was recovered from the generated text
    Model,

    /// The record was derived by the heuristic classifier
    Heuristic,
}

/// Why the model path was abandoned. Diagnostic only; the resolver never
/// raises.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    #[error("no balanced JSON object found in generated text")]
    ExtractionFailure,

    #[error("candidate was not valid JSON after trailing-comma repair")]
    ParseFailure,
}

/// Outcome of a resolution call, with provenance for debug surfaces.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The final, always well-formed record
    pub record: ComplianceRecord,

    /// Which path produced it
    pub source: ResolutionSource,

    /// The candidate substring the extractor isolated, if any
    pub candidate: Option<String>,

    /// Set when the heuristic path was taken
    pub fallback: Option<FallbackReason>,
}

/// Resolve a compliance record from generated text, falling back to the
/// heuristic classifier when the text is unusable.
pub fn resolve(generated_text: &str, feature_text: &str) -> ComplianceRecord {
    resolve_detailed(generated_text, feature_text).record
}

/// Like [`resolve`], additionally reporting which path produced the record.
pub fn resolve_detailed(generated_text: &str, feature_text: &str) -> Resolution {
    let Some(candidate) = extract_object(generated_text) else {
        tracing::debug!("no object candidate in generated text, using heuristic rules");
        return heuristic_resolution(generated_text, feature_text, None, FallbackReason::ExtractionFailure);
    };

    let Some(value) = parse_lenient(&candidate) else {
        tracing::debug!(
            candidate_len = candidate.len(),
            "candidate did not parse, using heuristic rules"
        );
        return heuristic_resolution(
            generated_text,
            feature_text,
            Some(candidate),
            FallbackReason::ParseFailure,
        );
    };

    tracing::debug!(candidate_len = candidate.len(), "normalized model output");
    Resolution {
        record: normalize(&value),
        source: ResolutionSource::Model,
        candidate: Some(candidate),
        fallback: None,
    }
}

fn heuristic_resolution(
    generated_text: &str,
    feature_text: &str,
    candidate: Option<String>,
    reason: FallbackReason,
) -> Resolution {
    Resolution {
        record: classify(generated_text, feature_text),
        source: ResolutionSource::Heuristic,
        candidate,
        fallback: Some(reason),
    }
}
