//! Compliance analyzer: generation wired to resolution.
//!
//! The analyzer builds the prompt, calls the generation backend, and runs
//! the deterministic resolution engine over whatever came back. A backend
//! failure is absorbed: the classifier runs over the feature text alone,
//! so `analyze` never fails.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use geolex_core::{resolve_detailed, ComplianceRecord, ResolutionSource};

use crate::prompts;
use crate::providers::{GenerationConfig, TextGenerator};

/// Cap on raw generated text captured into debug output, in characters.
pub const DEBUG_TEXT_MAX_CHARS: usize = 4000;

/// Analyzer configuration.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Base instruction sent to the backend
    pub instruction: String,

    /// Generation parameters
    pub generation: GenerationConfig,

    /// Capture raw generated text and the extracted candidate
    pub capture_debug: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            instruction: prompts::DEFAULT_INSTRUCTION.to_string(),
            generation: GenerationConfig::default(),
            capture_debug: false,
        }
    }
}

/// Metadata about how an analysis was produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// Backend name
    pub model: String,

    /// Which path produced the record
    pub source: ResolutionSource,

    /// Wall-clock generation latency in milliseconds
    pub latency_ms: f64,

    /// When the analysis ran
    pub analyzed_at: DateTime<Utc>,

    /// Length of the feature description, in characters
    pub input_chars: usize,

    /// Backend failure message, when generation failed and the classifier
    /// ran over the feature text alone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator_error: Option<String>,
}

/// Raw material behind an analysis, for debugging.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisDebug {
    /// Raw generated text, truncated to [`DEBUG_TEXT_MAX_CHARS`]
    pub generated_text: String,

    /// Candidate object substring the extractor isolated, if any
    pub extracted_candidate: Option<String>,
}

/// A completed analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// The compliance decision
    pub compliance: ComplianceRecord,

    /// Provenance and timing
    pub metadata: AnalysisMetadata,

    /// Present when debug capture is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<AnalysisDebug>,
}

/// Wires a generation backend to the resolution engine.
pub struct ComplianceAnalyzer {
    generator: Arc<dyn TextGenerator>,
    config: AnalyzerConfig,
}

impl ComplianceAnalyzer {
    /// Create an analyzer with default configuration.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self::with_config(generator, AnalyzerConfig::default())
    }

    /// Create an analyzer with explicit configuration.
    pub fn with_config(generator: Arc<dyn TextGenerator>, config: AnalyzerConfig) -> Self {
        Self { generator, config }
    }

    /// Analyze a feature description.
    ///
    /// Always returns an [`Analysis`]; a backend failure degrades to the
    /// heuristic path with the failure recorded in the metadata.
    pub async fn analyze(&self, feature_text: &str) -> Analysis {
        let instruction = prompts::build_instruction(&self.config.instruction);

        let started = Instant::now();
        let (generated, generator_error) = match self
            .generator
            .generate(&instruction, feature_text, &self.config.generation)
            .await
        {
            Ok(text) => (text, None),
            Err(err) => {
                tracing::warn!(
                    backend = self.generator.name(),
                    error = %err,
                    "generation failed, classifying feature text directly"
                );
                (String::new(), Some(err.to_string()))
            }
        };
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        let resolution = resolve_detailed(&generated, feature_text);
        tracing::info!(
            backend = self.generator.name(),
            source = ?resolution.source,
            latency_ms,
            "analysis complete"
        );

        let debug = self.config.capture_debug.then(|| AnalysisDebug {
            generated_text: generated.chars().take(DEBUG_TEXT_MAX_CHARS).collect(),
            extracted_candidate: resolution.candidate.clone(),
        });

        Analysis {
            compliance: resolution.record,
            metadata: AnalysisMetadata {
                model: self.generator.name().to_string(),
                source: resolution.source,
                latency_ms,
                analyzed_at: Utc::now(),
                input_chars: feature_text.chars().count(),
                generator_error,
            },
            debug,
        }
    }
}
