//! # geolex-runtime
//!
//! Text-generation collaborator plumbing for Geolex.
//!
//! The resolution engine in `geolex-core` is pure and deterministic; this
//! crate owns everything latency-bound and failure-prone around it: the
//! generation backend abstraction, HTTP endpoint client with retry and
//! timeouts, prompt construction, and the analyzer that wires generation
//! to resolution.
//!
//! ## Important
//!
//! A backend failure never surfaces to the caller of
//! [`ComplianceAnalyzer::analyze`]: the heuristic classifier runs over the
//! feature text alone and the failure is recorded in the analysis
//! metadata.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use geolex_runtime::{ComplianceAnalyzer, EndpointGenerator, GenerationConfig};
//!
//! let generator = EndpointGenerator::new(
//!     "https://inference.example.com/",
//!     &GenerationConfig::default(),
//! )?;
//! let analyzer = ComplianceAnalyzer::new(Arc::new(generator));
//!
//! let analysis = analyzer.analyze("Cookie banner for EU users").await;
//! println!("{}", serde_json::to_string_pretty(&analysis)?);
//! ```

pub mod analyzer;
pub mod prompts;
pub mod providers;

// Re-export main types at crate root
pub use analyzer::{
    Analysis, AnalysisDebug, AnalysisMetadata, AnalyzerConfig, ComplianceAnalyzer,
    DEBUG_TEXT_MAX_CHARS,
};
pub use providers::{
    ApiCredential, CredentialSource, GenerationConfig, ProviderError, TextGenerator,
};

#[cfg(feature = "endpoint")]
pub use providers::{EndpointGenerator, ENDPOINT_TOKEN_ENV};
