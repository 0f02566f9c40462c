//! Text-generation provider abstractions.
//!
//! This module defines the trait for generation backends and includes an
//! HTTP inference-endpoint implementation behind the `endpoint` feature.
//!
//! ## Security
//!
//! Providers use the [`secrets`] module for credential handling. See
//! [`ApiCredential`] for the patterns.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod secrets;

#[cfg(feature = "endpoint")]
mod endpoint;

pub use secrets::{ApiCredential, CredentialSource};

#[cfg(feature = "endpoint")]
pub use endpoint::{EndpointGenerator, ENDPOINT_TOKEN_ENV};

/// Errors from generation providers.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Rate limit exceeded, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("Authentication failed")]
    AuthError,

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Whether retrying the call could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::HttpError(_)
                | ProviderError::Timeout(_)
                | ProviderError::RateLimited { .. }
        )
    }
}

/// Configuration for a generation request.
///
/// Defaults follow the serving profile: a short structured-JSON completion
/// at low temperature, with tight connect/read timeouts and two retries.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Maximum tokens to generate
    pub max_new_tokens: u32,

    /// Sampling temperature (low for consistent structured output)
    pub temperature: f32,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Read timeout for the full response
    pub read_timeout: Duration,

    /// Retries on transient failures
    pub max_retries: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: 350,
            temperature: 0.1,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(25),
            max_retries: 2,
        }
    }
}

/// Generation backend abstraction.
///
/// The resolution engine consumes this as an opaque
/// "generate(prompt) -> text, or failure" call; everything downstream of
/// the returned text is deterministic.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate raw text for an instruction and feature input.
    async fn generate(
        &self,
        instruction: &str,
        input: &str,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError>;

    /// Check if the backend is reachable and configured.
    async fn health_check(&self) -> bool;

    /// Backend name for logging and metadata.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_match_serving_profile() {
        let config = GenerationConfig::default();
        assert_eq!(config.max_new_tokens, 350);
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_secs(25));
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn test_transient_classification() {
        assert!(ProviderError::HttpError("reset".into()).is_transient());
        assert!(ProviderError::Timeout(Duration::from_secs(5)).is_transient());
        assert!(ProviderError::RateLimited { retry_after: None }.is_transient());

        assert!(!ProviderError::AuthError.is_transient());
        assert!(!ProviderError::ParseError("bad".into()).is_transient());
        assert!(!ProviderError::ApiError {
            status: 500,
            message: "boom".into()
        }
        .is_transient());
    }
}
