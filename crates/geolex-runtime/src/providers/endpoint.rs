//! HTTP inference-endpoint generator.
//!
//! Talks to a hosted text-generation endpoint that accepts
//! `{"instruction", "input", "temperature", "max_new_tokens"}` and returns
//! `{"generated_text": "..."}`. Transient failures are retried with
//! exponential backoff per [`GenerationConfig::max_retries`].
//!
//! ## Security
//!
//! The optional bearer token uses [`ApiCredential`]; see the
//! [`secrets`](super::secrets) module.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use serde::{Deserialize, Serialize};

use super::{
    secrets::{ApiCredential, CredentialSource},
    GenerationConfig, ProviderError, TextGenerator,
};

/// Environment variable for the endpoint bearer token.
pub const ENDPOINT_TOKEN_ENV: &str = "GEOLEX_API_TOKEN";

/// Generator backed by an HTTP inference endpoint.
pub struct EndpointGenerator {
    url: String,
    credential: Option<ApiCredential>,
    client: reqwest::Client,
}

impl std::fmt::Debug for EndpointGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointGenerator")
            .field("url", &self.url)
            .field("credential", &self.credential)
            .finish()
    }
}

/// Request body the endpoint expects.
#[derive(Debug, Serialize)]
struct EndpointRequest<'a> {
    instruction: &'a str,
    input: &'a str,
    temperature: f32,
    max_new_tokens: u32,
}

/// Response body the endpoint returns.
#[derive(Debug, Deserialize)]
struct EndpointResponse {
    #[serde(default)]
    generated_text: String,
}

impl EndpointGenerator {
    /// Create a generator for an endpoint URL.
    ///
    /// The bearer token is read from `GEOLEX_API_TOKEN` when set; endpoints
    /// without authentication work without it.
    pub fn new(url: impl Into<String>, config: &GenerationConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ProviderError::HttpError(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            credential: ApiCredential::from_env_optional(ENDPOINT_TOKEN_ENV, "endpoint token"),
            client,
        })
    }

    /// Set the bearer token explicitly.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.credential = Some(ApiCredential::new(
            token,
            CredentialSource::Programmatic,
            "endpoint token",
        ));
        self
    }

    async fn send_once(
        &self,
        instruction: &str,
        input: &str,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        let request = EndpointRequest {
            instruction,
            input,
            temperature: config.temperature,
            max_new_tokens: config.max_new_tokens,
        };

        let mut builder = self
            .client
            .post(&self.url)
            .timeout(config.read_timeout)
            .json(&request);

        // SECURITY: only expose the credential here, at the point of use
        if let Some(credential) = &self.credential {
            builder = builder.bearer_auth(credential.expose());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(config.read_timeout)
            } else {
                ProviderError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthError);
        }

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(std::time::Duration::from_secs);
            return Err(ProviderError::RateLimited { retry_after });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: EndpointResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(body.generated_text)
    }
}

#[async_trait]
impl TextGenerator for EndpointGenerator {
    async fn generate(
        &self,
        instruction: &str,
        input: &str,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        (|| self.send_once(instruction, input, config))
            .retry(
                ExponentialBuilder::default().with_max_times(config.max_retries),
            )
            .when(ProviderError::is_transient)
            .notify(|err, delay| {
                tracing::warn!(error = %err, delay = ?delay, "endpoint call failed, retrying");
            })
            .await
    }

    async fn health_check(&self) -> bool {
        self.client.get(&self.url).send().await.is_ok()
    }

    fn name(&self) -> &str {
        "endpoint"
    }
}
