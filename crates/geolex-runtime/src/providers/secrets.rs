//! Credential handling for generation providers.
//!
//! Endpoint tokens are wrapped in [`ApiCredential`] so they cannot be
//! accidentally printed via `Debug` and are zeroed on drop. The value must
//! be explicitly exposed via [`ApiCredential::expose`] at the point of use.

use secrecy::{ExposeSecret, SecretString};

use super::ProviderError;

/// Where a credential was loaded from. Tracked for debugging without
/// revealing the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable
    Environment,

    /// Supplied in a configuration value
    Config,

    /// Passed directly in code
    Programmatic,
}

/// A secret credential that resists accidental exposure.
pub struct ApiCredential {
    value: SecretString,
    source: CredentialSource,
    name: &'static str,
}

impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredential")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl ApiCredential {
    /// Wrap a credential value.
    pub fn new(value: impl Into<String>, source: CredentialSource, name: &'static str) -> Self {
        Self {
            value: SecretString::from(value.into()),
            source,
            name,
        }
    }

    /// Load a credential from an environment variable.
    ///
    /// The variable's value is never logged.
    pub fn from_env(env_var: &str, name: &'static str) -> Result<Self, ProviderError> {
        match std::env::var(env_var) {
            Ok(value) if !value.is_empty() => {
                Ok(Self::new(value, CredentialSource::Environment, name))
            }
            _ => Err(ProviderError::NotConfigured(format!(
                "{} required: set {} env",
                name, env_var
            ))),
        }
    }

    /// Load a credential from an environment variable if it is set.
    pub fn from_env_optional(env_var: &str, name: &'static str) -> Option<Self> {
        Self::from_env(env_var, name).ok()
    }

    /// Expose the secret value. Call only at the point of use.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    /// Whether the wrapped value is empty.
    pub fn is_empty(&self) -> bool {
        self.value.expose_secret().is_empty()
    }

    /// Where the credential came from.
    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// Human-readable credential name (e.g., "endpoint token").
    pub fn name(&self) -> &'static str {
        self.name
    }
}
