//! Access-credential gating for external AI calls.

use crate::error::AiError;

/// Supplies the access credential for the external AI service.
///
/// `ensure_key` is the gate every external call goes through: it resolves a
/// usable key or fails with [`AiError::CredentialRequired`] **before** any
/// network attempt is made.
pub trait CredentialProvider: Send + Sync {
    /// The currently configured key, if any. Empty strings count as absent.
    fn api_key(&self) -> Option<String>;

    /// Ask the hosting environment for a key (e.g. prompt the user).
    ///
    /// The default implementation has no prompting capability and reports the
    /// credential as required.
    fn request_key(&self) -> Result<String, AiError> {
        Err(AiError::CredentialRequired)
    }

    /// Resolve a usable key, prompting if necessary.
    fn ensure_key(&self) -> Result<String, AiError> {
        match self.api_key() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => self.request_key(),
        }
    }
}

/// Reads the credential from an environment variable (`API_KEY` by default).
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    var: String,
}

impl EnvCredentialProvider {
    pub fn new() -> Self {
        Self::from_var("API_KEY")
    }

    pub fn from_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|v| !v.is_empty())
    }
}

/// Fixed credential, mainly for tests and wiring demos.
#[derive(Debug, Clone)]
pub struct StaticCredential(pub String);

impl CredentialProvider for StaticCredential {
    fn api_key(&self) -> Option<String> {
        if self.0.is_empty() { None } else { Some(self.0.clone()) }
    }
}
