use thiserror::Error;

/// Failures at the external AI boundary.
///
/// None of these are fatal; callers surface them and the user action can be
/// retried. Domain state is never touched by a failed call.
#[derive(Debug, Error)]
pub enum AiError {
    /// No usable access credential is configured and none could be obtained.
    /// Surfaced distinctly so callers can prompt for a key instead of showing
    /// a generic failure.
    #[error("api credential required")]
    CredentialRequired,

    /// The request was rejected locally before being sent.
    #[error("invalid request input: {0}")]
    InvalidInput(String),

    /// The remote call failed (network, timeout, non-success status).
    #[error("ai service call failed: {0}")]
    ServiceFailure(String),

    /// The remote call succeeded but returned data we cannot use.
    #[error("unusable ai response: {0}")]
    MalformedResponse(String),
}
