//! `guide-pharma-ai`
//!
//! **Responsibility:** external AI capability boundary.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It must not depend on the ordering aggregate or mutate domain state.
//! - It sends a reduced catalog view (`{id, name, category}` only) over the
//!   wire; prices and pack fields never leave the process.
//! - Every call is gated on a usable access credential first; a missing
//!   credential is a distinct, actionable condition, not a generic failure.

pub mod capability;
pub mod credentials;
pub mod error;
pub mod gemini;
pub mod search;

pub use capability::{AiCapability, CatalogView, GeneratedImage, ImageSize};
pub use credentials::{CredentialProvider, EnvCredentialProvider, StaticCredential};
pub use error::AiError;
pub use gemini::GeminiClient;
pub use search::{SearchCoordinator, SearchOutcome};
