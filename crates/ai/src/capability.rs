//! The capability contract the core depends on.
//!
//! Transport, authentication mechanics and model identity are collaborator
//! details; the only contract here is the request payload and response shape.

use serde::Serialize;

use guide_pharma_catalog::{Catalog, MedicineCategory};
use guide_pharma_core::MedicineId;

use crate::error::AiError;

/// One catalog entry as sent to the matcher: id, name and category only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct CatalogViewEntry {
    id: MedicineId,
    name: String,
    category: MedicineCategory,
}

/// The reduced catalog view submitted with a matching request.
///
/// Price and pack fields are deliberately absent from the type, so they can
/// never end up on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CatalogView {
    entries: Vec<CatalogViewEntry>,
}

impl CatalogView {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let entries = catalog
            .medicines()
            .iter()
            .map(|m| CatalogViewEntry {
                id: m.id,
                name: m.name.clone(),
                category: m.category,
            })
            .collect();
        Self { entries }
    }

    pub fn contains(&self, id: MedicineId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }
}

/// Requested resolution tier for image generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    OneK,
    TwoK,
    FourK,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::OneK => "1K",
            ImageSize::TwoK => "2K",
            ImageSize::FourK => "4K",
        }
    }
}

impl core::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated image as returned by the visual generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    /// Base64-encoded image bytes, exactly as received.
    pub base64_data: String,
}

impl GeneratedImage {
    /// Render as a `data:` URL for direct embedding.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

/// The external AI capability: semantic inventory matching plus marketing
/// image generation.
///
/// Implementations perform a single attempt per call; no retry policy is
/// imposed here. A failed or malformed call must leave all domain state
/// untouched — implementations only ever *read* the supplied view.
///
/// The real collaborator is non-deterministic and network-bound, so the core
/// is written against this trait and tested with deterministic fakes.
#[allow(async_fn_in_trait)]
pub trait AiCapability: Send + Sync {
    /// Match a free-text query (organ/condition) against the supplied catalog
    /// view and return the matching medicine ids.
    ///
    /// An empty result means "no match" and is not an error. The id order
    /// carries no meaning and may differ between calls with the same query.
    async fn match_medicines(
        &self,
        query: &str,
        catalog: &CatalogView,
    ) -> Result<Vec<MedicineId>, AiError>;

    /// Generate a marketing image for a prompt at the requested size.
    async fn generate_image(
        &self,
        prompt: &str,
        size: ImageSize,
    ) -> Result<GeneratedImage, AiError>;
}
