//! Gemini-backed implementation of the AI capability.
//!
//! Talks to the `generateContent` REST endpoint. Each user action is a single
//! attempt; failures surface immediately and are retried only by the user.

use core::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use guide_pharma_core::MedicineId;

use crate::capability::{AiCapability, CatalogView, GeneratedImage, ImageSize};
use crate::credentials::CredentialProvider;
use crate::error::AiError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MATCH_MODEL: &str = "gemini-2.5-flash";
const IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

/// Per-request deadline. The domain mandates no value; this one suits an
/// interactive client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Gemini API.
///
/// The credential gate runs before every request: with no usable key the call
/// fails as [`AiError::CredentialRequired`] and nothing is sent.
#[derive(Debug, Clone)]
pub struct GeminiClient<C> {
    http: reqwest::Client,
    credentials: C,
    base_url: String,
}

impl<C: CredentialProvider> GeminiClient<C> {
    pub fn new(credentials: C) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the endpoint, e.g. to point tests at a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        let key = self.credentials.ensure_key()?;
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        tracing::debug!(model, "dispatching generateContent request");
        let response = self
            .http
            .post(&url)
            .query(&[("key", key.as_str())])
            .timeout(REQUEST_TIMEOUT)
            .json(request)
            .send()
            .await
            .map_err(|e| AiError::ServiceFailure(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| AiError::ServiceFailure(e.to_string()))?;

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| AiError::MalformedResponse(e.to_string()))
    }
}

impl<C: CredentialProvider> AiCapability for GeminiClient<C> {
    async fn match_medicines(
        &self,
        query: &str,
        catalog: &CatalogView,
    ) -> Result<Vec<MedicineId>, AiError> {
        if query.trim().is_empty() {
            return Err(AiError::InvalidInput("query must not be empty".to_string()));
        }

        let inventory = serde_json::to_string(catalog)
            .map_err(|e| AiError::InvalidInput(e.to_string()))?;
        let prompt = format!(
            "You are an expert pharmacist AI for GUIDE-PHARMA.\n\n\
             User Query: \"{query}\"\n\n\
             Inventory: {inventory}\n\n\
             Task: Identify which medicines from the Inventory are used to treat \
             the condition or relate to the organ mentioned in the User Query.\n\
             Return ONLY a JSON array containing the 'id' strings of the matching \
             medicines.\n\
             If no medicines match, return an empty array [].\n\
             Do not include any explanation, only the JSON."
        );

        let request = GenerateContentRequest {
            contents: vec![Content::text(prompt)],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(json!({
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                })),
                image_config: None,
            }),
        };

        let response = self.generate_content(MATCH_MODEL, &request).await?;
        let text = response
            .first_text()
            .ok_or_else(|| AiError::MalformedResponse("no text candidate".to_string()))?;
        parse_match_ids(&text)
    }

    async fn generate_image(
        &self,
        prompt: &str,
        size: ImageSize,
    ) -> Result<GeneratedImage, AiError> {
        if prompt.trim().is_empty() {
            return Err(AiError::InvalidInput("prompt must not be empty".to_string()));
        }

        let request = GenerateContentRequest {
            contents: vec![Content::text(prompt.to_string())],
            generation_config: Some(GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                image_config: Some(ImageConfig {
                    aspect_ratio: "1:1".to_string(),
                    image_size: size.as_str().to_string(),
                }),
            }),
        };

        let response = self.generate_content(IMAGE_MODEL, &request).await?;
        response
            .first_inline_image()
            .ok_or_else(|| AiError::MalformedResponse("no image content generated".to_string()))
    }
}

/// Decode the matcher's JSON payload into medicine ids.
///
/// A body that is not a JSON string array is unusable as a whole; individual
/// unparseable ids are dropped so a partially garbled answer still degrades
/// to its valid subset. Ids unknown to the submitted view are the caller's
/// concern (see `SearchCoordinator`).
fn parse_match_ids(text: &str) -> Result<Vec<MedicineId>, AiError> {
    let raw_ids: Vec<String> = serde_json::from_str(text)
        .map_err(|e| AiError::MalformedResponse(format!("expected JSON id array: {e}")))?;

    Ok(raw_ids
        .iter()
        .filter_map(|raw| match MedicineId::from_str(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!(%raw, "matcher returned an unparseable medicine id");
                None
            }
        })
        .collect())
}

#[derive(Debug, Clone, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(text: String) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text),
                inline_data: None,
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(
        default,
        rename = "inlineData",
        skip_serializing_if = "Option::is_none"
    )]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InlineData {
    #[serde(default, rename = "mimeType")]
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Clone, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(rename = "imageConfig", skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Clone, Serialize)]
struct ImageConfig {
    #[serde(rename = "aspectRatio")]
    aspect_ratio: String,
    #[serde(rename = "imageSize")]
    image_size: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<String> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.text.clone())
    }

    fn first_inline_image(&self) -> Option<GeneratedImage> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| {
                p.inline_data.as_ref().map(|inline| GeneratedImage {
                    mime_type: inline
                        .mime_type
                        .clone()
                        .unwrap_or_else(|| "image/png".to_string()),
                    base64_data: inline.data.clone(),
                })
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}
