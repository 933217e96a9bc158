mod types;

use async_trait::async_trait;
use reqwest::Client;

pub use types::*;

use crate::config::Config;
use crate::core::{GeneratedImage, GenerationRequest, HappuError};
use crate::http_client::HTTP_CLIENT;

/// Anything that can turn a request into a generated image.
///
/// The workspace drives generations through this trait so the TUI and the
/// `generate` command share one flow, and tests can swap in a stub.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage, HappuError>;
}

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http: HTTP_CLIENT.clone(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Create a new client from config. A missing key is passed through as
    /// an empty string; the API rejects it on the first call.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key().unwrap_or_default(),
            &config.api.base_url,
            &config.api.model,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Call generateContent once and return the raw response
    pub async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerateResponse, HappuError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = build_generate_request(request);

        tracing::debug!("Sending generate request to: {}", url);
        tracing::debug!("Request body: {}", serde_json::to_string(&body)?);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.error.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or(text);
            return Err(HappuError::Api {
                message,
                source: None,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            HappuError::InvalidResponse(format!("Failed to parse Gemini API response: {}", e))
        })
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage, HappuError> {
        request.validate()?;

        let response = self.generate_content(request).await?;

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            tracing::warn!("Prompt blocked: {}", reason);
        }

        let inline = response.first_inline_image().ok_or_else(|| {
            let reason = response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("none");
            tracing::warn!("No inline image in response (finish reason: {})", reason);
            HappuError::NoImageData
        })?;

        Ok(GeneratedImage::from_payload(request, &inline.data))
    }
}

/// Build the API request body
fn build_generate_request(request: &GenerationRequest) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![ContentPart::text(request.final_prompt())],
            role: None,
        }],
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
            image_config: Some(ImageConfig {
                aspect_ratio: Some(request.aspect_ratio.as_str().to_string()),
            }),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::NO_IMAGE_DATA_MESSAGE;
    use crate::core::{AspectRatio, ImageStyle, Workspace};
    use httpmock::prelude::*;
    use serde_json::json;

    const MODEL: &str = "gemini-2.5-flash-image";

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClient::new("TEST", server.base_url(), MODEL)
    }

    fn fox() -> GenerationRequest {
        GenerationRequest::new("a red fox")
            .with_style(ImageStyle::Anime)
            .with_aspect_ratio(AspectRatio::Wide)
    }

    #[tokio::test]
    async fn generates_an_image_from_the_first_inline_part() {
        let server = MockServer::start_async().await;
        let request = fox();

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(format!("/models/{}:generateContent", MODEL))
                    .header("x-goog-api-key", "TEST")
                    .json_body(json!({
                        "contents": [{ "parts": [{ "text": request.final_prompt() }] }],
                        "generationConfig": {
                            "responseModalities": ["TEXT", "IMAGE"],
                            "imageConfig": { "aspectRatio": "16:9" }
                        }
                    }));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "candidates": [{
                            "content": { "role": "model", "parts": [
                                { "text": "A fox, as requested." },
                                { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } }
                            ]},
                            "finishReason": "STOP"
                        }]
                    }));
            })
            .await;

        let image = client(&server).generate(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(image.style, ImageStyle::Anime);
        assert_eq!(image.aspect_ratio, AspectRatio::Wide);
        assert_eq!(image.original_prompt, "a red fox");
        assert!(image.prompt.ends_with(ImageStyle::Anime.prompt_suffix()));
        assert_eq!(image.url, "data:image/png;base64,iVBORw0KGgo=");
    }

    #[tokio::test]
    async fn response_without_inline_image_is_no_image_data() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({
                    "candidates": [{
                        "content": { "parts": [{ "text": "I can't draw that." }] },
                        "finishReason": "STOP"
                    }]
                }));
            })
            .await;

        let gemini = client(&server);
        let err = gemini.generate(&fox()).await.unwrap_err();
        assert!(matches!(err, HappuError::NoImageData));

        let mut ws = Workspace::new();
        ws.submit(&gemini, fox()).await;
        assert_eq!(ws.error(), Some(NO_IMAGE_DATA_MESSAGE));
        assert!(ws.images().is_empty());
    }

    #[tokio::test]
    async fn api_errors_carry_the_upstream_message() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(400).json_body(json!({
                    "error": {
                        "code": 400,
                        "message": "API key not valid. Please pass a valid API key.",
                        "status": "INVALID_ARGUMENT"
                    }
                }));
            })
            .await;

        let err = client(&server).generate(&fox()).await.unwrap_err();

        assert_eq!(mock.hits_async().await, 1);
        assert_eq!(err.to_string(), "API key not valid. Please pass a valid API key.");
    }

    #[tokio::test]
    async fn non_json_error_bodies_are_passed_through() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(503).body("upstream unavailable");
            })
            .await;

        let err = client(&server).generate(&fox()).await.unwrap_err();
        assert_eq!(err.to_string(), "upstream unavailable");
    }

    #[tokio::test]
    async fn blank_prompts_never_reach_the_api() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({}));
            })
            .await;

        let err = client(&server)
            .generate(&GenerationRequest::new("   "))
            .await
            .unwrap_err();

        assert!(matches!(err, HappuError::InvalidParameter(_)));
        assert_eq!(mock.hits_async().await, 0);
    }
}
