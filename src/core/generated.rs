use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{AspectRatio, ImageStyle};
use super::error::HappuError;
use super::request::{preview, GenerationRequest};

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Filename used when exporting from the fullscreen preview
pub const PREVIEW_EXPORT_FILENAME: &str = "happu-asset-export.png";

/// A successful generation, as held in the gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    /// Unique id within the session (e.g., "hp_1a2b3c4d")
    pub id: String,

    /// Displayable image, `data:image/png;base64,...`
    pub url: String,

    /// Final composed prompt sent to the model
    pub prompt: String,

    /// Raw user text
    pub original_prompt: String,

    pub style: ImageStyle,

    pub aspect_ratio: AspectRatio,

    pub timestamp: DateTime<Utc>,
}

impl GeneratedImage {
    /// Build an entry from the request and a base64 PNG payload
    pub fn from_payload(request: &GenerationRequest, base64_data: &str) -> Self {
        let uuid = Uuid::new_v4();
        let id = format!("hp_{}", &uuid.simple().to_string()[..8]);

        Self {
            id,
            url: format!("{}{}", DATA_URI_PREFIX, base64_data),
            prompt: request.final_prompt(),
            original_prompt: request.prompt.clone(),
            style: request.style,
            aspect_ratio: request.aspect_ratio,
            timestamp: Utc::now(),
        }
    }

    /// Base64 payload of the data URI
    pub fn payload(&self) -> Option<&str> {
        self.url.strip_prefix(DATA_URI_PREFIX)
    }

    /// Decoded PNG bytes
    pub fn bytes(&self) -> Result<Vec<u8>, HappuError> {
        let payload = self.payload().ok_or_else(|| {
            HappuError::ImageError(format!("Image {} is not an inline PNG", self.id))
        })?;
        BASE64
            .decode(payload)
            .map_err(|e| HappuError::ImageError(format!("Failed to decode base64 image: {}", e)))
    }

    /// Filename used when exporting from the gallery grid
    pub fn export_filename(&self) -> String {
        format!("happu-export-{}.png", self.id)
    }

    pub fn prompt_preview(&self, max_chars: usize) -> String {
        preview(&self.original_prompt, max_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GeneratedImage {
        let request = GenerationRequest::new("a red fox")
            .with_style(ImageStyle::Anime)
            .with_aspect_ratio(AspectRatio::Wide);
        GeneratedImage::from_payload(&request, &BASE64.encode(b"\x89PNG fake"))
    }

    #[test]
    fn records_request_inputs() {
        let image = sample();
        assert_eq!(image.original_prompt, "a red fox");
        assert_eq!(image.style, ImageStyle::Anime);
        assert_eq!(image.aspect_ratio, AspectRatio::Wide);
        assert!(image.prompt.ends_with(ImageStyle::Anime.prompt_suffix()));
        assert!(image.url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn ids_are_unique_and_prefixed() {
        let a = sample();
        let b = sample();
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("hp_"));
        assert_eq!(a.id.len(), 11);
    }

    #[test]
    fn bytes_decode_the_payload() {
        assert_eq!(sample().bytes().unwrap(), b"\x89PNG fake");
    }

    #[test]
    fn remote_urls_have_no_inline_bytes() {
        let mut image = sample();
        image.url = "https://example.com/fox.png".to_string();
        assert!(image.payload().is_none());
        assert!(matches!(image.bytes(), Err(HappuError::ImageError(_))));
    }

    #[test]
    fn export_filename_embeds_the_id() {
        let image = sample();
        assert_eq!(image.export_filename(), format!("happu-export-{}.png", image.id));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["originalPrompt"], "a red fox");
        assert_eq!(json["aspectRatio"], "16:9");
        assert_eq!(json["style"], "Anime");
    }
}
