use super::error::HappuError;
use super::generated::GeneratedImage;
use super::request::GenerationRequest;
use crate::api::ImageGenerator;

/// Shown when a failure carries no message of its own
pub const FALLBACK_ERROR_MESSAGE: &str = "Engine encountered an unexpected interruption.";

/// Session state: generated images (most recent first) plus the
/// generating/error flags the form renders.
#[derive(Debug, Default)]
pub struct Workspace {
    images: Vec<GeneratedImage>,
    is_generating: bool,
    error: Option<String>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[GeneratedImage] {
        &self.images
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<&GeneratedImage> {
        self.images.iter().find(|image| image.id == id)
    }

    /// Enter the generating state
    pub fn begin(&mut self) {
        self.is_generating = true;
        self.error = None;
    }

    /// Apply the outcome of a generation call
    pub fn complete(&mut self, result: Result<GeneratedImage, HappuError>) {
        match result {
            Ok(image) => {
                tracing::info!("Generated {} ({})", image.id, image.aspect_ratio);
                self.images.insert(0, image);
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!("Generation failed: {}", message);
                self.error = Some(if message.trim().is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_string()
                } else {
                    message
                });
            }
        }
        self.is_generating = false;
    }

    /// Run one generation to completion
    pub async fn submit<G>(&mut self, generator: &G, request: GenerationRequest)
    where
        G: ImageGenerator + ?Sized,
    {
        self.begin();
        let result = generator.generate(&request).await;
        self.complete(result);
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|image| image.id != id);
        before != self.images.len()
    }
}
