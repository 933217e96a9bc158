use serde::{Deserialize, Serialize};

use super::catalog::{AspectRatio, ImageStyle};
use super::error::HappuError;

/// A single submission from the form or the `generate` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Raw prompt text, exactly as the user typed it
    pub prompt: String,

    #[serde(default)]
    pub style: ImageStyle,

    #[serde(default)]
    pub aspect_ratio: AspectRatio,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style: ImageStyle::default(),
            aspect_ratio: AspectRatio::default(),
        }
    }

    pub fn with_style(mut self, style: ImageStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Prompt text with the style suffix appended, as sent to the model
    pub fn final_prompt(&self) -> String {
        format!("{}. {}", self.prompt, self.style.prompt_suffix())
            .trim()
            .to_string()
    }

    pub fn validate(&self) -> Result<(), HappuError> {
        if self.prompt.trim().is_empty() {
            return Err(HappuError::InvalidParameter(
                "Prompt must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the prompt (truncated for display)
    pub fn prompt_preview(&self, max_chars: usize) -> String {
        preview(&self.prompt, max_chars)
    }
}

/// Truncate on a char boundary, marking the cut with an ellipsis
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_prompt_appends_the_style_suffix() {
        let request = GenerationRequest::new("a red fox").with_style(ImageStyle::Anime);
        assert_eq!(
            request.final_prompt(),
            format!("a red fox. {}", ImageStyle::Anime.prompt_suffix())
        );
    }

    #[test]
    fn final_prompt_is_trimmed_when_style_is_none() {
        let request = GenerationRequest::new("  lighthouse at dusk ").with_style(ImageStyle::None);
        assert_eq!(request.final_prompt(), "lighthouse at dusk .");
    }

    #[test]
    fn blank_prompts_fail_validation() {
        assert!(GenerationRequest::new("").validate().is_err());
        assert!(GenerationRequest::new(" \t\n").validate().is_err());
        assert!(GenerationRequest::new("x").validate().is_ok());
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("ééééééééééé", 6), "ééé...");
    }
}
