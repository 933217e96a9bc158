use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::HappuError;

/// Icon shown next to a style preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleIcon {
    Palette,
    Camera,
    Film,
    User,
    Sparkles,
    Package,
    Zap,
    Brush,
}

impl StyleIcon {
    pub fn name(&self) -> &'static str {
        match self {
            StyleIcon::Palette => "palette",
            StyleIcon::Camera => "camera",
            StyleIcon::Film => "film",
            StyleIcon::User => "user",
            StyleIcon::Sparkles => "sparkles",
            StyleIcon::Package => "package",
            StyleIcon::Zap => "zap",
            StyleIcon::Brush => "brush",
        }
    }

    /// Terminal rendering of the icon
    pub fn glyph(&self) -> &'static str {
        match self {
            StyleIcon::Palette => "🎨",
            StyleIcon::Camera => "📷",
            StyleIcon::Film => "🎞",
            StyleIcon::User => "👤",
            StyleIcon::Sparkles => "✨",
            StyleIcon::Package => "📦",
            StyleIcon::Zap => "⚡",
            StyleIcon::Brush => "🖌",
        }
    }
}

/// Visual style preset appended to the user's prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageStyle {
    #[serde(rename = "None")]
    None,
    #[default]
    #[serde(rename = "Ultra-Realistic")]
    UltraRealistic,
    #[serde(rename = "Cinematic")]
    Cinematic,
    #[serde(rename = "Portrait")]
    Portrait,
    #[serde(rename = "Fantasy")]
    Fantasy,
    #[serde(rename = "Product Photography")]
    ProductPhotography,
    #[serde(rename = "Anime")]
    Anime,
    #[serde(rename = "Artistic")]
    Artistic,
}

impl ImageStyle {
    /// Presets in display order
    pub const ALL: [ImageStyle; 8] = [
        ImageStyle::None,
        ImageStyle::UltraRealistic,
        ImageStyle::Cinematic,
        ImageStyle::Portrait,
        ImageStyle::Fantasy,
        ImageStyle::ProductPhotography,
        ImageStyle::Anime,
        ImageStyle::Artistic,
    ];

    /// Style identifier, as sent around the app and accepted on the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::None => "None",
            ImageStyle::UltraRealistic => "Ultra-Realistic",
            ImageStyle::Cinematic => "Cinematic",
            ImageStyle::Portrait => "Portrait",
            ImageStyle::Fantasy => "Fantasy",
            ImageStyle::ProductPhotography => "Product Photography",
            ImageStyle::Anime => "Anime",
            ImageStyle::Artistic => "Artistic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageStyle::None => "Standard",
            ImageStyle::UltraRealistic => "Realistic",
            ImageStyle::Cinematic => "Cinematic",
            ImageStyle::Portrait => "Portrait",
            ImageStyle::Fantasy => "Fantasy",
            ImageStyle::ProductPhotography => "Product",
            ImageStyle::Anime => "Anime",
            ImageStyle::Artistic => "Artistic",
        }
    }

    pub fn icon(&self) -> StyleIcon {
        match self {
            ImageStyle::None => StyleIcon::Palette,
            ImageStyle::UltraRealistic => StyleIcon::Camera,
            ImageStyle::Cinematic => StyleIcon::Film,
            ImageStyle::Portrait => StyleIcon::User,
            ImageStyle::Fantasy => StyleIcon::Sparkles,
            ImageStyle::ProductPhotography => StyleIcon::Package,
            ImageStyle::Anime => StyleIcon::Zap,
            ImageStyle::Artistic => StyleIcon::Brush,
        }
    }

    /// Descriptive text appended to the prompt. Empty for `None`.
    pub fn prompt_suffix(&self) -> &'static str {
        match self {
            ImageStyle::UltraRealistic => "Ultra-realistic photography, hyper-detailed, 8k resolution, photorealistic, sharp focus, natural lighting, shot on 35mm lens.",
            ImageStyle::Cinematic => "Cinematic lighting, dramatic shadows, moody atmosphere, wide angle lens, Hollywood color grading, 8k resolution, highly detailed.",
            ImageStyle::Portrait => "Close-up portrait photography, shallow depth of field, bokeh background, sharp eyes, detailed skin textures, soft lighting.",
            ImageStyle::Fantasy => "Epic fantasy art style, magical atmosphere, intricate details, ethereal lighting, vibrant colors, dreamlike composition.",
            ImageStyle::ProductPhotography => "Studio product photography, clean background, sharp focus, professional lighting, minimalist aesthetic, commercial quality.",
            ImageStyle::Anime => "High-quality anime style, vibrant cel-shaded colors, clean lines, Japanese animation aesthetic, detailed background.",
            ImageStyle::Artistic => "Fine art painting style, expressive brushwork, creative composition, unique color palette, artistic texture.",
            ImageStyle::None => "",
        }
    }

    pub fn next(&self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(&self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }

    pub fn variants() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }
}

impl fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageStyle {
    type Err = HappuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ImageStyle::ALL
            .iter()
            .copied()
            .find(|style| {
                style.as_str().eq_ignore_ascii_case(wanted) || style.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                HappuError::InvalidParameter(format!(
                    "Unknown style '{}'. Valid values: {}",
                    s,
                    ImageStyle::variants().join(", ")
                ))
            })
    }
}

/// Width:height shape requested for the generated image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "3:2")]
    Photo,
    #[serde(rename = "4:5")]
    Social,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 6] = [
        AspectRatio::Square,
        AspectRatio::Wide,
        AspectRatio::Portrait,
        AspectRatio::Standard,
        AspectRatio::Photo,
        AspectRatio::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Wide => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Standard => "4:3",
            AspectRatio::Photo => "3:2",
            AspectRatio::Social => "4:5",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Square => "Square (1:1)",
            AspectRatio::Wide => "Wide (16:9)",
            AspectRatio::Portrait => "Portrait (9:16)",
            AspectRatio::Standard => "Standard (4:3)",
            AspectRatio::Photo => "Photo (3:2)",
            AspectRatio::Social => "Social (4:5)",
        }
    }

    pub fn next(&self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(&self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }

    pub fn variants() -> Vec<&'static str> {
        Self::ALL.iter().map(|r| r.as_str()).collect()
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = HappuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectRatio::ALL
            .iter()
            .copied()
            .find(|ratio| ratio.as_str() == s.trim())
            .ok_or_else(|| {
                HappuError::InvalidParameter(format!(
                    "Invalid aspect ratio '{}'. Valid values: {}",
                    s,
                    AspectRatio::variants().join(", ")
                ))
            })
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: &T, step: usize) -> T {
    let idx = all.iter().position(|item| item == current).unwrap_or(0);
    all[(idx + step) % all.len()]
}
