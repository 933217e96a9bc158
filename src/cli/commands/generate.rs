use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::api::GeminiClient;
use crate::config::{Config, DisplayMode};
use crate::core::{AspectRatio, GeneratedImage, GenerationRequest, ImageStyle, Workspace};
use crate::export;

#[derive(Args)]
pub struct GenerateArgs {
    /// The prompt describing the image to generate
    #[arg(required = true)]
    pub prompt: String,

    /// Style preset (None, Ultra-Realistic, Cinematic, Portrait, Fantasy, Product Photography, Anime, Artistic)
    #[arg(short, long)]
    pub style: Option<String>,

    /// Aspect ratio (1:1, 16:9, 9:16, 4:3, 3:2, 4:5)
    #[arg(short, long, alias = "ar")]
    pub aspect_ratio: Option<String>,

    /// Output directory for the exported PNG
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Don't write the image to disk
    #[arg(long)]
    pub no_download: bool,

    /// Output format (text, json, quiet)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Turn the arguments into a request, falling back to configured defaults
pub fn build_request(args: &GenerateArgs, config: &Config) -> Result<GenerationRequest> {
    let style = match &args.style {
        Some(s) => s.parse::<ImageStyle>()?,
        None => config.defaults.style,
    };
    let aspect_ratio = match &args.aspect_ratio {
        Some(r) => r.parse::<AspectRatio>()?,
        None => config.defaults.aspect_ratio,
    };

    let request = GenerationRequest::new(&args.prompt)
        .with_style(style)
        .with_aspect_ratio(aspect_ratio);
    request.validate()?;
    Ok(request)
}

pub async fn run(args: GenerateArgs, config: &Config) -> Result<()> {
    let request = build_request(&args, config)?;
    let client = GeminiClient::from_config(config);

    // Show progress
    let pb = if args.format == "text" {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.blue} {msg}")
                .context("Invalid progress template")?,
        );
        pb.set_message(format!("Generating image: {}...", request.prompt_preview(40)));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let mut workspace = Workspace::new();
    workspace.submit(&client, request).await;

    if let Some(message) = workspace.error() {
        if let Some(pb) = &pb {
            pb.finish_with_message(format!("{} Generation failed", "✗".red()));
        }
        if args.format == "json" {
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "error": message }))?);
        } else if args.format != "quiet" {
            eprintln!("{}: {}", "Error".red().bold(), message);
        }
        anyhow::bail!("{}", message);
    }

    let image = workspace
        .images()
        .first()
        .context("Generation finished without a result")?;

    let path = if args.no_download {
        None
    } else {
        let output_dir = args.output.clone().unwrap_or_else(|| config.output_dir());
        Some(export::save_image(image, &output_dir, &image.export_filename()).await?)
    };

    if let Some(pb) = &pb {
        pb.finish_with_message(format!("{} Generated {}", "✓".green(), image.id));
    }

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(image)?);
        }
        "quiet" => {
            if let Some(path) = &path {
                println!("{}", path.display());
            }
        }
        _ => {
            println!();
            println!("{}: {}", "Image ID".cyan().bold(), image.id);
            println!("{}: {}", "Prompt".cyan().bold(), image.original_prompt);
            println!("{}: {}", "Style".cyan().bold(), image.style);
            println!("{}: {}", "Aspect Ratio".cyan().bold(), image.aspect_ratio);
            println!("{}: {}", "Model".cyan().bold(), client.model());
            if let Some(path) = &path {
                println!("{}: {}", "Saved".cyan().bold(), path.display());
            }

            // Try to display image in terminal
            if config.output.display == DisplayMode::Terminal {
                println!();
                display_image_terminal(image);
            }
        }
    }

    Ok(())
}

/// Display an image in the terminal using viuer
fn display_image_terminal(generated: &GeneratedImage) {
    let conf = viuer::Config {
        width: Some(80),
        height: Some(30),
        absolute_offset: false,
        ..Default::default()
    };

    let picture = match generated.bytes().map(|bytes| image::load_from_memory(&bytes)) {
        Ok(Ok(picture)) => picture,
        Ok(Err(e)) => {
            tracing::debug!("Failed to decode image for display: {}", e);
            return;
        }
        Err(e) => {
            tracing::debug!("Failed to read image for display: {}", e);
            return;
        }
    };

    if let Err(e) = viuer::print(&picture, &conf) {
        tracing::debug!("Failed to display image in terminal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(prompt: &str, style: Option<&str>, ratio: Option<&str>) -> GenerateArgs {
        GenerateArgs {
            prompt: prompt.to_string(),
            style: style.map(String::from),
            aspect_ratio: ratio.map(String::from),
            output: None,
            no_download: false,
            format: "text".to_string(),
        }
    }

    #[test]
    fn flags_override_configured_defaults() {
        let mut config = Config::default();
        config.defaults.style = ImageStyle::Fantasy;

        let request = build_request(&args("fox", None, None), &config).unwrap();
        assert_eq!(request.style, ImageStyle::Fantasy);
        assert_eq!(request.aspect_ratio, AspectRatio::Square);

        let request = build_request(&args("fox", Some("anime"), Some("4:5")), &config).unwrap();
        assert_eq!(request.style, ImageStyle::Anime);
        assert_eq!(request.aspect_ratio, AspectRatio::Social);
    }

    #[test]
    fn rejects_unknown_values_and_blank_prompts() {
        let config = Config::default();
        assert!(build_request(&args("fox", Some("Vaporwave"), None), &config).is_err());
        assert!(build_request(&args("fox", None, Some("2:1")), &config).is_err());
        assert!(build_request(&args("  ", None, None), &config).is_err());
    }
}
