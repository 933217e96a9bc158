use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;

use crate::core::{AspectRatio, ImageStyle};

#[derive(Args)]
pub struct StylesArgs {
    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn run(args: StylesArgs) -> Result<()> {
    if args.format == "json" {
        let styles: Vec<_> = ImageStyle::ALL
            .iter()
            .map(|s| {
                json!({
                    "label": s.label(),
                    "value": s.as_str(),
                    "iconName": s.icon().name(),
                    "prompt": s.prompt_suffix(),
                })
            })
            .collect();
        let ratios: Vec<_> = AspectRatio::ALL
            .iter()
            .map(|r| json!({ "label": r.label(), "value": r.as_str() }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "styles": styles, "aspectRatios": ratios }))?
        );
        return Ok(());
    }

    println!("{}", "Visual Styles".cyan().bold());
    for style in ImageStyle::ALL {
        let marker = if style == ImageStyle::default() { " (default)" } else { "" };
        println!(
            "  {} {:<20} {}{}",
            style.icon().glyph(),
            style.as_str().bold(),
            style.label().dimmed(),
            marker.yellow()
        );
    }

    println!();
    println!("{}", "Aspect Ratios".cyan().bold());
    for ratio in AspectRatio::ALL {
        let marker = if ratio == AspectRatio::default() { " (default)" } else { "" };
        println!("  {:<6} {}{}", ratio.as_str().bold(), ratio.label().dimmed(), marker.yellow());
    }

    Ok(())
}
