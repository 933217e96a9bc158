pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "happu",
    version,
    about = "Happu - Turn a prompt and a style preset into an image with Google Gemini",
    long_about = r#"Happu - Turn a prompt and a style preset into an image with Google Gemini

Pick a visual style and an aspect ratio, describe what you want, and Happu
sends one request to the Gemini image model. Results collect in an in-memory
library for this session, where you can preview, export, or delete them.
Run without arguments to launch the interactive TUI.

SETUP:
  Set your API key via environment variable or config:
    export API_KEY=your-key-here
    happu config set api.key your-key-here

EXAMPLES:
  Generate an image:
    happu generate "a red fox in the snow"
    happu g "neon city at night" --style Cinematic --ar 16:9

  List style presets and aspect ratios:
    happu styles

  Manage configuration:
    happu config show
    happu config set defaults.style Anime

  Launch interactive TUI:
    happu"#,
    after_help = r#"CONFIGURATION:
  Config file: ~/.config/happu/config.toml (Linux)
  API key: API_KEY or GEMINI_API_KEY (overrides api.key)

  Styles: None, Ultra-Realistic (default), Cinematic, Portrait, Fantasy,
          Product Photography, Anime, Artistic
  Aspect ratios: 1:1 (default), 16:9, 9:16, 4:3, 3:2, 4:5"#
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate one image from a text prompt
    ///
    /// The prompt is combined with the chosen style preset and sent to
    /// Gemini once. The result is exported as a PNG unless --no-download.
    #[command(
        alias = "g",
        after_help = r#"EXAMPLES:
  Basic generation:
    happu generate "a red apple on a wooden table"

  With style and aspect ratio:
    happu generate "mountain lake at dawn" --style Fantasy --ar 3:2

  JSON output for scripts:
    happu generate "abstract shapes" --format json"#
    )]
    Generate(commands::generate::GenerateArgs),

    /// List style presets and aspect ratios
    #[command(alias = "s")]
    Styles(commands::styles::StylesArgs),

    /// View or modify configuration
    ///
    /// Changes are saved to the config file immediately.
    #[command(
        alias = "c",
        after_help = r#"EXAMPLES:
  Show all settings:
    happu config show

  Set values:
    happu config set api.key YOUR_API_KEY
    happu config set defaults.style Cinematic
    happu config set defaults.aspect_ratio 16:9
    happu config set output.directory ~/Pictures/happu

AVAILABLE SETTINGS:
  api.key               - Gemini API key
  api.model             - Image model
  api.base_url          - API base URL
  defaults.style        - Default style preset
  defaults.aspect_ratio - Default aspect ratio
  output.directory      - Where exported images go
  output.display        - Show result inline after generate (terminal/none)"#
    )]
    Config(commands::config::ConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["happu"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn generate_accepts_style_and_ratio() {
        let cli = Cli::try_parse_from([
            "happu", "g", "a red fox", "--style", "Anime", "--ar", "16:9",
        ])
        .unwrap();
        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.prompt, "a red fox");
        assert_eq!(args.style.as_deref(), Some("Anime"));
        assert_eq!(args.aspect_ratio.as_deref(), Some("16:9"));
    }
}
