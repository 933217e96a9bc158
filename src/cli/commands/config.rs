use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::config::Config;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Config key (e.g., api.model, defaults.style)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Config key (e.g., api.key, defaults.aspect_ratio)
        key: String,
        /// Value to set
        value: String,
    },

    /// Show the config file path
    Path,

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs, config: &mut Config) -> Result<()> {
    match args.command {
        Some(ConfigCommand::Show) | None => show_config(config),
        Some(ConfigCommand::Get { key }) => get_config(&key, config),
        Some(ConfigCommand::Set { key, value }) => set_config(&key, &value, config),
        Some(ConfigCommand::Path) => show_path(config),
        Some(ConfigCommand::Reset { force }) => reset_config(force, config),
    }
}

fn show_config(config: &Config) -> Result<()> {
    println!("{}", "Configuration".cyan().bold());
    println!("{}", "=".repeat(50));

    let mut section = "";
    for (table, field, value) in entries(config) {
        if table != section {
            println!();
            println!("[{}]", table.yellow());
            section = table;
        }
        let value = value.unwrap_or_else(|| "(not set)".dimmed().to_string());
        println!("  {} = {}", field.bold(), value);
    }

    println!();
    println!("{}", format!("Config file: {}", config.config_path.display()).dimmed());
    Ok(())
}

/// `(table, field, value)` for every known key, in file order
fn entries(config: &Config) -> Vec<(&'static str, &'static str, Option<String>)> {
    Config::keys()
        .iter()
        .map(|&key| {
            let (table, field) = key.split_once('.').unwrap_or(("", key));
            (table, field, config.get(key))
        })
        .collect()
}

fn get_config(key: &str, config: &Config) -> Result<()> {
    if !Config::keys().contains(&key) {
        anyhow::bail!(
            "Unknown config key '{}'. Available keys: {}",
            key,
            Config::keys().join(", ")
        );
    }
    match config.get(key) {
        Some(value) => println!("{}", value),
        None => println!("{}", "(not set)".dimmed()),
    }
    Ok(())
}

fn set_config(key: &str, value: &str, config: &mut Config) -> Result<()> {
    config.set(key, value)?;
    config.save()?;

    let shown = if key == "api.key" { "****" } else { value };
    println!("{} Set {} = {}", "✓".green(), key.cyan(), shown);
    Ok(())
}

fn show_path(config: &Config) -> Result<()> {
    println!("{}", config.config_path.display());
    Ok(())
}

fn reset_config(force: bool, config: &mut Config) -> Result<()> {
    if !force {
        eprintln!(
            "{}: Resetting restores every default and drops the stored API key. Use --force to confirm.",
            "Warning".yellow().bold()
        );
        return Ok(());
    }

    *config = Config {
        config_path: config.config_path.clone(),
        env_key: config.env_key.take(),
        ..Config::default()
    };
    config.save()?;

    println!("{} Configuration reset to defaults", "✓".green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AspectRatio, ImageStyle};

    #[test]
    fn entries_follow_the_key_table_and_mask_the_key() {
        let mut config = Config::default();
        config.set("api.key", "secret").unwrap();

        let entries = entries(&config);
        assert_eq!(entries.len(), Config::keys().len());
        assert_eq!(entries[0], ("api", "key", Some("****".to_string())));
        assert!(entries.iter().all(|(_, _, value)| value.as_deref() != Some("secret")));
        assert!(entries
            .iter()
            .any(|entry| *entry == ("defaults", "style", Some("Ultra-Realistic".to_string()))));
    }

    #[test]
    fn unknown_keys_are_an_error() {
        let config = Config::default();
        assert!(get_config("tui.theme", &config).is_err());
        assert!(get_config("api.key", &config).is_ok());
    }

    #[test]
    fn reset_needs_force_and_keeps_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::load_from(&path).unwrap();
        config.set("defaults.style", "Anime").unwrap();
        config.set("defaults.aspect_ratio", "16:9").unwrap();
        config.save().unwrap();

        reset_config(false, &mut config).unwrap();
        assert_eq!(config.defaults.style, ImageStyle::Anime);

        reset_config(true, &mut config).unwrap();
        assert_eq!(config.config_path, path);

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.defaults.style, ImageStyle::UltraRealistic);
        assert_eq!(loaded.defaults.aspect_ratio, AspectRatio::Square);
    }
}
