use anyhow::Result;
use clap::Parser;

mod api;
mod cli;
mod config;
mod core;
mod export;
mod http_client;
mod logging;
mod tui;

use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // No subcommand means the TUI, which owns the terminal
    let log_dir = Config::config_dir().ok();
    logging::init(cli.command.is_none(), log_dir.as_deref());

    // Load or create config
    let mut config = Config::load_or_create()?;

    match cli.command {
        Some(Commands::Generate(args)) => {
            cli::commands::generate::run(args, &config).await?;
        }
        Some(Commands::Styles(args)) => {
            cli::commands::styles::run(args)?;
        }
        Some(Commands::Config(args)) => {
            cli::commands::config::run(args, &mut config)?;
        }
        None => {
            // Launch TUI
            tui::run(&config).await?;
        }
    }

    Ok(())
}
