use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::storage::FileStore;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let config = Config::load_or_default();
    let path = Config::path()?;
    println!("{} {}", "Config file:".bold(), path.display());
    println!();
    println!("  {:<22} {}", "defaults.theme", config.theme());
    println!(
        "  {:<22} {}",
        "defaults.export_dir",
        config
            .export_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ".".dimmed().to_string())
    );
    let data_dir = config
        .data_dir()
        .map(|p| p.display().to_string())
        .or_else(|| FileStore::default_dir().map(|p| format!("{} (default)", p.display())))
        .unwrap_or_default();
    println!("  {:<22} {}", "storage.data_dir", data_dir);
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!("{} {key} = {value}", "Set".green());
    log::debug!("Saved config to {}", path.display());
    Ok(())
}
