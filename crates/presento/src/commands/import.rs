use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;

use super::open_session;

const IMPORT_FAILED: &str = "Failed to import slides. Please verify the JSON file and try again.";

pub fn run(data_dir: Option<PathBuf>, file: &Path, quiet: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    let bytes = std::fs::read(file)?;
    let mut session = open_session(data_dir)?;
    let count = session
        .import(&bytes)
        .map_err(|e| anyhow::anyhow!("{IMPORT_FAILED} ({e})"))?;

    if !quiet {
        println!(
            "{}",
            format!(
                "Imported {count} slides into \"{}\"",
                session.state().deck.name()
            )
            .green()
        );
    }
    Ok(())
}
