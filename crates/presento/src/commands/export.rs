use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use super::open_session;
use crate::config::Config;

pub fn run(data_dir: Option<PathBuf>, output_dir: Option<PathBuf>, quiet: bool) -> Result<()> {
    let session = open_session(data_dir)?;
    let config = Config::load_or_default();
    let output_dir = output_dir
        .or_else(|| config.export_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let payload = session.export(Utc::now())?;
    std::fs::create_dir_all(&output_dir)?;
    let path = output_dir.join(&payload.filename);
    std::fs::write(&path, &payload.bytes)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", path.display()))?;
    log::info!("Exported {} bytes", payload.bytes.len());

    if !quiet {
        println!(
            "{}",
            format!(
                "Exported {} slides to {}",
                session.state().deck.len(),
                path.display()
            )
            .green()
        );
    }
    Ok(())
}
