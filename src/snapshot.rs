//! PNG export of rendered frames

use anyhow::{Context, Result, anyhow};
use jiff::Zoned;
use std::path::{Path, PathBuf};

use crate::surface::PixmapSurface;

pub fn get_snapshots_dir() -> Result<PathBuf> {
    let data_dir = directories::BaseDirs::new()
        .ok_or_else(|| anyhow!("Could not find data directory"))?
        .data_local_dir()
        .join("ecg-trace")
        .join("snapshots");

    // Create directory if it doesn't exist
    std::fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// Timestamped PNG path in the snapshots directory
pub fn get_snapshot_path() -> Result<PathBuf> {
    let snapshots_dir = get_snapshots_dir()?;
    let timestamp = Zoned::now().strftime("%Y-%m-%d_%H-%M-%S");
    Ok(snapshots_dir.join(format!("{}.png", timestamp)))
}

/// File name for frame `frame` when dumping every frame
pub fn frame_file_name(frame: u64) -> String {
    format!("frame-{:05}.png", frame)
}

pub fn save_png(surface: &PixmapSurface, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    surface
        .pixmap()
        .save_png(path)
        .with_context(|| format!("Failed to write PNG: {}", path.display()))
}
