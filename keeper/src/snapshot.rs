//! JSON snapshots of paper-mode positions

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub name: String,
    pub collateral: u128,
    pub debt: u128,
    pub idle_assets: u128,
    pub last_tend_timestamp: u64,
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Load snapshots, or none if the file does not exist yet
pub fn load(path: &str) -> Result<Vec<PositionSnapshot>> {
    let path = expand(path);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let bytes = std::fs::read(&path)
        .context(format!("Failed to read snapshot from {}", path.display()))?;
    let snapshots = serde_json::from_slice(&bytes)
        .context("Failed to parse snapshot JSON")?;
    Ok(snapshots)
}

pub fn save(path: &str, snapshots: &[PositionSnapshot]) -> Result<()> {
    let path = expand(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_vec_pretty(snapshots)
        .context("Failed to serialize snapshot")?;
    std::fs::write(&path, json)
        .context(format!("Failed to write snapshot to {}", path.display()))?;
    Ok(())
}
