use std::path::Path;

use anyhow::{Context, Result};

use crate::data::dashboard::Dashboard;

/// Pretty-printed JSON document for one dashboard.
pub fn to_json(dashboard: &Dashboard) -> Result<String> {
    serde_json::to_string_pretty(dashboard).context("serializing dashboard")
}

/// Write the dashboard as JSON to `path`, replacing any existing file.
pub fn write_json(dashboard: &Dashboard, path: &Path) -> Result<()> {
    let json = to_json(dashboard)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported dashboard to {}", path.display());
    Ok(())
}
