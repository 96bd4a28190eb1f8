//! Level configuration files in TOML or JSON, picked by extension.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use promethean::LevelConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => bail!(
                "Unsupported config extension for {} (expected .toml or .json)",
                path.display()
            ),
        }
    }
}

pub fn load(path: &Path) -> Result<LevelConfig> {
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = match format {
        ConfigFormat::Toml => toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
        ConfigFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
    };
    Ok(config)
}

/// Writes through a sibling temp file so readers never see a partial config.
pub fn write_atomic(config: &LevelConfig, path: &Path) -> Result<()> {
    let format = ConfigFormat::from_path(path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = match format {
        ConfigFormat::Toml => toml::to_string_pretty(config).context("Failed to encode TOML")?,
        ConfigFormat::Json => {
            serde_json::to_string_pretty(config).context("Failed to encode JSON")?
        }
    };
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write config file: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move config into place: {}", path.display()))?;
    Ok(())
}
