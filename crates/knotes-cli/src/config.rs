use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use knotes_core::config::DEFAULT_KDF_ITERATIONS;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct KnotesConfig {
    #[serde(default)]
    pub kdf: KdfSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KdfSection {
    pub iterations: u32,
}

impl Default for KdfSection {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_KDF_ITERATIONS,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<KnotesConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Load the config from an explicit path, or from the default location.
///
/// A missing file at the default location yields the defaults; a missing
/// file that was asked for explicitly is an error.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<KnotesConfig> {
    if let Some(path) = explicit {
        return read_config(Path::new(path));
    }
    let path = default_config_path()?;
    if path.exists() {
        read_config(&path)
    } else {
        Ok(KnotesConfig::default())
    }
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("knotes"));
        }
    }
    Ok(home_dir()?.join(".config").join("knotes"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
