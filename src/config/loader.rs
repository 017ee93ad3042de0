use std::fs;
use std::path::PathBuf;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing::debug;

use crate::config::AppConfig;

const CONFIG_DIR: &str = "asterium-promo";
const CONFIG_FILE: &str = "config.toml";

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Loads the user config, falling back to defaults when there is none.
pub fn load() -> Result<AppConfig> {
    let Some(path) = config_path() else {
        debug!("No config directory found, using defaults");
        return Ok(AppConfig::default());
    };

    if !path.exists() {
        debug!(?path, "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    let config = parse(&content).wrap_err_with(|| format!("Invalid config at {}", path.display()))?;
    debug!(?path, "Loaded config");
    Ok(config)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    Ok(toml::from_str(content)?)
}
