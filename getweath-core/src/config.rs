use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// API key for Geoapify place-name autocomplete. Weather itself needs no
    /// key; without this one, suggestions are simply empty.
    pub geoapify_api_key: Option<String>,
}

impl Config {
    pub fn has_geoapify_key(&self) -> bool {
        self.geoapify_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    pub fn set_geoapify_api_key(&mut self, api_key: String) {
        self.geoapify_api_key = if api_key.is_empty() { None } else { Some(api_key) };
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "getweath", "getweath")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_key() {
        let cfg = Config::default();
        assert!(!cfg.has_geoapify_key());
    }

    #[test]
    fn set_and_clear_key() {
        let mut cfg = Config::default();

        cfg.set_geoapify_api_key("KEY".to_string());
        assert!(cfg.has_geoapify_key());
        assert_eq!(cfg.geoapify_api_key.as_deref(), Some("KEY"));

        cfg.set_geoapify_api_key(String::new());
        assert!(!cfg.has_geoapify_key());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.set_geoapify_api_key("KEY".to_string());

        let encoded = toml::to_string_pretty(&cfg).expect("encode");
        let decoded: Config = toml::from_str(&encoded).expect("decode");
        assert_eq!(decoded.geoapify_api_key.as_deref(), Some("KEY"));
    }
}
