use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE_EXT: &str = ".irf";
const DEFAULT_BASENAME: &str = "data_siswa";

/// Configuration for pendata, stored as config.json in the platform
/// config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendataConfig {
    /// Extension for data files (e.g. ".irf")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Basename proposed for save when nothing was loaded this session
    #[serde(default = "default_basename")]
    pub default_basename: String,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

fn default_basename() -> String {
    DEFAULT_BASENAME.to_string()
}

impl Default for PendataConfig {
    fn default() -> Self {
        Self {
            file_ext: default_file_ext(),
            default_basename: default_basename(),
        }
    }
}

impl PendataConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: PendataConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the file extension (always starts with a dot)
    pub fn get_file_ext(&self) -> &str {
        &self.file_ext
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PendataConfig::default();
        assert_eq!(config.file_ext, ".irf");
        assert_eq!(config.default_basename, "data_siswa");
    }

    #[test]
    fn test_set_file_ext_without_dot() {
        let mut config = PendataConfig::default();
        config.set_file_ext("txt");
        assert_eq!(config.file_ext, ".txt");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = PendataConfig::load(dir.path()).unwrap();
        assert_eq!(config, PendataConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PendataConfig::default();
        config.set_file_ext(".dat");
        config.save(dir.path()).unwrap();

        let loaded = PendataConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.file_ext, ".dat");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = PendataConfig {
            file_ext: ".txt".to_string(),
            default_basename: "siswa".to_string(),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: PendataConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, parsed);
    }
}
