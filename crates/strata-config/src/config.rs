//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strata_math::IVec3;
use strata_volume::StorageKind;

use crate::error::ConfigError;

/// File name used inside the configuration directory.
pub const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Volume copy and archetype settings.
    pub volume: VolumeConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Volume configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VolumeConfig {
    /// Storage kind requested when copying volumes. Only `standard` is
    /// implemented; `thread_safe` loads fine but every copy using it fails.
    pub copy_storage: StorageKind,
    /// Origin subtracted from positions when building archetypes.
    pub archetype_origin: [i32; 3],
}

impl VolumeConfig {
    pub fn archetype_origin(&self) -> IVec3 {
        IVec3::from_array(self.archetype_origin)
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter used when `RUST_LOG` is unset (e.g. "debug", "info,strata_volume=trace").
    pub log_level: String,
    /// Also write JSON logs under the config directory in debug builds.
    pub log_to_file: bool,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            copy_storage: StorageKind::Standard,
            archetype_origin: [0, 0, 0],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

/// Platform configuration directory for strata, e.g. `~/.config/strata`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("strata"))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-reads the file; returns `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if new_config != *self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("copy_storage: standard"));
        assert!(ron_str.contains("log_level: \"info\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.volume.archetype_origin = [4, -2, 9];
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
        assert_eq!(deserialized.volume.archetype_origin(), IVec3::new(4, -2, 9));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(debug: (log_level: \"trace\"))").unwrap();
        assert_eq!(config.volume, VolumeConfig::default());
        assert_eq!(config.debug.log_level, "trace");
        assert!(config.debug.log_to_file);
    }

    #[test]
    fn test_thread_safe_storage_parses() {
        let config: Config = ron::from_str("(volume: (copy_storage: thread_safe))").unwrap();
        assert_eq!(config.volume.copy_storage, StorageKind::ThreadSafe);
        assert!(config.volume.copy_storage.ensure_supported().is_err());
    }

    #[test]
    fn test_unknown_storage_kind_is_parse_error() {
        let result: Result<Config, _> = ron::from_str("(volume: (copy_storage: parallel))");
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.volume.archetype_origin = [16, 0, 16];
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("strata");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.volume.archetype_origin = [1, 2, 3];
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.volume.archetype_origin), Some([1, 2, 3]));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_file_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_reload_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::default().reload(dir.path()),
            Err(ConfigError::ReadError(_))
        ));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// strata settings\n(\n  // nothing overridden\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
