use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Persisted plugin settings.
///
/// Keys missing from the file fall back to [`Settings::default`], so an old or
/// hand-written file only needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Apply the author-styled stylesheet on top of the host theme.
    pub enable_additional_css: bool,
    /// Notes folder used by the previewer when none is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_additional_css: true,
            notes_path: None,
        }
    }
}

/// Load/save seam for [`Settings`].
pub trait SettingsStore {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Settings>, ConfigError>;
    fn save(&self, settings: &Settings) -> anyhow::Result<()>;

    /// Stored settings merged over the defaults.
    fn load_or_default(&self) -> Result<Settings, ConfigError> {
        Ok(self.load()?.unwrap_or_default())
    }
}

/// Settings kept as a TOML file on disk.
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    config_path: PathBuf,
}

impl TomlSettingsStore {
    pub fn new<P: Into<PathBuf>>(config_path: P) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Store at the default per-user location.
    pub fn at_default_path() -> Self {
        Self::new(Self::config_path())
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn config_dir() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/heading-hierarchy");
        PathBuf::from(config_dir.as_ref())
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

impl SettingsStore for TomlSettingsStore {
    fn load(&self) -> Result<Option<Settings>, ConfigError> {
        let config_path = self.config_path.as_path();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut settings: Settings =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the notes folder
        settings.notes_path = settings
            .notes_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        log::debug!("Loaded settings from {}", config_path.display());
        Ok(Some(settings))
    }

    fn save(&self, settings: &Settings) -> anyhow::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(settings)?;
        std::fs::write(&self.config_path, content)?;
        log::debug!("Saved settings to {}", self.config_path.display());
        Ok(())
    }
}
