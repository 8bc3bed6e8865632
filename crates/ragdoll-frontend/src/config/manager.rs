//! Settings persistence
//!
//! Edits from the settings window land in memory at once and reach the disk
//! only after they have settled for [`SAVE_DELAY`], so dragging a slider does
//! not rewrite the file every frame.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use thiserror::Error;

use super::AppConfig;

/// Shared configuration manager type
pub type SharedConfig = Arc<RwLock<ConfigManager>>;

/// Quiet period after the last edit before settings are written
pub const SAVE_DELAY: Duration = Duration::from_millis(750);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot write settings to {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot encode settings: {0}")]
    Encode(#[from] ron::Error),
}

/// Which sections an edit touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigChange {
    pub editor: bool,
    pub ui: bool,
}

impl ConfigChange {
    pub fn any(&self) -> bool {
        self.editor || self.ui
    }
}

/// Owns the live settings and their file
pub struct ConfigManager {
    config: AppConfig,
    /// `None` keeps settings in memory only
    path: Option<PathBuf>,
    /// Time of the last edit not yet written
    last_edit: Option<Instant>,
}

impl ConfigManager {
    /// Load from the per-user config directory, or fall back to memory only
    pub fn load() -> Self {
        match dirs::config_dir() {
            Some(dir) => Self::load_from(dir.join("ragdoll-adjuster").join("config.ron")),
            None => {
                tracing::warn!("No config directory on this system; settings will not persist");
                Self::in_memory(AppConfig::new())
            }
        }
    }

    /// Load from a specific file; a missing or unreadable file yields defaults
    pub fn load_from(path: PathBuf) -> Self {
        let config = read_config(&path).unwrap_or_else(AppConfig::new);
        Self {
            config,
            path: Some(path),
            last_edit: None,
        }
    }

    pub fn in_memory(config: AppConfig) -> Self {
        Self {
            config,
            path: None,
            last_edit: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.last_edit.is_some()
    }

    /// Replace the settings with an edited copy.
    ///
    /// Only an actual difference counts as an edit and restarts the save delay.
    pub fn update(&mut self, edited: AppConfig, now: Instant) -> ConfigChange {
        let change = ConfigChange {
            editor: edited.editor != self.config.editor,
            ui: edited.ui != self.config.ui,
        };
        if change.any() {
            self.config = edited;
            self.last_edit = Some(now);
        }
        change
    }

    pub fn reset_to_defaults(&mut self, now: Instant) -> ConfigChange {
        self.update(AppConfig::new(), now)
    }

    /// Write pending edits once none happened for [`SAVE_DELAY`].
    ///
    /// Returns whether the file was written.
    pub fn save_if_settled(&mut self, now: Instant) -> Result<bool, ConfigError> {
        match self.last_edit {
            Some(at) if now.saturating_duration_since(at) >= SAVE_DELAY => {
                self.flush()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Write pending edits right away.
    ///
    /// A failed write is not retried until the next edit.
    pub fn flush(&mut self) -> Result<(), ConfigError> {
        if self.last_edit.take().is_none() {
            return Ok(());
        }

        if let Some(path) = &self.path {
            write_config(path, &self.config)?;
            tracing::info!("Saved settings to {:?}", path);
        }
        Ok(())
    }
}

fn read_config(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("No settings at {:?}, using defaults", path);
            return None;
        }
        Err(e) => {
            tracing::warn!("Cannot read settings at {:?}: {}", path, e);
            return None;
        }
    };

    match ron::from_str::<AppConfig>(&content) {
        Ok(config) if config.version > AppConfig::CURRENT_VERSION => {
            tracing::warn!(
                "Settings version {} is newer than supported, using defaults",
                config.version
            );
            None
        }
        Ok(config) => {
            tracing::info!("Loaded settings from {:?}", path);
            Some(config)
        }
        Err(e) => {
            tracing::warn!("Cannot parse settings at {:?}: {}", path, e);
            None
        }
    }
}

fn write_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let io_error = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(io_error)?;
    }
    let content = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())?;
    std::fs::write(path, content).map_err(io_error)
}

pub fn create_shared_config() -> SharedConfig {
    Arc::new(RwLock::new(ConfigManager::load()))
}
