//! JSON-backed application settings.
//!
//! A read-only snapshot of typed settings with compiled-in defaults.
//! Unknown fields in the file are ignored and missing fields fall back to
//! their defaults, so a snapshot round-trips losslessly through its JSON
//! encoding across schema additions.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::logging::Logger;

/// Default settings file name
const DEFAULT_SETTINGS_FILE: &str = "resonance_settings.json";

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Requested log level, as the lowercase level string
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Audio engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Sample rate in Hz
    pub sampling_rate: u32,
    /// Buffer size in frames
    pub buffer_size: u32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sampling_rate: 48_000,
            buffer_size: 256,
        }
    }
}

/// The full typed settings snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub schema_version: u32,
    pub general: GeneralSettings,
    pub audio: AudioSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            schema_version: 1,
            general: GeneralSettings::default(),
            audio: AudioSettings::default(),
        }
    }
}

impl AppSettings {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    /// Parse from JSON text.
    ///
    /// Malformed input is an `InvalidArgument`; unknown fields are ignored
    /// and missing fields take their defaults.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        serde_json::from_str(text).map_err(|e| {
            CoreError::InvalidArgument(format!("malformed settings JSON: {}", e))
        })
    }
}

/// Configuration for the settings store.
#[derive(Debug, Clone)]
pub struct SettingsConfig {
    /// Base directory the settings file lives in
    pub base_dir: PathBuf,
    /// Settings file name; empty falls back to the default
    pub file_name: String,
    /// Schema version this build writes
    pub schema_version: u32,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::new(),
            file_name: DEFAULT_SETTINGS_FILE.to_string(),
            schema_version: 1,
        }
    }
}

/// JSON-backed settings store.
///
/// Construction requires a bound logger and a non-empty base directory;
/// configuration errors surface synchronously as `InvalidArgument`. The
/// store logs its own activity through the injected logger.
pub struct SettingsStore {
    config: SettingsConfig,
    logger: Logger,
    current: RwLock<Arc<AppSettings>>,
}

impl SettingsStore {
    /// Create the store and load the settings file if one exists.
    ///
    /// An absent file means compiled-in defaults; a malformed file is an
    /// `InvalidArgument` error, reported to the caller rather than
    /// silently replaced.
    pub fn new(logger: Logger, mut config: SettingsConfig) -> CoreResult<Self> {
        if !logger.is_bound() {
            return Err(CoreError::InvalidArgument(
                "a bound logger must be provided to the settings store".to_string(),
            ));
        }
        if config.base_dir.as_os_str().is_empty() {
            return Err(CoreError::InvalidArgument(
                "a base directory must be provided to the settings store".to_string(),
            ));
        }
        if config.file_name.is_empty() {
            config.file_name = DEFAULT_SETTINGS_FILE.to_string();
        }

        let store = Self {
            config,
            logger,
            current: RwLock::new(Arc::new(AppSettings::default())),
        };
        store.load_existing()?;
        Ok(store)
    }

    fn load_existing(&self) -> CoreResult<()> {
        let path = self.path();
        if !path.exists() {
            self.logger.debug(format!(
                "no settings file at {}, using defaults",
                path.display()
            ));
            return Ok(());
        }

        let text = fs::read_to_string(&path)?;
        let settings = AppSettings::from_json(&text)?;
        self.logger
            .info(format!("loaded settings from {}", path.display()));
        *self.current.write() = Arc::new(settings);
        Ok(())
    }

    /// Full path of the settings file.
    pub fn path(&self) -> PathBuf {
        self.config.base_dir.join(&self.config.file_name)
    }

    /// The active snapshot. Cheap to clone, read-only.
    pub fn snapshot(&self) -> Arc<AppSettings> {
        Arc::clone(&self.current.read())
    }

    /// Replace the active snapshot in memory; persist with [`save`].
    ///
    /// [`save`]: SettingsStore::save
    pub fn update(&self, settings: AppSettings) {
        *self.current.write() = Arc::new(settings);
    }

    /// Re-read the settings file from disk.
    pub fn reload(&self) -> CoreResult<()> {
        self.load_existing()
    }

    /// Write the active snapshot to disk as pretty JSON.
    pub fn save(&self) -> CoreResult<()> {
        let json = self.snapshot().to_json()?;
        fs::create_dir_all(&self.config.base_dir)?;
        fs::write(self.path(), json)?;
        self.logger
            .info(format!("saved settings to {}", self.path().display()));
        Ok(())
    }
}
