//! Application core: explicit owner of the process-wide infrastructure.
//!
//! The entry point constructs one [`AppCore`] and passes the pieces it
//! owns to every component that needs them. Nothing here lives in a
//! link-time global: initialization order is the order of this module's
//! constructor, and tests build isolated cores side by side.

use std::path::PathBuf;

use crate::error::CoreResult;
use crate::logging::{Level, LogConfig, LogRegistry, Logger};
use crate::settings::{SettingsConfig, SettingsStore};

/// Configuration for bootstrapping the core.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Log directory; `None` resolves to the platform default
    pub log_dir: Option<PathBuf>,
    /// Severity threshold applied to the core's own loggers after startup
    pub log_level: Level,
    /// Mirror log lines to the console as well as the session file
    pub console: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_level: Level::Info,
            console: true,
        }
    }
}

/// Owner of the logging registry and the settings store.
///
/// Construction wires the subsystems in dependency order and surfaces any
/// failure to the caller; the shell decides whether to continue without
/// persistence.
pub struct AppCore {
    registry: LogRegistry,
    settings: SettingsStore,
    logger: Logger,
}

impl AppCore {
    /// Bring up logging and settings.
    pub fn new(config: CoreConfig) -> CoreResult<Self> {
        let registry = LogRegistry::new();
        registry.init_with(LogConfig {
            log_dir: config.log_dir.clone(),
            console: config.console,
            ..LogConfig::default()
        })?;

        let logger = registry.get("core")?;
        logger.info(format!("resonance v{} starting", env!("CARGO_PKG_VERSION")));

        // Settings live next to the session logs
        let base_dir = registry
            .session_path()
            .and_then(|p| p.parent().map(|d| d.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        let settings = SettingsStore::new(
            registry.get("settings")?,
            SettingsConfig {
                base_dir,
                ..SettingsConfig::default()
            },
        )?;

        // Applied last: the global override only touches loggers that
        // already exist, and later ones keep their trace default
        registry.set_global_level(config.log_level);

        Ok(Self {
            registry,
            settings,
            logger,
        })
    }

    /// The logging registry this core owns.
    pub fn registry(&self) -> &LogRegistry {
        &self.registry
    }

    /// The settings store this core owns.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// The core's own logger.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Tear the logging session down.
    ///
    /// Safe to call more than once: the registry shutdown is idempotent,
    /// and on the second pass the farewell line below lands on an already
    /// detached handle and degrades to a no-op, by contract.
    pub fn shutdown(&self) {
        self.logger.info("core shutdown");
        self.registry.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet_config(temp: &TempDir) -> CoreConfig {
        CoreConfig {
            log_dir: Some(temp.path().to_path_buf()),
            console: false,
            ..CoreConfig::default()
        }
    }

    #[test]
    fn test_lifecycle_init_and_shutdown() {
        let temp = TempDir::new().unwrap();
        let core = AppCore::new(quiet_config(&temp)).unwrap();

        assert!(core.registry().is_initialized());
        core.shutdown();
        assert!(!core.registry().is_initialized());
    }

    #[test]
    fn test_double_shutdown_is_safe() {
        let temp = TempDir::new().unwrap();
        let core = AppCore::new(quiet_config(&temp)).unwrap();

        core.shutdown();
        core.shutdown();
        assert!(!core.registry().is_initialized());
    }

    #[test]
    fn test_configured_level_applies_to_core_loggers_only() {
        let temp = TempDir::new().unwrap();
        let core = AppCore::new(CoreConfig {
            log_level: Level::Warn,
            ..quiet_config(&temp)
        })
        .unwrap();

        assert_eq!(core.logger().get_level().unwrap(), Level::Warn);
        // A logger created after bootstrap starts at the trace default
        let fresh = core.registry().get("audio").unwrap();
        assert_eq!(fresh.get_level().unwrap(), Level::Trace);

        core.shutdown();
    }

    #[test]
    fn test_settings_store_sits_next_to_session_log() {
        let temp = TempDir::new().unwrap();
        let core = AppCore::new(quiet_config(&temp)).unwrap();

        assert_eq!(
            core.settings().path(),
            temp.path().join("resonance_settings.json")
        );
        core.shutdown();
    }
}
