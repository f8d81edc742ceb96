//! End-to-end lifecycle tests: registry, loggers, settings and the core
//! wired together the way the desktop shell uses them.

use std::fs;
use std::path::Path;

use resonance_core::{
    AppCore, AppSettings, CoreConfig, Level, LogConfig, LogRegistry, SettingsConfig, SettingsStore,
};
use tempfile::TempDir;

fn file_only_config(dir: &Path) -> LogConfig {
    LogConfig {
        log_dir: Some(dir.to_path_buf()),
        console: false,
        flush_interval: None,
        ..LogConfig::default()
    }
}

#[test]
fn full_logging_cycle_reaches_the_session_file() {
    let temp = TempDir::new().unwrap();
    let registry = LogRegistry::new();
    registry.init_with(file_only_config(temp.path())).unwrap();

    let logger = registry.get("test").unwrap();
    logger.info(format!("hello, this is a value: {}", 21));
    logger.flush();

    let content = fs::read_to_string(registry.session_path().unwrap()).unwrap();
    assert!(content
        .lines()
        .any(|line| line.ends_with("hello, this is a value: 21")));

    registry.shutdown();
}

#[test]
fn threshold_gates_what_reaches_the_file() {
    let temp = TempDir::new().unwrap();
    let registry = LogRegistry::new();
    registry.init_with(file_only_config(temp.path())).unwrap();

    let logger = registry.get("gate").unwrap();
    logger.set_level(Level::Warn);
    logger.info("filtered before any io");
    logger.warn("survives the threshold");
    logger.flush();

    let content = fs::read_to_string(registry.session_path().unwrap()).unwrap();
    assert!(!content.contains("filtered before any io"));
    assert!(content.contains("survives the threshold"));

    registry.shutdown();
}

#[test]
fn handles_retained_across_shutdown_go_quiet() {
    let temp = TempDir::new().unwrap();
    let registry = LogRegistry::new();
    registry.init_with(file_only_config(temp.path())).unwrap();
    let retained = registry.get("survivor").unwrap();

    registry.shutdown();

    assert!(retained.get_level().is_err());
    retained.info("nobody hears this");
    retained.set_level(Level::Debug);
    retained.flush();
    assert!(!registry.is_initialized());
}

#[test]
fn settings_round_trip_through_the_file_system() {
    let temp = TempDir::new().unwrap();
    let registry = LogRegistry::new();
    registry.init_with(file_only_config(temp.path())).unwrap();
    let logger = registry.get("settings").unwrap();

    let config = SettingsConfig {
        base_dir: temp.path().to_path_buf(),
        ..SettingsConfig::default()
    };

    let store = SettingsStore::new(logger.clone(), config.clone()).unwrap();
    let mut settings = AppSettings::default();
    settings.general.log_level = "debug".to_string();
    settings.audio.buffer_size = 512;
    store.update(settings.clone());
    store.save().unwrap();

    let text = fs::read_to_string(store.path()).unwrap();
    assert!(text.contains("\"sampling_rate\""));

    let reread = SettingsStore::new(logger, config).unwrap();
    assert_eq!(*reread.snapshot(), settings);

    registry.shutdown();
}

#[test]
fn core_boots_logs_and_tears_down() {
    let temp = TempDir::new().unwrap();
    let core = AppCore::new(CoreConfig {
        log_dir: Some(temp.path().to_path_buf()),
        console: false,
        log_level: Level::Info,
    })
    .unwrap();

    // The startup banner is already on disk once flushed
    core.registry().flush();
    let session = core.registry().session_path().unwrap();
    let content = fs::read_to_string(&session).unwrap();
    assert!(content.contains("starting"));

    // Components log through their own named loggers
    let ui = core.registry().get("ui").unwrap();
    ui.info("window mapped");
    ui.flush();
    let content = fs::read_to_string(&session).unwrap();
    assert!(content.contains("[ui]"));
    assert!(content.contains("window mapped"));

    // Settings came up with compiled-in defaults
    let snapshot = core.settings().snapshot();
    assert_eq!(snapshot.audio.sampling_rate, 48_000);

    core.shutdown();
    assert!(!core.registry().is_initialized());
    core.shutdown();
}
