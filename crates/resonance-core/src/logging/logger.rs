//! Named logger handles.
//!
//! A [`Logger`] is the unit user code logs through: a name, a severity
//! threshold, and a reference to the session's shared [`SinkSet`]. Handles
//! are cheap to clone and every clone (and every registry `get` of the
//! same name) shares the same underlying state.

use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;

use super::level::Level;
use super::sink::SinkSet;
use crate::error::{CoreError, CoreResult};

/// Binding of a logger to its session resources.
///
/// An explicit two-variant state instead of a nullable sink reference;
/// the detached behaviors (loud query, silent mutation) dispatch on the
/// variant.
enum LoggerState {
    Bound { level: Level, sinks: Arc<SinkSet> },
    Detached,
}

struct LoggerShared {
    name: String,
    state: Mutex<LoggerState>,
}

/// Handle to a named logger.
///
/// Mutations through one handle are visible through every other handle of
/// the same name. A handle that outlives `LogRegistry::shutdown()` becomes
/// *detached*: `get_level` fails with `InvalidState`, while `log`,
/// `set_level` and `flush` degrade to silent no-ops.
#[derive(Clone)]
pub struct Logger {
    shared: Arc<LoggerShared>,
}

impl Logger {
    /// Create a logger bound to a sink set, at the default `Trace` level.
    pub(crate) fn bound(name: impl Into<String>, sinks: Arc<SinkSet>) -> Self {
        Self {
            shared: Arc::new(LoggerShared {
                name: name.into(),
                state: Mutex::new(LoggerState::Bound {
                    level: Level::Trace,
                    sinks,
                }),
            }),
        }
    }

    /// The name this logger was registered under.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Log `msg` at `level`, subject to this logger's threshold.
    ///
    /// Messages below the threshold cost no formatting and no I/O. The
    /// sink set reference is cloned out of the state lock before any I/O,
    /// so logging never holds two locks at once.
    pub fn log(&self, level: Level, msg: impl AsRef<str>) {
        if level == Level::Off {
            return;
        }
        let sinks = {
            let state = self.shared.state.lock();
            match *state {
                LoggerState::Bound {
                    level: threshold,
                    ref sinks,
                } => {
                    if level < threshold {
                        return;
                    }
                    Arc::clone(sinks)
                }
                LoggerState::Detached => return,
            }
        };

        let line = format!(
            "{} [{}] [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            self.shared.name,
            level,
            msg.as_ref()
        );
        sinks.write_line(&line);
    }

    /// Log at `Trace`.
    pub fn trace(&self, msg: impl AsRef<str>) {
        self.log(Level::Trace, msg);
    }

    /// Log at `Debug`.
    pub fn debug(&self, msg: impl AsRef<str>) {
        self.log(Level::Debug, msg);
    }

    /// Log at `Info`.
    pub fn info(&self, msg: impl AsRef<str>) {
        self.log(Level::Info, msg);
    }

    /// Log at `Warn`.
    pub fn warn(&self, msg: impl AsRef<str>) {
        self.log(Level::Warn, msg);
    }

    /// Log at `Error`.
    pub fn error(&self, msg: impl AsRef<str>) {
        self.log(Level::Error, msg);
    }

    /// Log at `Critical`.
    pub fn critical(&self, msg: impl AsRef<str>) {
        self.log(Level::Critical, msg);
    }

    /// Set this logger's own threshold. Independent of every other logger;
    /// silent no-op on a detached handle.
    pub fn set_level(&self, level: Level) {
        if let LoggerState::Bound {
            level: threshold, ..
        } = &mut *self.shared.state.lock()
        {
            *threshold = level;
        }
    }

    /// This logger's current threshold.
    ///
    /// The one loud operation in the detached contract: fails with
    /// `InvalidState` on a detached handle.
    pub fn get_level(&self) -> CoreResult<Level> {
        match *self.shared.state.lock() {
            LoggerState::Bound { level, .. } => Ok(level),
            LoggerState::Detached => Err(CoreError::InvalidState(format!(
                "logger '{}' is detached",
                self.shared.name
            ))),
        }
    }

    /// Whether this handle is still bound to live session resources.
    pub fn is_bound(&self) -> bool {
        matches!(*self.shared.state.lock(), LoggerState::Bound { .. })
    }

    /// Block until this logger's sinks have committed buffered output.
    /// Silent no-op on a detached handle.
    pub fn flush(&self) {
        let sinks = match *self.shared.state.lock() {
            LoggerState::Bound { ref sinks, .. } => Arc::clone(sinks),
            LoggerState::Detached => return,
        };
        sinks.flush();
    }

    /// Release the binding. Only the registry detaches, at shutdown.
    pub(crate) fn detach(&self) {
        *self.shared.state.lock() = LoggerState::Detached;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::sink::LogConfig;
    use std::fs;
    use tempfile::TempDir;

    fn test_sinks(temp: &TempDir) -> Arc<SinkSet> {
        let config = LogConfig {
            console: false,
            flush_interval: None,
            ..LogConfig::default()
        };
        Arc::new(SinkSet::build(temp.path(), &config).unwrap())
    }

    #[test]
    fn test_new_logger_defaults_to_trace() {
        let temp = TempDir::new().unwrap();
        let logger = Logger::bound("audio", test_sinks(&temp));

        assert_eq!(logger.get_level().unwrap(), Level::Trace);
        assert_eq!(logger.name(), "audio");
        assert!(logger.is_bound());
    }

    #[test]
    fn test_threshold_filters_below_level() {
        let temp = TempDir::new().unwrap();
        let sinks = test_sinks(&temp);
        let path = sinks.session_path().to_path_buf();
        let logger = Logger::bound("audio", sinks);

        logger.set_level(Level::Warn);
        logger.info("too quiet to pass");
        logger.warn("loud enough");
        logger.critical("definitely loud enough");
        logger.flush();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("too quiet to pass"));
        assert!(content.contains("loud enough"));
        assert!(content.contains("definitely loud enough"));
    }

    #[test]
    fn test_off_threshold_suppresses_everything() {
        let temp = TempDir::new().unwrap();
        let sinks = test_sinks(&temp);
        let path = sinks.session_path().to_path_buf();
        let logger = Logger::bound("audio", sinks);

        logger.set_level(Level::Off);
        logger.critical("still silenced");
        logger.flush();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_line_format_carries_name_and_level() {
        let temp = TempDir::new().unwrap();
        let sinks = test_sinks(&temp);
        let path = sinks.session_path().to_path_buf();
        let logger = Logger::bound("engine", sinks);

        logger.info("buffers primed");
        logger.flush();

        let content = fs::read_to_string(&path).unwrap();
        let line = content.lines().next().unwrap();
        assert!(line.contains("[engine]"));
        assert!(line.contains("[info]"));
        assert!(line.ends_with("buffers primed"));
    }

    #[test]
    fn test_clones_share_level_mutations() {
        let temp = TempDir::new().unwrap();
        let logger = Logger::bound("audio", test_sinks(&temp));
        let clone = logger.clone();

        clone.set_level(Level::Error);
        assert_eq!(logger.get_level().unwrap(), Level::Error);
    }

    #[test]
    fn test_detached_contract() {
        let temp = TempDir::new().unwrap();
        let logger = Logger::bound("audio", test_sinks(&temp));
        logger.detach();

        // Query fails loudly
        assert!(matches!(
            logger.get_level(),
            Err(CoreError::InvalidState(_))
        ));
        assert!(!logger.is_bound());

        // Mutations degrade to silent no-ops
        logger.log(Level::Critical, "into the void");
        logger.set_level(Level::Debug);
        logger.flush();
        assert!(matches!(
            logger.get_level(),
            Err(CoreError::InvalidState(_))
        ));
    }
}
