//! Process-wide logger registry.
//!
//! [`LogRegistry`] owns the session [`SinkSet`] and the name → logger
//! cache, and is the sole authority for the init/shutdown lifecycle.
//! It is an explicitly constructed context object: the application core
//! creates one and hands cloned handles to every component that needs
//! logging. There is no hidden global state, so initialization order and
//! test isolation stay explicit.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized ──init──► Ready ──shutdown──► Uninitialized
//! ```
//!
//! `get` is only valid while `Ready`; `init` and `shutdown` are idempotent
//! and valid in any state.
//!
//! ## Locking
//!
//! All lifecycle and cache mutation runs under the single registry lock.
//! The hot `log()` path never takes it: loggers hold their own `Arc` to
//! the sink set. Lock order is strictly registry → (logger | sink), so a
//! log call can never deadlock against the registry.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use super::level::Level;
use super::logger::Logger;
use super::sink::{LogConfig, SinkSet};
use crate::error::{CoreError, CoreResult};

struct RegistryInner {
    initialized: bool,
    sinks: Option<Arc<SinkSet>>,
    loggers: HashMap<String, Logger>,
    flusher: Option<FlushTimer>,
}

/// Process-wide registry of named loggers.
///
/// Cloning the registry clones the handle, not the state: all clones
/// operate on the same cache and sink set.
#[derive(Clone)]
pub struct LogRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl LogRegistry {
    /// Create an uninitialized registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                initialized: false,
                sinks: None,
                loggers: HashMap::new(),
                flusher: None,
            })),
        }
    }

    /// Initialize with the default configuration, logging into `log_dir`
    /// (or the platform default when `None`).
    ///
    /// Idempotent: once initialized, later calls return immediately and
    /// keep the first session's sinks and cached loggers, even if they
    /// name a different directory.
    pub fn init(&self, log_dir: Option<PathBuf>) -> CoreResult<()> {
        self.init_with(LogConfig {
            log_dir,
            ..LogConfig::default()
        })
    }

    /// Initialize with an explicit sink configuration.
    ///
    /// Safe to call concurrently: exactly one caller performs the
    /// construction, every other caller observes the post-condition.
    /// Directory or session-file creation failures surface as
    /// [`CoreError::Io`] and leave the registry uninitialized.
    pub fn init_with(&self, config: LogConfig) -> CoreResult<()> {
        let mut inner = self.inner.lock();
        if inner.initialized {
            return Ok(());
        }

        let log_dir = config.log_dir.clone().unwrap_or_else(default_log_dir);
        let sinks = Arc::new(SinkSet::build(&log_dir, &config)?);

        inner.flusher = config
            .flush_interval
            .map(|period| FlushTimer::start(Arc::clone(&sinks), period));
        inner.sinks = Some(sinks);
        inner.initialized = true;
        Ok(())
    }

    /// Tear the session down: stop the flush timer, detach every cached
    /// logger, flush and release the sinks, clear the cache.
    ///
    /// Never fails; safe to call repeatedly or before any `init`. Handles
    /// retained by callers across shutdown follow the detached contract
    /// (`get_level` fails, mutations no-op).
    pub fn shutdown(&self) {
        let mut inner = self.inner.lock();

        if let Some(flusher) = inner.flusher.take() {
            flusher.stop();
        }
        for logger in inner.loggers.values() {
            logger.detach();
        }
        inner.loggers.clear();
        if let Some(sinks) = inner.sinks.take() {
            sinks.flush();
        }
        inner.initialized = false;
    }

    /// Create or retrieve the named logger.
    ///
    /// The same name always yields the same underlying logger, so level
    /// changes through any returned handle are visible through all of
    /// them. New loggers always start at `Trace`, regardless of what any
    /// other logger's level was set to.
    pub fn get(&self, name: &str) -> CoreResult<Logger> {
        if name.is_empty() {
            return Err(CoreError::InvalidArgument(
                "logger name cannot be empty".to_string(),
            ));
        }

        let mut inner = self.inner.lock();
        if let Some(logger) = inner.loggers.get(name) {
            return Ok(logger.clone());
        }

        let sinks = match inner.sinks {
            Some(ref sinks) if inner.initialized => Arc::clone(sinks),
            _ => return Err(CoreError::NotInitialized),
        };

        let logger = Logger::bound(name, sinks);
        inner.loggers.insert(name.to_string(), logger.clone());
        Ok(logger)
    }

    /// Apply `level` to every currently cached logger.
    ///
    /// A coarse, last-write-wins override: existing loggers report the
    /// new level from `get_level()`, while loggers created afterwards
    /// still start at `Trace`.
    pub fn set_global_level(&self, level: Level) {
        let inner = self.inner.lock();
        for logger in inner.loggers.values() {
            logger.set_level(level);
        }
    }

    /// Whether the registry is between `init` and `shutdown`.
    pub fn is_initialized(&self) -> bool {
        self.inner.lock().initialized
    }

    /// Path of the current session log file, when initialized.
    pub fn session_path(&self) -> Option<PathBuf> {
        self.inner
            .lock()
            .sinks
            .as_ref()
            .map(|sinks| sinks.session_path().to_path_buf())
    }

    /// Flush every sink in the session. No-op when uninitialized.
    pub fn flush(&self) {
        let sinks = self.inner.lock().sinks.as_ref().map(Arc::clone);
        if let Some(sinks) = sinks {
            sinks.flush();
        }
    }
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the default log directory: `<home>/.resonance/logs`, falling
/// back to a process-relative `logs/` when no home directory is available.
fn default_log_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".resonance").join("logs"),
        None => PathBuf::from("logs"),
    }
}

/// Background best-effort flusher.
///
/// A plain thread parked on a condvar: wakes every `period` to flush the
/// sinks, and is woken immediately at shutdown. Explicit `flush()` stays
/// the authoritative mechanism; the timer only bounds how stale the
/// session file can get.
struct FlushTimer {
    stop: Arc<(Mutex<bool>, Condvar)>,
    handle: JoinHandle<()>,
}

impl FlushTimer {
    fn start(sinks: Arc<SinkSet>, period: Duration) -> Self {
        let stop = Arc::new((Mutex::new(false), Condvar::new()));
        let thread_stop = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            let (lock, cvar) = &*thread_stop;
            let mut stopped = lock.lock();
            while !*stopped {
                let timed_out = cvar.wait_for(&mut stopped, period).timed_out();
                if *stopped {
                    break;
                }
                if timed_out {
                    sinks.flush();
                }
            }
        });
        Self { stop, handle }
    }

    fn stop(self) {
        {
            let (lock, cvar) = &*self.stop;
            *lock.lock() = true;
            cvar.notify_all();
        }
        let _ = self.handle.join();
    }
}
