//! Resonance Core Library
//!
//! Application core for the Resonance desktop shell. Owns the process-wide
//! infrastructure: the logging subsystem (named loggers fanning out to a
//! shared console + rotating-file sink set) and the JSON-backed settings
//! store.
//!
//! ## Quick Start
//!
//! ```ignore
//! use resonance_core::{AppCore, CoreConfig};
//!
//! let core = AppCore::new(CoreConfig::default())?;
//!
//! let logger = core.registry().get("ui")?;
//! logger.info("shell ready");
//! logger.flush();
//!
//! let audio = core.settings().snapshot().audio.clone();
//! println!("{} Hz / {} frames", audio.sampling_rate, audio.buffer_size);
//!
//! core.shutdown();
//! ```

pub mod core;
pub mod error;
pub mod logging;
pub mod settings;

// Re-exports
pub use crate::core::{AppCore, CoreConfig};
pub use error::{CoreError, CoreResult};
pub use logging::{Level, LogConfig, LogRegistry, Logger, RotationPolicy};
pub use settings::{AppSettings, AudioSettings, GeneralSettings, SettingsConfig, SettingsStore};
