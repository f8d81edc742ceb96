//! Logging subsystem: named loggers over a shared sink set.
//!
//! ## Architecture
//!
//! ```text
//! LogRegistry ── owns ──► SinkSet ──► RotatingFileSink ──► <dir>/resonance_<ts>.log{,.1,.2,...}
//!      │                     └──────► ConsoleSink ───────► stdout
//!      └── caches ──► Logger("core"), Logger("ui"), Logger("audio"), ...
//! ```
//!
//! The registry is created and owned by the application core and handed
//! (cloned) to every component that needs logging. `init` builds the sink
//! set exactly once per session; every named logger created during that
//! session shares it read-only.
//!
//! ## Usage
//!
//! ```ignore
//! use resonance_core::logging::LogRegistry;
//!
//! let registry = LogRegistry::new();
//! registry.init(None)?;
//!
//! let logger = registry.get("engine")?;
//! logger.info("engine ready");
//! logger.flush();
//!
//! registry.shutdown();
//! ```

pub mod level;
pub mod logger;
pub mod registry;
pub mod sink;

// Re-exports for convenience
pub use level::Level;
pub use logger::Logger;
pub use registry::LogRegistry;
pub use sink::{ConsoleSink, LogConfig, RotatingFileSink, RotationPolicy, Sink, SinkSet};
