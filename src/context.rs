//! Core context provider for the Resonance shell.
//!
//! Provides the AppCore instance to all components via use_context.

use std::sync::Arc;

use dioxus::prelude::*;
use resonance_core::AppCore;
use tokio::sync::RwLock;

/// Shared core type for context.
///
/// The core is wrapped in Arc<RwLock<>> so components can read
/// concurrently while the mount effect installs it exactly once.
pub type SharedCore = Arc<RwLock<Option<AppCore>>>;

/// Hook to access the AppCore from context.
pub fn use_core() -> Signal<SharedCore> {
    use_context::<Signal<SharedCore>>()
}

/// Hook to check whether the core finished initializing.
pub fn use_core_ready() -> Signal<bool> {
    use_context::<Signal<bool>>()
}

/// Hook to read the startup error, if initialization failed.
pub fn use_core_error() -> Signal<Option<String>> {
    use_context::<Signal<Option<String>>>()
}
