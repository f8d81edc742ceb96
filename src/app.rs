use std::sync::Arc;

use dioxus::prelude::*;
use resonance_core::{AppCore, AppSettings};
use tokio::sync::RwLock;

use crate::context::{use_core, use_core_error, use_core_ready, SharedCore};
use crate::get_core_config;
use crate::theme::GLOBAL_STYLES;

/// Root application component.
///
/// Builds the AppCore exactly once on mount (before any component asks
/// for a logger), surfaces initialization failure in the UI instead of
/// crashing, and shuts the core down exactly once at teardown.
#[component]
pub fn App() -> Element {
    let core: Signal<SharedCore> = use_signal(|| Arc::new(RwLock::new(None)));
    let mut core_ready: Signal<bool> = use_signal(|| false);
    let mut core_error: Signal<Option<String>> = use_signal(|| None);

    // Provide core context to all child components
    use_context_provider(|| core);
    use_context_provider(|| core_ready);
    use_context_provider(|| core_error);

    // Initialize the core on mount
    use_effect(move || {
        spawn(async move {
            match AppCore::new(get_core_config()) {
                Ok(app_core) => {
                    let shared = core();
                    let mut guard = shared.write().await;
                    *guard = Some(app_core);
                    drop(guard);
                    core_ready.set(true);
                }
                Err(e) => {
                    // The registry is not up; stderr is all there is
                    eprintln!("Failed to initialize core: {}", e);
                    core_error.set(Some(e.to_string()));
                }
            }
        });
    });

    // Shut the core down exactly once when the shell goes away
    use_drop(move || {
        let shared = core();
        if let Ok(guard) = shared.try_read() {
            if let Some(ref app_core) = *guard {
                app_core.shutdown();
            }
        }
    });

    rsx! {
        style { {GLOBAL_STYLES} }
        StatusView {}
    }
}

/// Status panel: core state, session log path, settings snapshot, and a
/// button that pushes a line through the full logging pipeline from the
/// webview.
#[component]
fn StatusView() -> Element {
    let core = use_core();
    let core_ready = use_core_ready();
    let core_error = use_core_error();

    let mut session_path: Signal<Option<String>> = use_signal(|| None);
    let mut settings: Signal<Option<AppSettings>> = use_signal(|| None);
    let mut last_action: Signal<String> = use_signal(String::new);

    // Pull display data out of the core once it is up
    use_effect(move || {
        if core_ready() {
            spawn(async move {
                let shared = core();
                let guard = shared.read().await;
                if let Some(ref app_core) = *guard {
                    session_path
                        .set(app_core.registry().session_path().map(|p| p.display().to_string()));
                    settings.set(Some((*app_core.settings().snapshot()).clone()));
                }
            });
        }
    });

    let write_test_line = move |_| {
        spawn(async move {
            let shared = core();
            let guard = shared.read().await;
            if let Some(ref app_core) = *guard {
                match app_core.registry().get("ui") {
                    Ok(logger) => {
                        logger.info("test line requested from the shell");
                        logger.flush();
                        last_action.set("wrote a test line to the session log".to_string());
                    }
                    Err(e) => last_action.set(format!("logging unavailable: {}", e)),
                }
            }
        });
    };

    let body = if let Some(err) = core_error() {
        rsx! {
            section { class: "panel panel-error",
                h2 { "Startup failed" }
                p { class: "mono", "{err}" }
                p { class: "hint",
                    "The shell stays up so the error is readable; logging and settings are unavailable."
                }
            }
        }
    } else if core_ready() {
        let path_text = session_path().unwrap_or_else(|| "(unavailable)".to_string());
        let settings_panel = settings().map(|s| {
            let audio_line = format!(
                "{} Hz / {} frames",
                s.audio.sampling_rate, s.audio.buffer_size
            );
            rsx! {
                section { class: "panel",
                    h2 { "Settings" }
                    p { "Schema version: {s.schema_version}" }
                    p { "Log level: {s.general.log_level}" }
                    p { "Audio: {audio_line}" }
                }
            }
        });
        rsx! {
            section { class: "panel",
                h2 { "Session" }
                p { "Log file:" }
                p { class: "mono", "{path_text}" }
                button { class: "btn", onclick: write_test_line, "Write test log line" }
                p { class: "hint", "{last_action}" }
            }
            {settings_panel}
        }
    } else {
        rsx! {
            section { class: "panel",
                p { "Starting core..." }
            }
        }
    };

    rsx! {
        main { class: "status",
            header { class: "status-header",
                h1 { "Resonance" }
                p { class: "tagline", "desktop shell" }
            }
            {body}
        }
    }
}
