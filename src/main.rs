#![allow(non_snake_case)]

mod app;
pub mod context;
mod theme;

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use resonance_core::{CoreConfig, Level};

/// Core configuration resolved from the command line, set before launch
static CORE_CONFIG: OnceLock<CoreConfig> = OnceLock::new();

/// Get the core configuration (set from command line or default)
pub fn get_core_config() -> CoreConfig {
    CORE_CONFIG.get().cloned().unwrap_or_default()
}

/// Resonance - desktop audio workstation shell
#[derive(Parser, Debug)]
#[command(name = "resonance-desktop")]
#[command(about = "Resonance - desktop audio workstation shell")]
struct Args {
    /// Log directory (defaults to ~/.resonance/logs)
    #[arg(short, long)]
    log_dir: Option<PathBuf>,

    /// Log level for the core loggers: trace, debug, info, warn, error,
    /// critical or off
    #[arg(short = 'L', long, default_value = "info")]
    log_level: String,

    /// Disable the console sink (session file only)
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    let log_level = args.log_level.parse::<Level>().unwrap_or_else(|e| {
        eprintln!("{}; falling back to info", e);
        Level::Info
    });

    // Store the resolved configuration for the root component
    let _ = CORE_CONFIG.set(CoreConfig {
        log_dir: args.log_dir,
        log_level,
        console: !args.quiet,
    });

    // Configure desktop window
    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Resonance")
            .with_inner_size(dioxus::desktop::LogicalSize::new(960.0, 640.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
}
