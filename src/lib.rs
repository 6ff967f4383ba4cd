//! Core library surface for the diversity calculator.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the integration tests can reuse the same pieces:
//! the configuration loader, the table model, the controller, and the
//! terminal front-end the launcher wires together.

pub mod config;
pub mod controller;
pub mod launcher;
pub mod models;
pub mod ui;

/// Application display name, used for the splash and the window title.
pub const APP_TITLE: &str = "MIDRC Diversity Calculator";

/// The startup configuration and its data-source entries.
pub use config::{AppConfig, ConfigError, DataSourceSpec};

/// The launcher sequence. `launch` runs the whole thing; `assemble` is the
/// terminal-free assembly sub-sequence used by tests.
pub use launcher::{assemble, launch};

/// The data layer handed from the launcher to the controller.
pub use models::{ModelError, SourceSummary, TableModel};

/// The view layer and its activation contract.
pub use controller::Controller;
pub use ui::{AppRuntime, MainWindow, SplashScreen, WindowError};
