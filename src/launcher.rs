//! Application launcher. Startup is a strict seven-step sequence in which
//! each step depends on the side effects of the previous one: acquire the
//! runtime session, paint the splash, load configuration, construct the
//! window, the model, and the controller, then show the window, dismiss the
//! splash, and block in the event loop.
//!
//! There is no local failure handling. A configuration, model, or controller
//! failure unwinds to `main`, which reports it and exits non-zero; the only
//! concession on the error path is restoring the terminal so a failed
//! startup does not leave raw mode behind.

use std::rc::Rc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::AppConfig;
use crate::controller::Controller;
use crate::models::TableModel;
use crate::ui::{AppRuntime, MainWindow, SplashScreen};

/// Launch the diversity calculator and return the event loop's exit status.
pub fn launch() -> Result<i32> {
    let mut runtime = AppRuntime::acquire()?;
    let result = run_startup(&mut runtime);
    if result.is_err() {
        let _ = runtime.restore();
    }
    result
}

/// Steps 2 through 7: everything after the runtime session is up.
fn run_startup(runtime: &mut AppRuntime) -> Result<i32> {
    let splash = SplashScreen::new();
    runtime.render_now(|frame| splash.render(frame))?;

    let config = AppConfig::load().context("failed to load configuration")?;
    info!(
        sources = config.data_sources.len(),
        custom_age_ranges = config.custom_age_ranges.is_some(),
        "configuration loaded"
    );

    let mut window = assemble(config)?;
    window.show()?;
    splash.finish(&window);

    runtime.run(&mut window)
}

/// Steps 3b through 6: build the window, the model, and the controller in
/// their fixed order and activate the window. Factored out of `launch` so
/// the ordering and defaulting behavior is testable without a terminal.
///
/// The window receives the data-source names before the model exists and may
/// render a partial state until the controller is attached; the attachment
/// always happens before the launcher shows the window.
pub fn assemble(config: AppConfig) -> Result<MainWindow> {
    let config = Rc::new(config);

    let mut window = MainWindow::new(config.data_source_names());
    let model = TableModel::load(&config.data_sources, config.custom_age_ranges.clone())
        .context("failed to load data sources")?;
    info!(sources = model.len(), "table model loaded");

    let controller = Controller::new(&window, model, Rc::clone(&config));
    window.attach_controller(controller);
    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_attaches_the_controller_before_show() {
        let config = AppConfig::parse("data sources: [A, B]\n").unwrap();
        let mut window = assemble(config).unwrap();
        assert!(window.has_controller());
        assert!(!window.is_shown());
        window.show().unwrap();
        assert!(window.is_shown());
    }

    #[test]
    fn assemble_fails_when_a_workbook_is_missing() {
        let config = AppConfig::parse(
            "data sources:\n  - name: Broken\n    path: does/not/exist.xlsx\n",
        )
        .unwrap();
        assert!(assemble(config).is_err());
    }
}
