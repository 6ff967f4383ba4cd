//! Integration tests for the startup sequence: configuration parsing and
//! discovery, the fixed assembly order, and the activation contract the
//! launcher relies on.

use std::fs;

use diversity_calculator::{assemble, AppConfig, MainWindow, SplashScreen, WindowError};

#[test]
fn end_to_end_assembly_from_a_minimal_config() {
    let config = AppConfig::parse("data sources: [A, B]\n").unwrap();

    let mut window = assemble(config).unwrap();
    assert!(window.has_controller());

    let controller = window.controller().unwrap();
    assert_eq!(controller.model().source_names(), vec!["A", "B"]);
    assert!(controller.model().age_ranges().is_none());

    // The window is shown only after assembly attached the controller, and
    // the splash can only be dismissed once, afterwards: `finish` consumes it.
    assert!(!window.is_shown());
    window.show().unwrap();
    assert!(window.is_shown());
    let splash = SplashScreen::new();
    splash.finish(&window);
}

#[test]
fn missing_data_sources_fails_before_any_window_exists() {
    let err = AppConfig::parse("custom age ranges: [0-17, 18-34]\n");
    assert!(err.is_err());
}

#[test]
fn custom_age_ranges_flow_through_to_the_model() {
    let yaml = "\
data sources: [A]
custom age ranges: [0-17, 18-34, 35+]
";
    let config = AppConfig::parse(yaml).unwrap();
    let window = assemble(config).unwrap();
    let ranges = window.controller().unwrap().model().age_ranges().unwrap();
    assert_eq!(ranges, ["0-17", "18-34", "35+"]);
}

#[test]
fn a_window_without_a_controller_cannot_be_shown() {
    let mut window = MainWindow::new(vec!["A".to_string()]);
    assert!(matches!(
        window.show(),
        Err(WindowError::ControllerNotAttached)
    ));
}

#[test]
fn configuration_loads_from_a_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "data sources:\n  - name: MIDRC\n  - name: Census\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.data_source_names(), vec!["MIDRC", "Census"]);
    assert!(config.custom_age_ranges.is_none());
}

#[test]
fn unreadable_configuration_surfaces_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("config.yaml");
    let err = AppConfig::load_from(&missing).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn a_source_with_a_missing_workbook_aborts_assembly() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = dir.path().join("nope.xlsx");
    let yaml = format!(
        "data sources:\n  - name: Broken\n    path: {}\n",
        workbook.display()
    );
    let config = AppConfig::parse(&yaml).unwrap();
    assert!(assemble(config).is_err());
}
