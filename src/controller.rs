//! Controller binding the main window to its table model and the shared
//! configuration. The window stays a presentation shell: everything
//! data-driven (which sources exist, which one is selected, what opening a
//! source means) is answered here.

use std::rc::Rc;

use anyhow::{anyhow, Result};
use open::that as open_path;
use tracing::debug;

use crate::config::AppConfig;
use crate::models::{SourceSummary, TableModel};
use crate::ui::MainWindow;

/// Drives the main window from the table model. Constructed after the window
/// and the model, attached to the window before it is shown.
pub struct Controller {
    model: TableModel,
    config: Rc<AppConfig>,
    selected: usize,
}

impl Controller {
    /// Bind a controller to the window it will drive. The window reference
    /// documents the wiring order (window first, controller last) and lets
    /// the binding be logged against the view it targets; the controller
    /// itself only retains the model and the shared configuration.
    pub fn new(window: &MainWindow, model: TableModel, config: Rc<AppConfig>) -> Self {
        debug!(
            window_sources = window.data_source_names().len(),
            model_sources = model.len(),
            "binding controller to window"
        );
        Self {
            model,
            config,
            selected: 0,
        }
    }

    /// The table model this controller presents.
    pub fn model(&self) -> &TableModel {
        &self.model
    }

    /// The configuration shared across the application.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Index of the currently selected source.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The currently selected source, if the model has any.
    pub fn selected_source(&self) -> Option<&SourceSummary> {
        self.model.sources().get(self.selected)
    }

    /// Move the selection by `offset`, clamped to the source list.
    pub fn move_selection(&mut self, offset: isize) {
        if self.model.is_empty() {
            return;
        }
        let last = self.model.len() - 1;
        let target = self.selected as isize + offset;
        self.selected = target.clamp(0, last as isize) as usize;
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.model.len().saturating_sub(1);
    }

    /// Open the selected source's workbook with the system default
    /// application. Returns the status message to surface in the footer.
    pub fn open_selected(&self) -> Result<String> {
        let source = self
            .selected_source()
            .ok_or_else(|| anyhow!("No data source selected."))?;
        let path = source
            .path
            .as_ref()
            .ok_or_else(|| anyhow!("This data source does not have a workbook file."))?;
        open_path(path).map_err(|err| anyhow!("Failed to open workbook: {err}"))?;
        Ok(format!("Opened {}.", source.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataSourceSpec;

    fn controller_with_sources(names: &[&str]) -> Controller {
        let specs: Vec<DataSourceSpec> = names
            .iter()
            .map(|n| DataSourceSpec::Name((*n).to_string()))
            .collect();
        let config = Rc::new(AppConfig {
            data_sources: specs.clone(),
            custom_age_ranges: None,
        });
        let window = MainWindow::new(config.data_source_names());
        let model = TableModel::load(&specs, None).unwrap();
        Controller::new(&window, model, config)
    }

    #[test]
    fn selection_is_clamped_to_the_source_list() {
        let mut controller = controller_with_sources(&["A", "B", "C"]);
        assert_eq!(controller.selected_index(), 0);
        controller.move_selection(-1);
        assert_eq!(controller.selected_index(), 0);
        controller.move_selection(5);
        assert_eq!(controller.selected_index(), 2);
        controller.select_first();
        assert_eq!(controller.selected_index(), 0);
        controller.select_last();
        assert_eq!(controller.selected_index(), 2);
    }

    #[test]
    fn opening_a_pathless_source_reports_an_error() {
        let controller = controller_with_sources(&["A"]);
        let err = controller.open_selected().unwrap_err();
        assert!(err.to_string().contains("does not have a workbook"));
    }
}
