//! Main window of the diversity calculator. The window is two-phase: it is
//! constructed inert with just the data-source names, activated by attaching
//! its controller, and only then shown. `show` rejects a window with no
//! controller, which turns the startup ordering invariant into a checked
//! contract instead of an implicit call-order convention.

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use thiserror::Error;

use super::helpers::surface_error;
use crate::controller::Controller;
use crate::APP_TITLE;

/// Header space reserved for the title and age-range summary.
const HEADER_HEIGHT: u16 = 4;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Violations of the window's activation contract.
#[derive(Debug, Error)]
pub enum WindowError {
    /// `show` was called before a controller was attached.
    #[error("window shown before a controller was attached")]
    ControllerNotAttached,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// The main window. Until a controller is attached it knows only the
/// data-source names handed over at construction, and renders a partial
/// loading state from them.
pub struct MainWindow {
    /// Source names known before the model exists.
    data_sources: Vec<String>,
    controller: Option<Controller>,
    shown: bool,
    status: Option<StatusMessage>,
}

impl MainWindow {
    /// Construct the inert window from the configured data-source names.
    pub fn new(data_sources: Vec<String>) -> Self {
        Self {
            data_sources,
            controller: None,
            shown: false,
            status: None,
        }
    }

    /// The data-source names the window was constructed with.
    pub fn data_source_names(&self) -> &[String] {
        &self.data_sources
    }

    /// Activate the window by attaching the controller that drives it.
    pub fn attach_controller(&mut self, controller: Controller) {
        self.controller = Some(controller);
    }

    pub fn has_controller(&self) -> bool {
        self.controller.is_some()
    }

    /// The attached controller, once activation has happened.
    pub fn controller(&self) -> Option<&Controller> {
        self.controller.as_ref()
    }

    /// Mark the window visible. Fails until a controller is attached so an
    /// unactivated window can never reach the screen.
    pub fn show(&mut self) -> Result<(), WindowError> {
        if self.controller.is_none() {
            return Err(WindowError::ControllerNotAttached);
        }
        self.shown = true;
        Ok(())
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Top-level key dispatcher. The boolean result tells the event loop
    /// whether the user requested an exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => self.with_controller(|c| c.move_selection(-1)),
            KeyCode::Down => self.with_controller(|c| c.move_selection(1)),
            KeyCode::PageUp => self.with_controller(|c| c.move_selection(-5)),
            KeyCode::PageDown => self.with_controller(|c| c.move_selection(5)),
            KeyCode::Home => self.with_controller(Controller::select_first),
            KeyCode::End => self.with_controller(Controller::select_last),
            KeyCode::Enter => {
                if let Some(controller) = &self.controller {
                    match controller.open_selected() {
                        Ok(message) => self.set_status(message, StatusKind::Info),
                        Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                    }
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn with_controller(&mut self, action: impl FnOnce(&mut Controller)) {
        if let Some(controller) = &mut self.controller {
            action(controller);
        }
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    /// Main render routine invoked each tick by the event loop. Splits the
    /// frame into header, source table, and footer regions.
    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT.min(area.height)),
                Constraint::Min(1),
                Constraint::Length(FOOTER_HEIGHT.min(area.height)),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        self.draw_sources(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(Span::styled(
            APP_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        match self.controller.as_ref().map(Controller::model) {
            Some(model) => {
                lines.push(Line::from(format!("{} data sources", model.len())));
                if let Some(ranges) = model.age_ranges() {
                    lines.push(Line::from(format!(
                        "Custom age ranges: {}",
                        ranges.join(", ")
                    )));
                }
            }
            None => {
                lines.push(Line::from(format!(
                    "{} data sources (loading)",
                    self.data_sources.len()
                )));
            }
        }

        let header = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn draw_sources(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Data Sources");

        let Some(controller) = &self.controller else {
            // Partial state: the controller is not attached yet, so only the
            // configured names are known.
            let lines: Vec<Line> = self
                .data_sources
                .iter()
                .map(|name| Line::from(format!("{name}  (loading)")))
                .collect();
            let placeholder = Paragraph::new(lines).block(block);
            frame.render_widget(placeholder, area);
            return;
        };

        let model = controller.model();
        if model.is_empty() {
            let message = Paragraph::new("No data sources configured.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let lines: Vec<Line> = model
            .sources()
            .iter()
            .enumerate()
            .map(|(idx, source)| {
                let detail = if source.is_loaded() {
                    format!(
                        "{} sheets, {} rows",
                        source.sheets.len(),
                        source.total_rows()
                    )
                } else {
                    "no workbook".to_string()
                };
                let text = format!("{:<28} {}", source.name, detail);
                if idx == controller.selected_index() {
                    Line::from(Span::styled(
                        text,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(text)
                }
            })
            .collect();

        let table = Paragraph::new(lines).block(block);
        frame.render_widget(table, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

fn footer_instructions() -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled("[↑↓]", key_style),
        Span::raw(" Select   "),
        Span::styled("[Enter]", key_style),
        Span::raw(" Open Workbook   "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit"),
    ])
}
