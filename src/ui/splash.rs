//! Startup splash surface. The splash is an off-screen buffer of fixed
//! dimensions built synchronously at construction, so the launcher can paint
//! it with a single explicit flush before the workbook load blocks the
//! thread. Dismissal consumes the value, which keeps "exactly once, after the
//! window is shown" a property of the types rather than of call discipline.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::Frame;
use tracing::debug;

use super::helpers::centered_fixed_rect;
use super::window::MainWindow;
use crate::APP_TITLE;

/// Fixed splash width in cells, independent of the host terminal size.
pub const SPLASH_WIDTH: u16 = 80;
/// Fixed splash height in cells, independent of the host terminal size.
pub const SPLASH_HEIGHT: u16 = 24;
/// Loading message shown beneath the title while the workbooks are read.
pub const SPLASH_MESSAGE: &str = "Loading Excel files, please wait...";

/// The splash surface shown while startup loads configuration and workbooks.
pub struct SplashScreen {
    buffer: Buffer,
}

impl SplashScreen {
    /// Build the splash with its buffer fully rendered. No other work
    /// happens here; the buffer is ready to display on return.
    pub fn new() -> Self {
        Self {
            buffer: Self::build_buffer(),
        }
    }

    /// Render the splash message centered on a light background. The buffer
    /// is always exactly `SPLASH_WIDTH` × `SPLASH_HEIGHT` cells.
    fn build_buffer() -> Buffer {
        let area = Rect::new(0, 0, SPLASH_WIDTH, SPLASH_HEIGHT);
        let mut buffer = Buffer::empty(area);
        let style = Style::default().bg(Color::White).fg(Color::Black);
        buffer.set_style(area, style);

        let lines = [APP_TITLE, "", SPLASH_MESSAGE];
        let first_row = (SPLASH_HEIGHT - lines.len() as u16) / 2;
        for (offset, line) in lines.iter().enumerate() {
            let x = (SPLASH_WIDTH.saturating_sub(line.len() as u16)) / 2;
            buffer.set_string(x, first_row + offset as u16, line, style);
        }

        buffer
    }

    /// The pre-rendered splash buffer.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Copy the splash buffer into the live frame, centered. Terminals
    /// smaller than the splash see the top-left-anchored centered clip.
    pub fn render(&self, frame: &mut Frame) {
        let target = centered_fixed_rect(SPLASH_WIDTH, SPLASH_HEIGHT, frame.area());
        let buffer = frame.buffer_mut();
        for y in 0..target.height {
            for x in 0..target.width {
                if let (Some(src), Some(dst)) = (
                    self.buffer.cell((x, y)),
                    buffer.cell_mut((target.x + x, target.y + y)),
                ) {
                    *dst = src.clone();
                }
            }
        }
    }

    /// Dismiss the splash. The window is passed so dismissal is tied to the
    /// window's appearance; by this point the launcher has already shown it.
    pub fn finish(self, window: &MainWindow) {
        debug_assert!(window.is_shown());
        debug!("splash dismissed");
    }
}

impl Default for SplashScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer.cell((x, y)).unwrap().symbol())
            .collect()
    }

    #[test]
    fn buffer_has_fixed_dimensions() {
        let splash = SplashScreen::new();
        assert_eq!(splash.buffer().area.width, SPLASH_WIDTH);
        assert_eq!(splash.buffer().area.height, SPLASH_HEIGHT);
    }

    #[test]
    fn buffer_contains_title_and_message() {
        let splash = SplashScreen::new();
        let all_rows: Vec<String> = (0..SPLASH_HEIGHT)
            .map(|y| row_text(splash.buffer(), y))
            .collect();
        assert!(all_rows.iter().any(|row| row.contains(APP_TITLE)));
        assert!(all_rows.iter().any(|row| row.contains(SPLASH_MESSAGE)));
    }

    #[test]
    fn title_is_centered_within_the_buffer() {
        let splash = SplashScreen::new();
        let title_row = (0..SPLASH_HEIGHT)
            .map(|y| row_text(splash.buffer(), y))
            .find(|row| row.contains(APP_TITLE))
            .expect("title row present");
        let start = title_row.find(APP_TITLE).unwrap();
        let end = SPLASH_WIDTH as usize - start - APP_TITLE.len();
        assert!(start.abs_diff(end) <= 1);
    }

    #[test]
    fn background_is_light_with_dark_text() {
        let splash = SplashScreen::new();
        let cell = splash.buffer().cell((0, 0)).unwrap();
        assert_eq!(cell.style().bg, Some(Color::White));
        assert_eq!(cell.style().fg, Some(Color::Black));
    }
}
