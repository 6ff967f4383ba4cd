//! Terminal session runtime. This is the process-wide "application runtime
//! handle": acquiring it brings up raw mode and the alternate screen, and the
//! blocking event loop lives here. Acquisition is idempotent per process, so
//! a second launch while a session is live reuses it instead of stacking a
//! second alternate screen on the user's terminal.

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use tracing::debug;

use super::window::MainWindow;

/// Marker tracking whether a terminal session is live in this process.
static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Claim the process-wide session. Returns true when this call began the
/// session and false when a live session already existed.
fn begin_session() -> bool {
    !SESSION_ACTIVE.swap(true, Ordering::SeqCst)
}

/// Release the process-wide session so a later launch can begin a fresh one.
fn end_session() {
    SESSION_ACTIVE.store(false, Ordering::SeqCst);
}

/// Handle to the terminal session and its event loop.
pub struct AppRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Whether this handle began the session and therefore restores it.
    owns_session: bool,
    restored: bool,
}

impl AppRuntime {
    /// Acquire the runtime. The first acquisition in the process enables raw
    /// mode and enters the alternate screen; later acquisitions reuse the
    /// live session and skip the setup.
    pub fn acquire() -> Result<Self> {
        let owns_session = begin_session();
        if owns_session {
            enable_raw_mode().context("failed to enable raw mode")?;
            execute!(io::stdout(), EnterAlternateScreen)
                .context("failed to enter alternate screen")?;
        } else {
            debug!("reusing live terminal session");
        }

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend).context("failed to create terminal backend")?;
        Ok(Self {
            terminal,
            owns_session,
            restored: false,
        })
    }

    /// Paint one frame immediately. This is the single deliberate synchronous
    /// flush during startup: the splash must hit the screen before the
    /// workbook load blocks this thread, and nothing else runs until the
    /// event loop starts.
    pub fn render_now<F>(&mut self, draw: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(|frame| draw(frame))
            .context("failed to draw frame")?;
        Ok(())
    }

    /// Enter the blocking draw/poll loop and keep processing input until the
    /// window requests an exit. Returns the status the process should exit
    /// with; the terminal is restored before returning.
    pub fn run(&mut self, window: &mut MainWindow) -> Result<i32> {
        let result = loop {
            self.terminal
                .draw(|frame| window.draw(frame))
                .context("failed to draw frame")?;

            if event::poll(Duration::from_millis(250)).context("event polling failed")? {
                if let Event::Key(key_event) = event::read().context("failed to read event")? {
                    if key_event.kind == KeyEventKind::Press && window.handle_key(key_event.code)? {
                        break Ok(0);
                    }
                }
            }
        };

        self.restore()?;
        result
    }

    /// Undo the terminal setup. Only the handle that began the session
    /// restores it, and doing so twice is a no-op, so the launcher can call
    /// this on error paths without tracking state.
    pub fn restore(&mut self) -> Result<()> {
        if !self.owns_session || self.restored {
            return Ok(());
        }
        self.restored = true;

        disable_raw_mode().context("failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("failed to leave alternate screen")?;
        self.terminal
            .show_cursor()
            .context("failed to restore cursor visibility")?;
        end_session();
        Ok(())
    }
}
