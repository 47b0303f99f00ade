use std::{
    io::{self, stdout, Stdout},
    time::Duration,
};

use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::prelude::*;

use super::types::CommandOutcome;
use super::App;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

impl App {
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        info!("terminal ready");

        let result = self.event_loop(&mut terminal);
        if let Err(err) = &result {
            error!("event loop stopped: {}", err);
        }

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
        loop {
            self.update();
            terminal.draw(|f| self.draw(f))?;
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            if self.handle_event(event::read()?) == CommandOutcome::Exit {
                return Ok(());
            }
        }
    }
}

/// Leaves the alternate screen and disables raw mode. Safe to call from a
/// panic hook.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste,
        crossterm::cursor::Show
    );
}
