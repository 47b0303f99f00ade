use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use viewer_core::TooltipAction;

use super::types::{Command, CommandOutcome, Screen};
use super::App;

impl Command {
    pub(super) fn from_key(app: &App, key: KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c')) {
            return Some(Command::Exit);
        }
        if app.show_help {
            return matches!(key.code, KeyCode::Esc | KeyCode::Char('?'))
                .then_some(Command::CloseHelp);
        }
        if app.tooltip.is_visible() {
            match key.code {
                KeyCode::Enter => return Some(Command::Tooltip(TooltipAction::Highlight)),
                KeyCode::Char('a') => return Some(Command::Tooltip(TooltipAction::AskAi)),
                KeyCode::Esc => return Some(Command::Tooltip(TooltipAction::Dismiss)),
                KeyCode::Char('y') => return Some(Command::CopySelection),
                _ => {}
            }
        }

        match key.code {
            KeyCode::Char('q') => return Some(Command::Exit),
            KeyCode::Char('?') => return Some(Command::ToggleHelp),
            _ => {}
        }

        match app.screen() {
            Screen::Upload => match key.code {
                KeyCode::Char('k') | KeyCode::Up => Some(Command::PickerUp),
                KeyCode::Char('j') | KeyCode::Down => Some(Command::PickerDown),
                KeyCode::Enter => Some(Command::PickerOpen),
                KeyCode::Char('r') => Some(Command::PickerRefresh),
                _ => None,
            },
            Screen::Viewer => match key.code {
                KeyCode::Esc if app.error_visible() => Some(Command::DismissError),
                KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Some(Command::PreviousPage),
                KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => Some(Command::NextPage),
                KeyCode::Char('j') | KeyCode::Down => Some(Command::ScrollDown(1)),
                KeyCode::Char('k') | KeyCode::Up => Some(Command::ScrollUp(1)),
                KeyCode::Char('d') if ctrl => Some(Command::ScrollDown(10)),
                KeyCode::Char('u') if ctrl => Some(Command::ScrollUp(10)),
                KeyCode::Char('o') => Some(Command::OpenUpload),
                _ => None,
            },
        }
    }
}

impl App {
    /// Routes one terminal event. Render results are picked up by
    /// [`App::update`].
    pub fn handle_event(&mut self, event: Event) -> CommandOutcome {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(command) = Command::from_key(self, key) {
                    return self.apply_command(command);
                }
            }
            Event::Mouse(mouse) => {
                if !self.show_help {
                    self.handle_mouse(mouse);
                }
            }
            Event::Paste(text) => self.handle_drop(&text),
            _ => {}
        }
        CommandOutcome::Continue
    }

    pub(super) fn apply_command(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Exit => return CommandOutcome::Exit,
            Command::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            Command::CloseHelp => {
                self.show_help = false;
            }
            Command::PreviousPage => self.go_previous(),
            Command::NextPage => self.go_next(),
            Command::ScrollDown(n) => self.scroll_by(i32::from(n)),
            Command::ScrollUp(n) => self.scroll_by(-i32::from(n)),
            Command::Tooltip(action) => self.apply_tooltip_action(action),
            Command::CopySelection => self.copy_pending(),
            Command::DismissError => self.dismiss_error(),
            Command::OpenUpload => self.close_file(),
            Command::PickerUp => self.picker.up(),
            Command::PickerDown => self.picker.down(),
            Command::PickerOpen => self.open_picked(),
            Command::PickerRefresh => self.refresh_picker(),
        }
        CommandOutcome::Continue
    }
}
