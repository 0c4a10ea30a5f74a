//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Control, Mode};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
    /// Start the guided autofill
    StartTour,
    /// Stop the guided autofill
    CancelTour,
    /// Submit the form
    Submit,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    // Global quit shortcut (Ctrl+C)
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return HandleResult::Quit;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Edit => handle_edit_mode(app, key),
        Mode::Touring => handle_touring_mode(key),
        Mode::Notice => handle_notice_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Char('q') => HandleResult::Quit,

        // Start the tour from anywhere
        KeyCode::Char('a') => HandleResult::StartTour,

        // Control navigation
        KeyCode::Tab => {
            app.focus_next();
            HandleResult::Continue
        }
        KeyCode::BackTab => {
            app.focus_prev();
            HandleResult::Continue
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.focused() != Control::Presets || !app.move_preset_row(true) {
                app.focus_next();
            }
            HandleResult::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.focused() != Control::Presets || !app.move_preset_row(false) {
                app.focus_prev();
            }
            HandleResult::Continue
        }

        // Choices and preset cursor
        KeyCode::Char('h') | KeyCode::Left => {
            app.move_horizontal(false);
            HandleResult::Continue
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.move_horizontal(true);
            HandleResult::Continue
        }

        // Deselect preset
        KeyCode::Backspace | KeyCode::Delete if app.focused() == Control::Presets => {
            app.form.clear_preset();
            app.set_status("Build preset cleared");
            HandleResult::Continue
        }

        // Activate the focused control
        KeyCode::Enter | KeyCode::Char(' ') => match app.focused() {
            Control::StartTour => HandleResult::StartTour,
            Control::Submit => HandleResult::Submit,
            Control::Presets => {
                app.select_preset_at_cursor();
                HandleResult::Continue
            }
            Control::Field(field) if field.is_choice() => {
                app.move_horizontal(true);
                HandleResult::Continue
            }
            Control::Field(_) => {
                app.enter_edit();
                HandleResult::Continue
            }
        },

        KeyCode::Esc => {
            app.clear_status();
            HandleResult::Continue
        }

        _ => HandleResult::Continue,
    }
}

/// Handle keys while typing into a text field
fn handle_edit_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.exit_mode();
            HandleResult::Continue
        }
        KeyCode::Tab => {
            app.exit_mode();
            app.focus_next();
            HandleResult::Continue
        }
        KeyCode::Backspace => {
            app.backspace();
            HandleResult::Continue
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            HandleResult::Continue
        }
        _ => HandleResult::Continue,
    }
}

/// Form interaction is disabled while the tour plays
fn handle_touring_mode(key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Esc => HandleResult::CancelTour,
        _ => HandleResult::Continue,
    }
}

/// The notice blocks everything until dismissed
fn handle_notice_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => {
            app.dismiss_notice();
            HandleResult::Continue
        }
        _ => HandleResult::Continue,
    }
}
