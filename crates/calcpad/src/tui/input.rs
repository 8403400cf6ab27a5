//! Keyboard input handling for the terminal keypad

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::InputEvent;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Feed an event to the calculator
    Input(InputEvent),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default, Clone, Copy)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> AppAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        // Windows reports releases too
        if kind == KeyEventKind::Release {
            return AppAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => AppAction::Quit,
                KeyCode::Char('l' | 'u') => AppAction::Input(InputEvent::Clear),
                _ => AppAction::None,
            };
        }

        let event = match code {
            KeyCode::Char('q' | 'Q') => return AppAction::Quit,
            KeyCode::Char(c) => InputEvent::from_sequence_char(c),
            KeyCode::Enter => Some(InputEvent::Compute),
            KeyCode::Backspace => Some(InputEvent::DeleteLast),
            KeyCode::Esc | KeyCode::Delete => Some(InputEvent::Clear),
            _ => None,
        };

        event.map_or(AppAction::None, AppAction::Input)
    }
}
