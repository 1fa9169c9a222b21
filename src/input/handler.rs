use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Action;

/// What a key press asks the driver to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Step the engine once with this action
    Step(Action),
    Restart,
    Quit,
    /// Ignored key: no step, no re-render
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Left => KeyAction::Step(Action::Left),
            KeyCode::Down => KeyAction::Step(Action::Down),
            KeyCode::Right => KeyAction::Step(Action::Right),
            KeyCode::Up => KeyAction::Step(Action::Up),

            // Movement - WASD and vi keys
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'a' | 'h' => KeyAction::Step(Action::Left),
                's' | 'j' => KeyAction::Step(Action::Down),
                'd' | 'l' => KeyAction::Step(Action::Right),
                'w' | 'k' => KeyAction::Step(Action::Up),
                'q' => KeyAction::Quit,
                'r' => KeyAction::Restart,
                _ => KeyAction::None,
            },

            KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
