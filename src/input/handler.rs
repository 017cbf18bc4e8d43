use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::AbortInput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// A printable key, forwarded to the simulation's abort check
    Key(char),
    Quit,
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
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(c) => KeyAction::Key(c),
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the most recent key until the simulation polls for it
#[derive(Debug, Default, Clone)]
pub struct KeyBuffer {
    last: Option<char>,
}

impl KeyBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever key was buffered
    pub fn push(&mut self, key: char) {
        self.last = Some(key);
    }
}

impl AbortInput for KeyBuffer {
    fn poll_key(&mut self) -> Option<char> {
        self.last.take()
    }
}
