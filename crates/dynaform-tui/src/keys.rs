//! Keyboard input handling.
//!
//! Key events arrive from crossterm and are translated into [`KeyMsg`]
//! values, the only message type the application model consumes.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keyboard key event message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMsg {
    /// The type of key pressed.
    pub key_type: KeyType,
    /// For [`KeyType::Runes`], the characters typed.
    pub runes: Vec<char>,
}

impl KeyMsg {
    /// Create a new key message from a key type.
    #[must_use]
    pub const fn from_type(key_type: KeyType) -> Self {
        Self {
            key_type,
            runes: Vec::new(),
        }
    }

    /// Create a new key message from a character.
    #[must_use]
    pub fn from_char(c: char) -> Self {
        Self {
            key_type: KeyType::Runes,
            runes: vec![c],
        }
    }
}

/// The keys this application binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Regular character input.
    Runes,
    /// Enter.
    Enter,
    /// Escape.
    Esc,
    /// Tab.
    Tab,
    /// Shift+Tab.
    ShiftTab,
    /// Backspace.
    Backspace,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Space.
    Space,
    /// Ctrl+C.
    CtrlC,
}

/// Translates a crossterm key event into a [`KeyMsg`].
///
/// Release and repeat-release events and unbound keys map to `None`.
#[must_use]
pub fn translate(event: &KeyEvent) -> Option<KeyMsg> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(KeyMsg::from_type(KeyType::CtrlC)),
            _ => None,
        };
    }

    match event.code {
        KeyCode::Enter => Some(KeyMsg::from_type(KeyType::Enter)),
        KeyCode::Esc => Some(KeyMsg::from_type(KeyType::Esc)),
        KeyCode::Tab => Some(KeyMsg::from_type(KeyType::Tab)),
        KeyCode::BackTab => Some(KeyMsg::from_type(KeyType::ShiftTab)),
        KeyCode::Backspace => Some(KeyMsg::from_type(KeyType::Backspace)),
        KeyCode::Up => Some(KeyMsg::from_type(KeyType::Up)),
        KeyCode::Down => Some(KeyMsg::from_type(KeyType::Down)),
        KeyCode::Left => Some(KeyMsg::from_type(KeyType::Left)),
        KeyCode::Right => Some(KeyMsg::from_type(KeyType::Right)),
        KeyCode::Char(' ') => Some(KeyMsg::from_type(KeyType::Space)),
        KeyCode::Char(c) => Some(KeyMsg::from_char(c)),
        _ => None,
    }
}
