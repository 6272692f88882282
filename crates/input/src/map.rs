//! Key mapping from terminal events to player intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keys whose held state drives the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeldKey {
    Left,
    Right,
    Rotate,
    SoftDrop,
}

impl HeldKey {
    pub const ALL: [HeldKey; 4] = [
        HeldKey::Left,
        HeldKey::Right,
        HeldKey::Rotate,
        HeldKey::SoftDrop,
    ];

    /// Intent reporting this key as pressed (`true`) or released.
    pub fn intent(self, held: bool) -> Intent {
        match self {
            HeldKey::Left => Intent::MoveLeft(held),
            HeldKey::Right => Intent::MoveRight(held),
            HeldKey::Rotate => Intent::Rotate(held),
            HeldKey::SoftDrop => Intent::SoftDrop(held),
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Which held key, if any, a key code drives.
pub fn held_key(code: KeyCode) -> Option<HeldKey> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(HeldKey::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(HeldKey::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(HeldKey::Rotate),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(HeldKey::SoftDrop),
        _ => None,
    }
}

/// One-shot intents fired on press only.
pub fn command_intent(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Some(Intent::TogglePause),
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(Intent::Reset),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
