//! Held-key tracker for terminal environments.
//!
//! Turns raw key events into press/release intents, reporting each held key
//! only on its edges. Terminals that never emit key-release events are covered
//! by a timeout: a held key that has not been seen (pressed or auto-repeated)
//! for longer than the timeout is reported released.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{command_intent, held_key, HeldKey};
use crate::types::Intent;

// Long enough to bridge the gap between a key press and the terminal's
// auto-repeat stream, short enough that a tap does not feel sticky.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Intents produced by one call; at most one per held key.
pub type Intents = ArrayVec<Intent, 4>;

/// Tracks which movement keys are held.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: [bool; 4],
    last_seen: [Instant; 4],
    key_release_timeout_ms: u32,
    /// Whether the terminal reports key releases itself.
    release_events: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            held: [false; 4],
            last_seen: [now; 4],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Trust release events from the terminal and disable the timeout.
    pub fn with_release_events(mut self, enabled: bool) -> Self {
        self.release_events = enabled;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_held(&self, key: HeldKey) -> bool {
        self.held[key.index()]
    }

    /// Feed one key event; returns the intent it produces, if any.
    ///
    /// Auto-repeated presses of a key already held only refresh its timeout.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Intent> {
        match (held_key(key.code), key.kind) {
            (Some(held), KeyEventKind::Press | KeyEventKind::Repeat) => {
                let i = held.index();
                self.last_seen[i] = Instant::now();
                if self.held[i] {
                    None
                } else {
                    self.held[i] = true;
                    Some(held.intent(true))
                }
            }
            (Some(held), KeyEventKind::Release) => self.release(held),
            (None, KeyEventKind::Press) => command_intent(key.code),
            (None, _) => None,
        }
    }

    fn release(&mut self, key: HeldKey) -> Option<Intent> {
        let i = key.index();
        if !self.held[i] {
            return None;
        }
        self.held[i] = false;
        Some(key.intent(false))
    }

    /// Release every key not seen within the timeout.
    ///
    /// Does nothing when the terminal reports releases itself.
    pub fn update(&mut self) -> Intents {
        let mut intents = Intents::new();
        if self.release_events {
            return intents;
        }

        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        for key in HeldKey::ALL {
            let i = key.index();
            if self.held[i] && self.last_seen[i].elapsed() > timeout {
                if let Some(intent) = self.release(key) {
                    let _ = intents.try_push(intent);
                }
            }
        }
        intents
    }

    /// Release everything; returns the release intents for keys that were held.
    pub fn reset(&mut self) -> Intents {
        let mut intents = Intents::new();
        for key in HeldKey::ALL {
            if let Some(intent) = self.release(key) {
                let _ = intents.try_push(intent);
            }
        }
        intents
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn stale(ih: &mut InputHandler, key: HeldKey, ms: u64) {
        ih.last_seen[key.index()] = Instant::now() - Duration::from_millis(ms);
    }

    #[test]
    fn test_press_reports_edge_once() {
        let mut ih = InputHandler::new();

        assert_eq!(
            ih.handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(Intent::MoveLeft(true))
        );
        // Terminal auto-repeat arrives as more presses.
        assert_eq!(ih.handle_key_event(KeyEvent::from(KeyCode::Left)), None);
        assert_eq!(
            ih.handle_key_event(event(KeyCode::Char('a'), KeyEventKind::Repeat)),
            None
        );
        assert!(ih.is_held(HeldKey::Left));
    }

    #[test]
    fn test_release_event_reports_release() {
        let mut ih = InputHandler::new().with_release_events(true);

        ih.handle_key_event(KeyEvent::from(KeyCode::Up));
        assert_eq!(
            ih.handle_key_event(event(KeyCode::Up, KeyEventKind::Release)),
            Some(Intent::Rotate(false))
        );
        // A second release of a key not held is ignored.
        assert_eq!(
            ih.handle_key_event(event(KeyCode::Up, KeyEventKind::Release)),
            None
        );
    }

    #[test]
    fn test_auto_release_after_timeout() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);

        ih.handle_key_event(KeyEvent::from(KeyCode::Right));
        ih.handle_key_event(KeyEvent::from(KeyCode::Down));
        assert!(ih.update().is_empty());

        stale(&mut ih, HeldKey::Right, 51);
        let intents = ih.update();
        assert_eq!(intents.as_slice(), &[Intent::MoveRight(false)]);
        assert!(!ih.is_held(HeldKey::Right));
        assert!(ih.is_held(HeldKey::SoftDrop));
    }

    #[test]
    fn test_other_keys_do_not_extend_timeout() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);

        ih.handle_key_event(KeyEvent::from(KeyCode::Left));
        stale(&mut ih, HeldKey::Left, 51);
        assert_eq!(
            ih.handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(Intent::Rotate(true))
        );

        let intents = ih.update();
        assert_eq!(intents.as_slice(), &[Intent::MoveLeft(false)]);
    }

    #[test]
    fn test_release_events_disable_timeout() {
        let mut ih = InputHandler::new()
            .with_key_release_timeout_ms(50)
            .with_release_events(true);

        ih.handle_key_event(KeyEvent::from(KeyCode::Left));
        stale(&mut ih, HeldKey::Left, 500);
        assert!(ih.update().is_empty());
        assert!(ih.is_held(HeldKey::Left));
    }

    #[test]
    fn test_commands_pass_through() {
        let mut ih = InputHandler::new();
        assert_eq!(
            ih.handle_key_event(KeyEvent::from(KeyCode::Char('P'))),
            Some(Intent::TogglePause)
        );
        assert_eq!(
            ih.handle_key_event(event(KeyCode::Enter, KeyEventKind::Release)),
            None
        );
    }

    #[test]
    fn test_reset_releases_held_keys() {
        let mut ih = InputHandler::new();
        ih.handle_key_event(KeyEvent::from(KeyCode::Left));
        ih.handle_key_event(KeyEvent::from(KeyCode::Char('s')));

        let intents = ih.reset();
        assert_eq!(
            intents.as_slice(),
            &[Intent::MoveLeft(false), Intent::SoftDrop(false)]
        );
        assert!(ih.reset().is_empty());
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        let ih = InputHandler::new();
        assert!(ih.key_release_timeout_ms() > 0);
    }
}
