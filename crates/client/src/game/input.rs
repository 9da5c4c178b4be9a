use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use pong::Key;

/// How long a key counts as held after its last press or repeat when the
/// terminal cannot report key releases.
const KEY_LATCH: Duration = Duration::from_millis(550);

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::W),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::S),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        _ => None,
    }
}

/// Turns terminal key events into held/released transitions for the game
/// keys. Terminals with release reporting are passed straight through; the
/// rest fall back to a timed latch refreshed by auto-repeat.
pub struct KeyLatch {
    reports_release: bool,
    expiries: HashMap<Key, Instant>,
}

impl KeyLatch {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            expiries: HashMap::new(),
        }
    }

    pub fn on_key(&mut self, event: KeyEvent, now: Instant) -> Option<(Key, bool)> {
        let key = map_key(event.code)?;

        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if !self.reports_release {
                    self.expiries.insert(key, now + KEY_LATCH);
                }
                Some((key, true))
            }
            KeyEventKind::Release => {
                self.expiries.remove(&key);
                Some((key, false))
            }
        }
    }

    /// Keys whose latch ran out since the last call.
    pub fn expire(&mut self, now: Instant) -> Vec<Key> {
        let expired: Vec<Key> = self
            .expiries
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| *key)
            .collect();

        for key in &expired {
            self.expiries.remove(key);
        }
        expired
    }

    pub fn clear(&mut self) {
        self.expiries.clear();
    }
}
