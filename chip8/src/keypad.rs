use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};
use log::debug;

use crate::keymap::keymap;

/// How long a key counts as held after a press when the terminal never reports releases
pub const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// # Keypad
/// Tracks which of the 16 keys are down from terminal key events.
///
/// Most terminals only report presses (and auto-repeat them while a key is held), so a press
/// keeps its key down for `HOLD_WINDOW`. Once a release event has been seen the terminal is
/// trusted to report every release and keys stay down until released.
#[derive(Debug, Default)]
pub struct Keypad {
    pressed_at: [Option<Instant>; 16],
    reports_releases: bool,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the keypad from a terminal key event
    ///
    /// # Arguments
    /// * `event` the key event read from the terminal
    /// * `now` when the event was read
    pub fn handle(&mut self, event: &KeyEvent, now: Instant) {
        let key = match keymap(event.code) {
            Some(key) => key as usize,
            None => return,
        };
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.pressed_at[key] = Some(now),
            KeyEventKind::Release => {
                if !self.reports_releases {
                    debug!("terminal reports key releases");
                    self.reports_releases = true;
                }
                self.pressed_at[key] = None;
            }
        }
    }

    pub fn is_down(&self, key: u8) -> bool {
        self.is_down_at(key, Instant::now())
    }

    pub fn is_down_at(&self, key: u8, now: Instant) -> bool {
        match self.pressed_at.get(key as usize).copied().flatten() {
            Some(pressed_at) => {
                self.reports_releases || now.saturating_duration_since(pressed_at) < HOLD_WINDOW
            }
            None => false,
        }
    }
}
