//! Edge-triggered key chords
//!
//! A [`KeyToggle`] fires once when its key goes down with the required
//! modifiers held, then stays silent until the key is released. OS key
//! repeat and level-triggered polling therefore can't re-fire a command.

use super::keyboard::{KeyCode, KeyEvent, ModifierState};

#[derive(Debug, Clone)]
pub struct KeyToggle {
    key: KeyCode,
    required: ModifierState,
    held: bool,
    consumed: bool,
}

impl KeyToggle {
    pub fn new(key: KeyCode, required: ModifierState) -> Self {
        Self {
            key,
            required,
            held: false,
            consumed: false,
        }
    }

    pub fn key(&self) -> KeyCode {
        self.key
    }

    pub fn required(&self) -> ModifierState {
        self.required
    }

    /// Feed a key event. Events for other keys are ignored.
    pub fn update(&mut self, event: &KeyEvent) {
        if event.key != self.key {
            return;
        }

        if event.pressed {
            if !event.modifiers.contains(&self.required) {
                return;
            }
            if !self.held && !self.consumed {
                self.held = true;
                self.consumed = true;
            }
        } else {
            // Release is honoured regardless of modifiers, otherwise letting go
            // of Ctrl before the arrow would leave the chord latched.
            self.held = false;
            self.consumed = false;
        }
    }

    /// Returns `true` exactly once per press.
    pub fn pressed(&mut self) -> bool {
        if self.consumed && self.held {
            self.consumed = false;
            return true;
        }
        false
    }

    pub fn update_and_check(&mut self, event: &KeyEvent) -> bool {
        self.update(event);
        self.pressed()
    }

    /// Forget any held state (focus loss, session end).
    pub fn reset(&mut self) {
        self.held = false;
        self.consumed = false;
    }
}
