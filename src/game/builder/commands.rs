//! Build Commands
//!
//! The discrete commands the placement session understands, and the decoder
//! that turns raw input events into them.
//!
//! Default bindings:
//!
//! | Input                         | Command                  |
//! |-------------------------------|--------------------------|
//! | Space                         | `Place`                  |
//! | Ctrl + Up / Down              | `ElevateUp` / `ElevateDown` |
//! | Ctrl + Left / Right           | `RotatePreview(-90 / +90)` |
//! | Ctrl + Left Alt               | `ToggleSnapMode`         |
//! | Shift + Scroll                | `Rescale(delta)`         |
//! | Ctrl or Shift + Middle click  | `ResetScale`             |

use crate::input::{InputEvent, KeyCode, KeyToggle, ModifierState, MouseButton};

/// One edge-triggered builder command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildCommand {
    /// Commit the ghost as a permanent module
    Place,
    /// Grow (positive) or shrink (negative) the ghost footprint
    Rescale(f32),
    /// Restore the prototype's authored scale
    ResetScale,
    ElevateUp,
    ElevateDown,
    /// Yaw the ghost by the given number of degrees
    RotatePreview(f32),
    /// Switch between horizontal and vertical snapping
    ToggleSnapMode,
}

/// Maps raw input events to [`BuildCommand`]s.
///
/// Key chords go through [`KeyToggle`]s so a held key fires once per
/// press. Scroll and mouse-down events are discrete already.
#[derive(Debug, Clone)]
pub struct CommandDecoder {
    place: KeyToggle,
    elevate_up: KeyToggle,
    elevate_down: KeyToggle,
    rotate_left: KeyToggle,
    rotate_right: KeyToggle,
    toggle_snap: KeyToggle,
    rotate_step: f32,
}

impl Default for CommandDecoder {
    fn default() -> Self {
        Self::new(90.0)
    }
}

impl CommandDecoder {
    /// Decoder with the default bindings; rotate commands turn by
    /// `rotate_step` degrees.
    pub fn new(rotate_step: f32) -> Self {
        let ctrl = ModifierState::ctrl();
        Self {
            place: KeyToggle::new(KeyCode::Space, ModifierState::new()),
            elevate_up: KeyToggle::new(KeyCode::ArrowUp, ctrl),
            elevate_down: KeyToggle::new(KeyCode::ArrowDown, ctrl),
            rotate_left: KeyToggle::new(KeyCode::ArrowLeft, ctrl),
            rotate_right: KeyToggle::new(KeyCode::ArrowRight, ctrl),
            toggle_snap: KeyToggle::new(KeyCode::AltLeft, ctrl),
            rotate_step,
        }
    }

    /// Feed one event; returns the command it completes, if any.
    pub fn decode(&mut self, event: &InputEvent) -> Option<BuildCommand> {
        match event {
            InputEvent::Key(key) => {
                if self.place.update_and_check(key) {
                    Some(BuildCommand::Place)
                } else if self.elevate_up.update_and_check(key) {
                    Some(BuildCommand::ElevateUp)
                } else if self.elevate_down.update_and_check(key) {
                    Some(BuildCommand::ElevateDown)
                } else if self.rotate_left.update_and_check(key) {
                    Some(BuildCommand::RotatePreview(-self.rotate_step))
                } else if self.rotate_right.update_and_check(key) {
                    Some(BuildCommand::RotatePreview(self.rotate_step))
                } else if self.toggle_snap.update_and_check(key) {
                    Some(BuildCommand::ToggleSnapMode)
                } else {
                    None
                }
            }
            InputEvent::Scroll { delta, modifiers } => {
                let amount = delta.dominant();
                (modifiers.shift && amount != 0.0).then_some(BuildCommand::Rescale(amount))
            }
            InputEvent::MouseDown {
                button: MouseButton::Middle,
                modifiers,
            } if modifiers.ctrl || modifiers.shift => Some(BuildCommand::ResetScale),
            _ => None,
        }
    }

    /// Decode a frame's worth of events in order.
    pub fn decode_all<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) -> Vec<BuildCommand> {
        events.into_iter().filter_map(|e| self.decode(e)).collect()
    }

    /// Drop all latched key state, e.g. after focus loss.
    pub fn reset(&mut self) {
        for toggle in [
            &mut self.place,
            &mut self.elevate_up,
            &mut self.elevate_down,
            &mut self.rotate_left,
            &mut self.rotate_right,
            &mut self.toggle_snap,
        ] {
            toggle.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyEvent, ScrollDelta};

    fn key_down(key: KeyCode, modifiers: ModifierState) -> InputEvent {
        InputEvent::Key(KeyEvent::down(key, modifiers))
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::up(key, ModifierState::new()))
    }

    #[test]
    fn test_space_places_once_per_press() {
        let mut decoder = CommandDecoder::default();
        let events = [
            key_down(KeyCode::Space, ModifierState::new()),
            key_down(KeyCode::Space, ModifierState::new()),
            key_down(KeyCode::Space, ModifierState::new()),
            key_up(KeyCode::Space),
            key_down(KeyCode::Space, ModifierState::new()),
        ];
        assert_eq!(decoder.decode_all(&events), vec![BuildCommand::Place, BuildCommand::Place]);
    }

    #[test]
    fn test_ctrl_chords() {
        let mut decoder = CommandDecoder::default();
        let ctrl = ModifierState::ctrl();
        let events = [
            key_down(KeyCode::ArrowUp, ctrl),
            key_down(KeyCode::ArrowDown, ctrl),
            key_down(KeyCode::ArrowLeft, ctrl),
            key_down(KeyCode::ArrowRight, ctrl),
            key_down(KeyCode::AltLeft, ctrl),
        ];
        assert_eq!(
            decoder.decode_all(&events),
            vec![
                BuildCommand::ElevateUp,
                BuildCommand::ElevateDown,
                BuildCommand::RotatePreview(-90.0),
                BuildCommand::RotatePreview(90.0),
                BuildCommand::ToggleSnapMode,
            ]
        );
    }

    #[test]
    fn test_arrow_without_ctrl_does_nothing() {
        let mut decoder = CommandDecoder::default();
        assert_eq!(decoder.decode(&key_down(KeyCode::ArrowUp, ModifierState::new())), None);
    }

    #[test]
    fn test_shift_scroll_rescales() {
        let mut decoder = CommandDecoder::default();
        let scroll = InputEvent::Scroll {
            delta: ScrollDelta::new(0.0, -1.0),
            modifiers: ModifierState::shift(),
        };
        assert_eq!(decoder.decode(&scroll), Some(BuildCommand::Rescale(-1.0)));

        let plain = InputEvent::Scroll {
            delta: ScrollDelta::new(0.0, -1.0),
            modifiers: ModifierState::new(),
        };
        assert_eq!(decoder.decode(&plain), None);
    }

    #[test]
    fn test_middle_click_resets_scale() {
        let mut decoder = CommandDecoder::default();
        let click = InputEvent::MouseDown {
            button: MouseButton::Middle,
            modifiers: ModifierState::ctrl(),
        };
        assert_eq!(decoder.decode(&click), Some(BuildCommand::ResetScale));

        let bare = InputEvent::MouseDown {
            button: MouseButton::Middle,
            modifiers: ModifierState::new(),
        };
        assert_eq!(decoder.decode(&bare), None);
    }

    #[test]
    fn test_reset_unlatches_held_keys() {
        let mut decoder = CommandDecoder::default();
        let space = key_down(KeyCode::Space, ModifierState::new());
        assert_eq!(decoder.decode(&space), Some(BuildCommand::Place));
        assert_eq!(decoder.decode(&space), None);
        decoder.reset();
        assert_eq!(decoder.decode(&space), Some(BuildCommand::Place));
    }
}
