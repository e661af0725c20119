//! Keyboard Input Module
//!
//! Generic key codes and modifier state, decoupled from any windowing system.

/// Generic key codes, independent of windowing system.
///
/// Only the keys the building tool binds are named; everything else maps to
/// [`KeyCode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Space,
    Enter,
    Escape,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Modifier keys
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Whether this key is itself a modifier.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            KeyCode::ShiftLeft
                | KeyCode::ShiftRight
                | KeyCode::ControlLeft
                | KeyCode::ControlRight
                | KeyCode::AltLeft
                | KeyCode::AltRight
        )
    }
}

/// State of keyboard modifier keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierState {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl ModifierState {
    /// Create a new empty modifier state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }

    /// Check if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }

    /// True when every modifier set in `required` is also set here.
    pub fn contains(&self, required: &ModifierState) -> bool {
        (!required.shift || self.shift)
            && (!required.ctrl || self.ctrl)
            && (!required.alt || self.alt)
            && (!required.meta || self.meta)
    }
}

/// A single key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    /// `true` on key down (including OS auto-repeat), `false` on key up
    pub pressed: bool,
    /// Modifiers held when the event fired
    pub modifiers: ModifierState,
}

impl KeyEvent {
    pub fn down(key: KeyCode, modifiers: ModifierState) -> Self {
        Self {
            key,
            pressed: true,
            modifiers,
        }
    }

    pub fn up(key: KeyCode, modifiers: ModifierState) -> Self {
        Self {
            key,
            pressed: false,
            modifiers,
        }
    }
}
