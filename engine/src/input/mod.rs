//! Input Module
//!
//! Provides platform-agnostic input primitives for keyboard and mouse.
//! This module is decoupled from any specific windowing system (like winit)
//! to allow for flexible integration; hosts translate their native events
//! into [`InputEvent`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use modular_builder_engine::input::{KeyCode, KeyEvent, KeyToggle, ModifierState};
//!
//! let mut place = KeyToggle::new(KeyCode::Space, ModifierState::new());
//! let event = KeyEvent::down(KeyCode::Space, ModifierState::new());
//! if place.update_and_check(&event) {
//!     // fire once, no matter how long Space is held
//! }
//! ```

pub mod keyboard;
pub mod mouse;
pub mod toggle;

// Re-export commonly used types at module level
pub use keyboard::{KeyCode, KeyEvent, ModifierState};
pub use mouse::{MouseButton, ScrollDelta};
pub use toggle::KeyToggle;

/// One raw input event, as handed over by the host each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),
    Scroll {
        delta: ScrollDelta,
        modifiers: ModifierState,
    },
    MouseDown {
        button: MouseButton,
        modifiers: ModifierState,
    },
    MouseUp {
        button: MouseButton,
        modifiers: ModifierState,
    },
}
