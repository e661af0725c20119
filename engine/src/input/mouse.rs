//! Mouse Input Module
//!
//! Mouse buttons and scroll wheel deltas, decoupled from winit.

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// Scroll wheel delta, can be line-based or pixel-based.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollDelta {
    /// Horizontal scroll (positive = right)
    pub x: f32,
    /// Vertical scroll (positive = up/forward)
    pub y: f32,
}

impl ScrollDelta {
    /// Create a new scroll delta.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create from pixel delta (common for trackpads).
    /// Normalizes by dividing by 100 to get approximate line equivalents.
    pub fn from_pixels(x: f64, y: f64) -> Self {
        Self {
            x: (x / 100.0) as f32,
            y: (y / 100.0) as f32,
        }
    }

    /// Check if there's any scroll movement.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// The axis that moved the most, keeping its sign.
    ///
    /// Holding Shift turns a vertical wheel into horizontal scroll on most
    /// platforms, so callers that want "the wheel" read this instead of `y`.
    pub fn dominant(&self) -> f32 {
        if self.x.abs() > self.y.abs() { self.x } else { self.y }
    }
}
