//! Ghost Preview
//!
//! The translucent preview instance that follows the pointer, and the tint
//! material that shows whether it can be placed.

use crate::world::NodeId;

pub const GHOST_ALPHA: f32 = 0.4;

/// Tint applied to the ghost. Owned by the session and pushed into the
/// scene through [`crate::world::SceneGraph::set_tint`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostMaterial {
    alpha: f32,
    valid: bool,
}

impl Default for GhostMaterial {
    fn default() -> Self {
        Self::new(GHOST_ALPHA)
    }
}

impl GhostMaterial {
    /// Starts out red until the first validation.
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            valid: false,
        }
    }

    /// Switch between green (valid) and red (invalid); returns the new color.
    pub fn set_feedback(&mut self, valid: bool) -> [f32; 4] {
        self.valid = valid;
        self.color()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn color(&self) -> [f32; 4] {
        if self.valid {
            [0.0, 1.0, 0.0, self.alpha]
        } else {
            [1.0, 0.0, 0.0, self.alpha]
        }
    }
}

/// The live preview instance and the prototype it was stamped from.
#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    pub node: NodeId,
    pub prototype: String,
}

impl Ghost {
    /// A ghost is stale once the selection moved to another prototype.
    pub fn matches(&self, prototype: &str) -> bool {
        self.prototype == prototype
    }
}
