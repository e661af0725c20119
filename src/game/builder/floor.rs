//! Floor / Level State
//!
//! The elevation of the plane the pointer ray is projected onto, the
//! vertical snap toggle, and the debounce that keeps floor changes from
//! repeating while a key is held or the camera refocuses.

use std::time::Duration;

/// Current floor elevation and snap mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorState {
    elevation: i32,
    step: i32,
    vertical_snap: bool,
}

impl FloorState {
    /// Ground floor, horizontal snapping. `step` is clamped to at least 1.
    pub fn new(step: i32) -> Self {
        Self {
            elevation: 0,
            step: step.max(1),
            vertical_snap: false,
        }
    }

    pub fn elevation(&self) -> i32 {
        self.elevation
    }

    /// Zero-based floor number.
    pub fn floor_index(&self) -> i32 {
        self.elevation / self.step
    }

    /// Height of the pointer projection plane.
    pub fn plane_height(&self) -> f32 {
        self.elevation as f32
    }

    pub fn raise(&mut self) -> i32 {
        self.elevation += self.step;
        self.elevation
    }

    /// Step down one floor, never below the ground.
    pub fn lower(&mut self) -> i32 {
        self.elevation = if self.elevation >= self.step {
            self.elevation - self.step
        } else {
            0
        };
        self.elevation
    }

    pub fn vertical_snap(&self) -> bool {
        self.vertical_snap
    }

    /// Flip between horizontal and vertical snapping; returns the new mode.
    pub fn toggle_snap_mode(&mut self) -> bool {
        self.vertical_snap = !self.vertical_snap;
        self.vertical_snap
    }

    /// Back to the ground floor, horizontal snapping.
    pub fn reset(&mut self) {
        self.elevation = 0;
        self.vertical_snap = false;
    }
}

/// Minimum interval between two accepted commands. Times are host-supplied
/// timestamps, so the gate is deterministic under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandCooldown {
    interval: Duration,
    last: Option<Duration>,
}

impl CommandCooldown {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    /// Accept the command at `now` unless the previous accepted one is less
    /// than the interval old. Accepting restarts the interval.
    pub fn ready(&mut self, now: Duration) -> bool {
        if let Some(last) = self.last {
            if now.saturating_sub(last) < self.interval {
                return false;
            }
        }
        self.last = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_and_lower() {
        let mut floor = FloorState::new(3);
        assert_eq!(floor.raise(), 3);
        assert_eq!(floor.raise(), 6);
        assert_eq!(floor.floor_index(), 2);
        assert_eq!(floor.plane_height(), 6.0);
        assert_eq!(floor.lower(), 3);
    }

    #[test]
    fn test_lower_never_goes_below_ground() {
        let mut floor = FloorState::new(3);
        floor.raise();
        for _ in 0..10 {
            floor.lower();
        }
        assert_eq!(floor.elevation(), 0);
    }

    #[test]
    fn test_toggle_snap_mode() {
        let mut floor = FloorState::new(3);
        assert!(floor.toggle_snap_mode());
        assert!(floor.vertical_snap());
        assert!(!floor.toggle_snap_mode());
    }

    #[test]
    fn test_cooldown() {
        let mut gate = CommandCooldown::new(Duration::from_millis(200));
        assert!(gate.ready(Duration::from_millis(1000)));
        assert!(!gate.ready(Duration::from_millis(1100)));
        assert!(gate.ready(Duration::from_millis(1200)));
        assert!(!gate.ready(Duration::from_millis(1399)));

        gate.reset();
        assert!(gate.ready(Duration::from_millis(1399)));
    }

    #[test]
    fn test_cooldown_tolerates_clock_going_backwards() {
        let mut gate = CommandCooldown::new(Duration::from_millis(200));
        assert!(gate.ready(Duration::from_millis(500)));
        assert!(!gate.ready(Duration::from_millis(100)));
    }
}
