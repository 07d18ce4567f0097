use crate::{config::GrabConfig, snapshot::HandSnapshot};

/// Debounce for clone-and-grab.
///
/// Closes as soon as a clone is grabbed and stays closed until the trigger and grip have both been
/// let go, so that holding the trigger down doesn't stamp out a clone every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloneGate {
    allowed: bool,
}

impl Default for CloneGate {
    fn default() -> Self {
        Self { allowed: true }
    }
}

impl CloneGate {
    /// May the next grab of a cloneable entity stamp out a clone?
    pub fn is_open(&self) -> bool {
        self.allowed
    }

    /// Call after a clone has been grabbed
    pub fn close(&mut self) {
        self.allowed = false;
    }

    /// Reopen the gate if both inputs on this hand are released. Returns whether the gate is open.
    pub fn update(&mut self, hand: &HandSnapshot, config: &GrabConfig) -> bool {
        if hand.is_released(config) {
            self.allowed = true;
        }
        self.allowed
    }
}
