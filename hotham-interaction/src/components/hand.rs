use serde::{Deserialize, Serialize};

/// The "side" or "handedness" of a controller, and of every per-hand module instance bound to it.
#[derive(Debug, PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    /// Left hand side
    Left,
    /// Right hand side
    Right,
}

impl Handedness {
    /// Both hands, left first
    pub const BOTH: [Handedness; 2] = [Handedness::Left, Handedness::Right];

    /// The side string delivered to entity scripts, ie. `"left"` or `"right"`
    pub fn side(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }

    /// Index into per-hand arrays
    pub(crate) fn index(&self) -> usize {
        match self {
            Handedness::Left => 0,
            Handedness::Right => 1,
        }
    }

    /// Name of the avatar's anatomical hand joint
    pub fn hand_joint_name(&self) -> &'static str {
        match self {
            Handedness::Left => "LeftHand",
            Handedness::Right => "RightHand",
        }
    }

    /// Name of the avatar joint that tracks the controller itself
    pub fn controller_joint_name(&self) -> &'static str {
        match self {
            Handedness::Left => "_CONTROLLER_LEFTHAND",
            Handedness::Right => "_CONTROLLER_RIGHTHAND",
        }
    }
}
