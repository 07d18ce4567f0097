use glam::Affine3A;
use serde::{Deserialize, Serialize};

use crate::{components::Handedness, contexts::InputContext};

/// Index of a joint in the avatar's skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointIndex(pub usize);

#[derive(Debug, Clone)]
struct Joint {
    name: String,
    world_from_joint: Affine3A,
}

/// The local user's avatar: who they are, how big they are and where their joints are.
#[derive(Debug, Clone)]
pub struct AvatarContext {
    /// Session id delivered to grabbed entities so they know who is holding them
    pub session_id: String,
    /// Multiplier applied to near grab distances when the avatar is scaled up or down
    pub sensor_scale_factor: f32,
    /// Is the user wearing the headset?
    pub hmd_active: bool,
    joints: Vec<Joint>,
}

impl AvatarContext {
    /// Create an avatar with both anatomical hand joints and both controller joints
    pub fn new(session_id: impl Into<String>) -> Self {
        let mut avatar = Self {
            session_id: session_id.into(),
            sensor_scale_factor: 1.0,
            hmd_active: true,
            joints: Vec::new(),
        };
        for handedness in Handedness::BOTH {
            avatar.add_joint(handedness.hand_joint_name(), Affine3A::IDENTITY);
            avatar.add_joint(handedness.controller_joint_name(), Affine3A::IDENTITY);
        }
        avatar
    }

    /// Create an avatar with no skeleton at all
    pub fn without_joints(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            sensor_scale_factor: 1.0,
            hmd_active: true,
            joints: Vec::new(),
        }
    }

    /// Add a joint, or move it if it already exists
    pub fn add_joint(&mut self, name: &str, world_from_joint: Affine3A) -> JointIndex {
        if let Some(index) = self.joint_index(name) {
            self.joints[index.0].world_from_joint = world_from_joint;
            return index;
        }
        self.joints.push(Joint {
            name: name.to_string(),
            world_from_joint,
        });
        JointIndex(self.joints.len() - 1)
    }

    pub fn joint_index(&self, name: &str) -> Option<JointIndex> {
        self.joints
            .iter()
            .position(|j| j.name == name)
            .map(JointIndex)
    }

    pub fn joint_name(&self, index: JointIndex) -> Option<&str> {
        self.joints.get(index.0).map(|j| j.name.as_str())
    }

    pub fn joint_pose(&self, index: JointIndex) -> Option<Affine3A> {
        self.joints.get(index.0).map(|j| j.world_from_joint)
    }

    pub fn set_joint_pose(&mut self, index: JointIndex, world_from_joint: Affine3A) {
        if let Some(joint) = self.joints.get_mut(index.0) {
            joint.world_from_joint = world_from_joint;
        }
    }

    /// Move the hand and controller joints to wherever the controllers are being tracked.
    /// Untracked controllers leave their joints where they were.
    pub fn sync_with_input(&mut self, input_context: &InputContext) {
        for handedness in Handedness::BOTH {
            let Some(pose) = input_context.hand(handedness).stage_from_grip() else {
                continue;
            };
            for name in [
                handedness.hand_joint_name(),
                handedness.controller_joint_name(),
            ] {
                if let Some(index) = self.joint_index(name) {
                    self.set_joint_pose(index, pose);
                }
            }
        }
    }
}
