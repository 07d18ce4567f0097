use glam::Affine3A;

use crate::components::Handedness;

/// Input state for one controller.
#[derive(Debug, Default, Clone, Copy)]
pub struct HandInput {
    trigger_analog: f32,
    grip_analog: f32,
    trigger_click: bool,
    stage_from_grip: Option<Affine3A>,
}

impl HandInput {
    pub fn trigger_analog(&self) -> f32 {
        self.trigger_analog
    }
    pub fn grip_analog(&self) -> f32 {
        self.grip_analog
    }
    pub fn trigger_click(&self) -> bool {
        self.trigger_click
    }
    /// Pose of the controller's grip, or `None` if the controller isn't being tracked
    pub fn stage_from_grip(&self) -> Option<Affine3A> {
        self.stage_from_grip
    }

    /// Synchronise with the controller. Analog values are clamped to `[0, 1]`.
    pub fn update(
        &mut self,
        trigger_analog: f32,
        grip_analog: f32,
        trigger_click: bool,
        stage_from_grip: Option<Affine3A>,
    ) {
        self.trigger_analog = trigger_analog.clamp(0.0, 1.0);
        self.grip_analog = grip_analog.clamp(0.0, 1.0);
        self.trigger_click = trigger_click;
        self.stage_from_grip = stage_from_grip;
    }
}

/// Context that holds input state for both controllers, so modules can query it without having
/// to worry about OpenXR internals.
#[derive(Debug, Default, Clone)]
pub struct InputContext {
    pub left: HandInput,
    pub right: HandInput,
}

impl InputContext {
    pub fn hand(&self, handedness: Handedness) -> &HandInput {
        match handedness {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }

    pub fn hand_mut(&mut self, handedness: Handedness) -> &mut HandInput {
        match handedness {
            Handedness::Left => &mut self.left,
            Handedness::Right => &mut self.right,
        }
    }
}
