use std::time::Instant;

use glam::{Quat, Vec3};
use hecs::Entity;
use log::debug;

use crate::{
    components::{EntityCall, Handedness},
    config::GrabConfig,
    contexts::{
        AvatarContext, ChannelMessage, GrabHandle, JointIndex, ManipulationAction,
        ManipulationMessage,
    },
    snapshot::{ControllerFrameSnapshot, EntityProperties},
    InteractionError, InteractionResult, Scene,
};

/// A grab in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct GrabSession {
    /// The entity being held
    pub entity: Entity,
    /// The avatar joint it is bound to
    pub joint: JointIndex,
    /// Position of the entity relative to the joint when the grab started
    pub relative_position: Vec3,
    /// Rotation of the entity relative to the joint when the grab started
    pub relative_rotation: Quat,
    /// Handle to the constraint held by the [`crate::contexts::GrabContext`]
    pub handle: GrabHandle,
    /// When the grab started
    pub started_at: Instant,
}

/// Pick the joint a grab of `target` should bind to.
///
/// The tracked controller joint is used when the headset is on, the controller is being tracked
/// and the entity asks to follow the controller. Otherwise it's the avatar's hand.
pub fn choose_joint(
    handedness: Handedness,
    target: &EntityProperties,
    snapshot: &ControllerFrameSnapshot,
    avatar_context: &AvatarContext,
) -> InteractionResult<JointIndex> {
    let controller_available = snapshot.hand(handedness).controller_pose.is_some();
    let follow_controller =
        snapshot.hmd_active && controller_available && target.grab_follows_controller();
    let name = if follow_controller {
        handedness.controller_joint_name()
    } else {
        handedness.hand_joint_name()
    };

    avatar_context
        .joint_index(name)
        .ok_or_else(|| InteractionError::InvalidJoint {
            name: name.to_string(),
        })
}

/// Bind `target` to `joint`: buzz the controller, release whatever this hand held, take a new grab
/// handle, tell observers and then tell the entity itself.
pub fn start_near_grab(
    handedness: Handedness,
    target: &EntityProperties,
    joint: JointIndex,
    config: &GrabConfig,
    scene: &mut Scene,
) -> InteractionResult<GrabSession> {
    let world_from_joint = scene
        .avatar_context
        .joint_pose(joint)
        .ok_or_else(|| InteractionError::InvalidJoint {
            name: format!("{joint:?}"),
        })?;
    let joint_from_entity = world_from_joint.inverse() * target.transform().to_affine();

    scene.haptic_context.request_haptic_feedback(
        config.haptic_pulse_strength,
        config.haptic_pulse_duration_ms,
        handedness,
    );

    scene.grab_context.release_hand(handedness);
    let handle = scene
        .grab_context
        .acquire(handedness, target.entity, joint, joint_from_entity);

    scene
        .message_context
        .send(ChannelMessage::ObjectManipulation(ManipulationMessage {
            action: ManipulationAction::Grab,
            entity: target.entity,
            joint: handedness.hand_joint_name(),
        }));

    let avatar_session_id = scene.avatar_context.session_id.clone();
    scene.call_entity_method(
        target.entity,
        EntityCall::StartNearGrab {
            side: handedness,
            avatar_session_id,
        },
    );

    debug!(
        "{handedness:?} hand started grabbing {:?} with joint {joint:?}",
        target.entity
    );

    let (_, relative_rotation, relative_position) =
        joint_from_entity.to_scale_rotation_translation();
    Ok(GrabSession {
        entity: target.entity,
        joint,
        relative_position,
        relative_rotation,
        handle,
        started_at: Instant::now(),
    })
}

/// Tell a held entity it is still being held.
pub fn continue_near_grab(handedness: Handedness, session: &GrabSession, scene: &mut Scene) {
    let avatar_session_id = scene.avatar_context.session_id.clone();
    scene.call_entity_method(
        session.entity,
        EntityCall::ContinueNearGrab {
            side: handedness,
            avatar_session_id,
        },
    );
}

/// Let go: release the grab handle, tell the entity, then tell observers. Safe to call for an
/// entity that has already been deleted.
pub fn end_near_grab(handedness: Handedness, session: GrabSession, scene: &mut Scene) {
    scene.grab_context.release(session.handle);

    let avatar_session_id = scene.avatar_context.session_id.clone();
    scene.call_entity_method(
        session.entity,
        EntityCall::ReleaseGrab {
            side: handedness,
            avatar_session_id,
        },
    );

    scene
        .message_context
        .send(ChannelMessage::ObjectManipulation(ManipulationMessage {
            action: ManipulationAction::Release,
            entity: session.entity,
            joint: handedness.hand_joint_name(),
        }));

    debug!(
        "{handedness:?} hand released {:?} after {:?}",
        session.entity,
        session.started_at.elapsed()
    );
}
