use hecs::World;
use log::trace;

use crate::{
    components::Transform,
    contexts::{AvatarContext, GrabContext},
};

/// Move every grabbed entity along with the joint it's bound to, keeping the offset it had when
/// it was picked up.
pub fn grab_follow_system(
    world: &mut World,
    grab_context: &GrabContext,
    avatar_context: &AvatarContext,
) {
    for (_, grab) in grab_context.iter() {
        let Some(world_from_joint) = avatar_context.joint_pose(grab.joint) else {
            continue;
        };
        let Ok(mut transform) = world.get::<&mut Transform>(grab.entity) else {
            trace!("{:?} has gone away, not moving it", grab.entity);
            continue;
        };
        transform.update_from_affine(&(world_from_joint * grab.joint_from_entity));
    }
}
