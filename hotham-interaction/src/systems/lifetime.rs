use hecs::World;
use log::debug;

use crate::components::Lifetime;

/// Count down every [`Lifetime`] and despawn the entities whose time is up. Anything still
/// holding an expired entity finds out the next time it resolves it.
pub fn lifetime_system(world: &mut World, delta_seconds: f32) {
    let mut expired = Vec::new();
    for (entity, lifetime) in world.query_mut::<&mut Lifetime>() {
        lifetime.0 -= delta_seconds;
        if lifetime.0 <= 0.0 {
            expired.push(entity);
        }
    }

    for entity in expired {
        debug!("{entity:?} has expired, despawning");
        let _ = world.despawn(entity);
    }
}
