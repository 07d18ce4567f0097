use anyhow::anyhow;
use hecs::{Entity, World};
use log::{debug, trace};

use crate::{
    components::{
        BoundingBox, CloneOrigin, Cloneable, EntityCall, Grabbable, Info, Lifetime, Parent,
        Script, Transform,
    },
    contexts::{AvatarContext, GrabContext, HapticContext, HighlightContext, MessageContext},
    snapshot::EntityProperties,
    InteractionError, InteractionResult,
};

/// Everything a controller module is allowed to touch: the world of entities, the local avatar
/// and the contexts wrapping the outside world.
///
/// The dispatcher hands a `&mut Scene` to each module in turn, so there is never more than one
/// module mutating it at a time.
pub struct Scene {
    /// World
    pub world: World,
    /// The local user's avatar
    pub avatar_context: AvatarContext,
    /// Grab constraints
    pub grab_context: GrabContext,
    /// Haptics context
    pub haptic_context: HapticContext,
    /// Highlight context
    pub highlight_context: HighlightContext,
    /// Outbound messages
    pub message_context: MessageContext,
}

impl Scene {
    /// Create an empty scene for this avatar
    pub fn new(avatar_context: AvatarContext) -> Self {
        Self {
            world: World::new(),
            avatar_context,
            grab_context: Default::default(),
            haptic_context: Default::default(),
            highlight_context: Default::default(),
            message_context: Default::default(),
        }
    }

    /// Fetch an entity's current properties straight from the world. `None` if the entity has
    /// been deleted.
    pub fn entity_properties(&self, entity: Entity) -> Option<EntityProperties> {
        EntityProperties::query(&self.world, entity)
    }

    /// Deliver a lifecycle call to the entity's [`Script`]. Entities without one ignore it.
    pub fn call_entity_method(&mut self, entity: Entity, call: EntityCall) {
        match self.world.get::<&mut Script>(entity) {
            Ok(mut script) => script.deliver(call),
            Err(_) => trace!("{entity:?} has no script, dropping {call:?}"),
        }
    }

    /// Spawn a copy of a cloneable entity at the same pose. The copy can be grabbed, but not
    /// cloned again.
    pub fn clone_entity(&mut self, source: Entity) -> InteractionResult<Entity> {
        let cloneable = match self.world.get::<&Cloneable>(source) {
            Ok(cloneable) => *cloneable,
            Err(hecs::ComponentError::NoSuchEntity) => {
                return Err(InteractionError::UnknownEntity(source))
            }
            Err(hecs::ComponentError::MissingComponent(_)) => {
                return Err(InteractionError::NotCloneable(source))
            }
        };

        if cloneable.limit > 0 {
            let existing = self
                .world
                .query::<&CloneOrigin>()
                .iter()
                .filter(|(_, origin)| origin.0 == source)
                .count();
            if existing >= cloneable.limit as usize {
                return Err(InteractionError::CloneLimitReached {
                    entity: source,
                    limit: cloneable.limit,
                });
            }
        }

        let clone = self.spawn_clone(source)?;
        if cloneable.lifetime > 0.0 {
            self.world
                .insert_one(clone, Lifetime(cloneable.lifetime))
                .map_err(|e| anyhow!("Unable to set lifetime on clone: {e}"))?;
        }

        debug!("Cloned {source:?} into {clone:?}");
        Ok(clone)
    }

    fn spawn_clone(&mut self, source: Entity) -> anyhow::Result<Entity> {
        let transform = *self.world.get::<&Transform>(source)?;
        let bounding_box = self
            .world
            .get::<&BoundingBox>(source)
            .map(|b| *b)
            .unwrap_or_default();
        let grabbable = self
            .world
            .get::<&Grabbable>(source)
            .map(|g| *g)
            .unwrap_or_default();
        let info = self
            .world
            .get::<&Info>(source)
            .map(|i| Info::new(format!("{}-clone", i.name), i.kind))
            .unwrap_or_default();
        let has_script = self.world.get::<&Script>(source).is_ok();

        let clone = self.world.spawn((
            info,
            transform,
            bounding_box,
            Grabbable {
                grabbable: true,
                ..grabbable
            },
            CloneOrigin(source),
        ));

        if has_script {
            self.world.insert_one(clone, Script::default())?;
        }

        // Clones belong to the same compound object as their source, if there is one.
        let parent = self.world.get::<&Parent>(source).map(|p| *p).ok();
        if let Some(parent) = parent {
            self.world.insert_one(clone, parent)?;
        }

        Ok(clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Handedness;
    use glam::Vec3;

    fn stamp(scene: &mut Scene, limit: u32, lifetime: f32) -> Entity {
        scene.world.spawn((
            Info::new("Stamp", Default::default()),
            Transform::from_translation(Vec3::new(0., 1., -0.5)),
            BoundingBox::default(),
            Grabbable::default(),
            Cloneable { limit, lifetime },
            Script::default(),
        ))
    }

    #[test]
    fn test_clone_entity() {
        let mut scene = Scene::new(AvatarContext::new("avatar"));
        let source = stamp(&mut scene, 0, 0.0);

        let clone = scene.clone_entity(source).unwrap();
        let properties = scene.entity_properties(clone).unwrap();
        assert_eq!(properties.position, Vec3::new(0., 1., -0.5));
        assert!(properties.is_grabbable());
        assert!(!properties.is_cloneable());
        assert_eq!(properties.clone_origin, Some(source));
        assert_eq!(scene.world.get::<&Info>(clone).unwrap().name, "Stamp-clone");
        assert!(scene.world.get::<&Script>(clone).is_ok());
        assert!(scene.world.get::<&Lifetime>(clone).is_err());
    }

    #[test]
    fn test_clone_limit_and_lifetime() {
        let mut scene = Scene::new(AvatarContext::new("avatar"));
        let source = stamp(&mut scene, 1, 5.0);

        let clone = scene.clone_entity(source).unwrap();
        assert_eq!(*scene.world.get::<&Lifetime>(clone).unwrap(), Lifetime(5.0));
        assert!(matches!(
            scene.clone_entity(source),
            Err(InteractionError::CloneLimitReached { limit: 1, .. })
        ));

        // Once the clone is gone, there's room for another.
        scene.world.despawn(clone).unwrap();
        assert!(scene.clone_entity(source).is_ok());
    }

    #[test]
    fn test_clone_failures() {
        let mut scene = Scene::new(AvatarContext::new("avatar"));
        let plain = scene.world.spawn((Transform::default(), Grabbable::default()));
        assert!(matches!(
            scene.clone_entity(plain),
            Err(InteractionError::NotCloneable(_))
        ));

        scene.world.despawn(plain).unwrap();
        assert!(matches!(
            scene.clone_entity(plain),
            Err(InteractionError::UnknownEntity(_))
        ));
    }

    #[test]
    fn test_call_entity_method() {
        let mut scene = Scene::new(AvatarContext::new("avatar"));
        let scripted = stamp(&mut scene, 0, 0.0);
        let unscripted = scene.world.spawn((Transform::default(),));
        let call = EntityCall::StartNearGrab {
            side: Handedness::Right,
            avatar_session_id: "avatar".into(),
        };

        scene.call_entity_method(scripted, call.clone());
        scene.call_entity_method(unscripted, call.clone());

        assert_eq!(scene.world.get::<&Script>(scripted).unwrap().calls(), &[call]);
    }
}
