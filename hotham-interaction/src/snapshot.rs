use std::collections::HashMap;

use glam::{Affine3A, Quat, Vec3};
use hecs::{Entity, World};
use itertools::Itertools;

use crate::{
    components::{
        BoundingBox, CloneOrigin, Cloneable, EntityKind, Grabbable, Handedness, Info, Locked,
        Parent, Transform,
    },
    config::GrabConfig,
    contexts::InputContext,
    Scene,
};

/// Everything a controller module needs to know about an entity, copied out of the world.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityProperties {
    /// The entity these properties were copied from
    pub entity: Entity,
    /// What sort of entity this is
    pub kind: EntityKind,
    /// World space position
    pub position: Vec3,
    /// World space rotation
    pub rotation: Quat,
    /// Extent of the entity around its position
    pub bounding_box: BoundingBox,
    /// `None` if the entity has no [`Grabbable`] component
    pub grab: Option<Grabbable>,
    /// `None` if the entity can't be cloned
    pub clone_settings: Option<Cloneable>,
    /// Locked entities can't be grabbed
    pub locked: bool,
    /// Root of the compound object this entity belongs to, if any
    pub parent: Option<Entity>,
    /// The entity this one was cloned from, if any
    pub clone_origin: Option<Entity>,
}

impl EntityProperties {
    /// Copy an entity's properties out of the world. Entities without a [`Transform`] have no
    /// presence in the world, so they return `None` just like deleted entities.
    pub fn query(world: &World, entity: Entity) -> Option<Self> {
        let transform = *world.get::<&Transform>(entity).ok()?;
        Some(Self {
            entity,
            kind: world
                .get::<&Info>(entity)
                .map(|i| i.kind)
                .unwrap_or_default(),
            position: transform.translation,
            rotation: transform.rotation,
            bounding_box: world
                .get::<&BoundingBox>(entity)
                .map(|b| *b)
                .unwrap_or_default(),
            grab: world.get::<&Grabbable>(entity).map(|g| *g).ok(),
            clone_settings: world.get::<&Cloneable>(entity).map(|c| *c).ok(),
            locked: world.get::<&Locked>(entity).is_ok(),
            parent: world.get::<&Parent>(entity).map(|p| p.0).ok(),
            clone_origin: world.get::<&CloneOrigin>(entity).map(|o| o.0).ok(),
        })
    }

    /// The entity's pose as a [`Transform`]
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: self.rotation,
        }
    }

    /// Can a hand take hold of this entity?
    pub fn is_grabbable(&self) -> bool {
        self.grab.map_or(false, |g| g.grabbable) && !self.locked && self.kind.can_be_grabbed()
    }

    /// Does grabbing this entity grab a clone instead?
    pub fn is_cloneable(&self) -> bool {
        self.clone_settings.is_some()
    }

    /// Should the grab bind to the controller joint when one is available?
    pub fn grab_follows_controller(&self) -> bool {
        self.grab.map_or(false, |g| g.grab_follows_controller)
    }

    /// Should grabbing this entity grab its parent instead?
    pub fn grab_delegate_to_parent(&self) -> bool {
        self.grab.map_or(false, |g| g.grab_delegate_to_parent)
    }

    /// Distance from `point` to this entity's bounding box
    pub fn distance_to_bounding_box(&self, point: Vec3) -> f32 {
        self.bounding_box.distance_to_point(&self.transform(), point)
    }
}

/// One hand's input and surroundings for this tick.
#[derive(Debug, Clone, Default)]
pub struct HandSnapshot {
    /// Trigger value, `[0, 1]`
    pub trigger_value: f32,
    /// Grip value, `[0, 1]`
    pub secondary_value: f32,
    /// Is the trigger clicked?
    pub trigger_click: bool,
    /// World pose of the controller, `None` if it isn't being tracked
    pub controller_pose: Option<Affine3A>,
    /// Entities near the hand, closest first
    pub nearby_entities: Vec<Entity>,
}

impl HandSnapshot {
    /// World space position of the controller
    pub fn position(&self) -> Option<Vec3> {
        self.controller_pose.map(|p| p.translation.into())
    }

    /// Are both the trigger and the grip released?
    pub fn is_released(&self, config: &GrabConfig) -> bool {
        self.trigger_value < config.trigger_off && self.secondary_value < config.trigger_off
    }
}

/// The frozen view of both controllers and everything around them, built once per tick and shared
/// by every controller module.
#[derive(Debug, Clone)]
pub struct ControllerFrameSnapshot {
    /// The left hand
    pub left: HandSnapshot,
    /// The right hand
    pub right: HandSnapshot,
    /// Properties of every nearby entity, and any parents that were looked up along the way
    pub properties: HashMap<Entity, EntityProperties>,
    /// The avatar's sensor scale factor when the snapshot was taken
    pub sensor_scale_factor: f32,
    /// Was the headset being worn when the snapshot was taken?
    pub hmd_active: bool,
}

impl ControllerFrameSnapshot {
    /// Capture the current state of the controllers and the entities within near grab range of
    /// each of them.
    pub fn capture(scene: &Scene, input_context: &InputContext, config: &GrabConfig) -> Self {
        let sensor_scale_factor = scene.avatar_context.sensor_scale_factor;
        let search_radius = config.near_grab_radius * sensor_scale_factor;
        let mut properties = HashMap::new();

        let mut capture_hand = |handedness: Handedness| {
            let input = input_context.hand(handedness);
            let controller_pose = input.stage_from_grip();
            let nearby_entities = match controller_pose {
                Some(pose) => {
                    let nearby =
                        find_nearby_entities(&scene.world, pose.translation.into(), search_radius);
                    for entity in &nearby {
                        if let Some(props) = scene.entity_properties(*entity) {
                            properties.insert(*entity, props);
                        }
                    }
                    nearby
                }
                None => Vec::new(),
            };

            HandSnapshot {
                trigger_value: input.trigger_analog(),
                secondary_value: input.grip_analog(),
                trigger_click: input.trigger_click()
                    || input.trigger_analog() >= config.trigger_on,
                controller_pose,
                nearby_entities,
            }
        };

        let left = capture_hand(Handedness::Left);
        let right = capture_hand(Handedness::Right);

        Self {
            left,
            right,
            properties,
            sensor_scale_factor,
            hmd_active: scene.avatar_context.hmd_active,
        }
    }

    /// Get one hand's snapshot
    pub fn hand(&self, handedness: Handedness) -> &HandSnapshot {
        match handedness {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }

    /// Look an entity up in this snapshot, falling back to fetching it from the scene.
    pub fn resolve(&self, entity: Entity, scene: &Scene) -> Option<EntityProperties> {
        self.properties
            .get(&entity)
            .cloned()
            .or_else(|| scene.entity_properties(entity))
    }

    /// Are both grips squeezed? That's the cue for two handed behaviours to take over.
    pub fn both_hands_squeezed(&self, config: &GrabConfig) -> bool {
        self.left.secondary_value >= config.secondary_on
            && self.right.secondary_value >= config.secondary_on
    }
}

fn find_nearby_entities(world: &World, position: Vec3, radius: f32) -> Vec<Entity> {
    world
        .query::<&Transform>()
        .iter()
        .map(|(entity, transform)| (entity, transform.translation.distance(position)))
        .filter(|(_, distance)| *distance <= radius)
        .sorted_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(entity, _)| entity)
        .collect()
}
