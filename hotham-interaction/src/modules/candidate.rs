use hecs::Entity;

use crate::{
    components::Handedness,
    config::GrabConfig,
    snapshot::{ControllerFrameSnapshot, EntityProperties},
    Scene,
};

/// Compound objects deeper than this are treated as rooted at the last parent reached.
const MAX_GROUP_DEPTH: usize = 32;

/// The result of [`select_candidate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The nearest qualifying entity, ie. the thing the hand is actually touching
    pub touched: Entity,
    /// What a grab would act on: either `touched`, or the root of the compound object it belongs to
    pub target: EntityProperties,
}

/// Choose what `handedness` would grab right now.
///
/// Nearby entities are considered strictly nearest first, and the first one that is within reach
/// of both its bounding box and its position, and that can be grabbed or cloned, wins. There is
/// no secondary ranking.
pub fn select_candidate(
    handedness: Handedness,
    snapshot: &ControllerFrameSnapshot,
    scene: &Scene,
    config: &GrabConfig,
) -> Option<Candidate> {
    let hand = snapshot.hand(handedness);
    let hand_position = hand.position()?;
    let near_grab_radius = config.near_grab_radius * snapshot.sensor_scale_factor;

    for entity in &hand.nearby_entities {
        let Some(props) = snapshot.properties.get(entity) else {
            continue;
        };

        if props.distance_to_bounding_box(hand_position) > config.tear_away_distance
            || props.position.distance(hand_position) > near_grab_radius
        {
            continue;
        }

        if !props.is_grabbable() && !props.is_cloneable() {
            continue;
        }

        let target = if props.is_cloneable() {
            props.clone()
        } else {
            let root = find_group_root(props, snapshot, scene);
            if root.is_grabbable() {
                root
            } else {
                props.clone()
            }
        };

        return Some(Candidate {
            touched: *entity,
            target,
        });
    }

    None
}

/// Walk up the parent chain for as long as each entity delegates its grabs to its parent.
fn find_group_root(
    props: &EntityProperties,
    snapshot: &ControllerFrameSnapshot,
    scene: &Scene,
) -> EntityProperties {
    let mut current = props.clone();
    for _ in 0..MAX_GROUP_DEPTH {
        if !current.grab_delegate_to_parent() {
            break;
        }
        let Some(parent) = current.parent else {
            break;
        };
        let Some(parent_props) = snapshot.resolve(parent, scene) else {
            break;
        };
        current = parent_props;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        components::{BoundingBox, Cloneable, Grabbable, Parent, Transform},
        contexts::{AvatarContext, InputContext},
    };
    use glam::{Affine3A, Vec3};

    struct Fixture {
        scene: Scene,
        input_context: InputContext,
        config: GrabConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let mut input_context = InputContext::default();
            input_context
                .right
                .update(0.5, 0.0, false, Some(Affine3A::IDENTITY));
            Self {
                scene: Scene::new(AvatarContext::new("avatar")),
                input_context,
                config: GrabConfig::default(),
            }
        }

        fn spawn(&mut self, z: f32, grab: Option<Grabbable>) -> Entity {
            let entity = self.scene.world.spawn((
                Transform::from_translation(Vec3::new(0., 0., z)),
                BoundingBox::from_dimensions(Vec3::splat(0.1)),
            ));
            if let Some(grab) = grab {
                self.scene.world.insert_one(entity, grab).unwrap();
            }
            entity
        }

        fn select(&self) -> Option<Candidate> {
            let snapshot =
                ControllerFrameSnapshot::capture(&self.scene, &self.input_context, &self.config);
            select_candidate(Handedness::Right, &snapshot, &self.scene, &self.config)
        }
    }

    #[test]
    fn test_nearest_eligible_entity_wins() {
        let mut fixture = Fixture::new();
        let _not_grabbable = fixture.spawn(-0.05, None);
        let near = fixture.spawn(-0.1, Some(Grabbable::default()));
        let _far = fixture.spawn(-0.15, Some(Grabbable::default()));

        let candidate = fixture.select().unwrap();
        assert_eq!(candidate.touched, near);
        assert_eq!(candidate.target.entity, near);

        // Same inputs, same answer.
        assert_eq!(fixture.select().unwrap(), candidate);
    }

    #[test]
    fn test_tear_away_distance() {
        let mut fixture = Fixture::new();

        // Centre is 0.3m away, so the box is 0.25m away: too far.
        fixture.spawn(-0.3, Some(Grabbable::default()));
        assert!(fixture.select().is_none());

        // A big box reaches back to the hand, even though its centre is further away.
        let big = fixture.scene.world.spawn((
            Transform::from_translation(Vec3::new(0., 0., -0.5)),
            BoundingBox::from_dimensions(Vec3::splat(1.0)),
            Grabbable::default(),
        ));
        assert_eq!(fixture.select().unwrap().touched, big);
    }

    #[test]
    fn test_near_grab_radius_scales_with_avatar() {
        let mut fixture = Fixture::new();
        fixture.config.near_grab_radius = 0.05;
        let entity = fixture.spawn(-0.1, Some(Grabbable::default()));
        assert!(fixture.select().is_none());

        fixture.scene.avatar_context.sensor_scale_factor = 4.0;
        assert_eq!(fixture.select().unwrap().touched, entity);
    }

    #[test]
    fn test_untracked_hand_selects_nothing() {
        let mut fixture = Fixture::new();
        fixture.spawn(-0.1, Some(Grabbable::default()));
        fixture.input_context.right.update(1.0, 0.0, true, None);
        assert!(fixture.select().is_none());
    }

    #[test]
    fn test_compound_objects_grab_their_root() {
        let mut fixture = Fixture::new();
        let root = fixture.spawn(-2.0, Some(Grabbable::default()));
        let middle = fixture.spawn(-1.0, Some(Grabbable::default()));
        let leaf = fixture.spawn(-0.1, Some(Grabbable::default()));
        fixture.scene.world.insert_one(middle, Parent(root)).unwrap();
        fixture.scene.world.insert_one(leaf, Parent(middle)).unwrap();

        let candidate = fixture.select().unwrap();
        assert_eq!(candidate.touched, leaf);
        assert_eq!(candidate.target.entity, root);
    }

    #[test]
    fn test_compound_objects_respect_delegation_and_eligibility() {
        let mut fixture = Fixture::new();
        let root = fixture.spawn(-2.0, None);
        let leaf = fixture.spawn(-0.1, Some(Grabbable::default()));
        fixture.scene.world.insert_one(leaf, Parent(root)).unwrap();

        // The root can't be grabbed, so the leaf is grabbed on its own.
        assert_eq!(fixture.select().unwrap().target.entity, leaf);

        // The root can be grabbed, but the leaf doesn't delegate to it.
        fixture
            .scene
            .world
            .insert_one(root, Grabbable::default())
            .unwrap();
        fixture
            .scene
            .world
            .insert_one(
                leaf,
                Grabbable {
                    grab_delegate_to_parent: false,
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(fixture.select().unwrap().target.entity, leaf);
    }

    #[test]
    fn test_cloneables_are_never_redirected_to_their_root() {
        let mut fixture = Fixture::new();
        let root = fixture.spawn(-2.0, Some(Grabbable::default()));
        let stamp = fixture.spawn(-0.1, None);
        fixture
            .scene
            .world
            .insert(stamp, (Parent(root), Cloneable::default()))
            .unwrap();

        let candidate = fixture.select().unwrap();
        assert_eq!(candidate.target.entity, stamp);
        assert!(candidate.target.is_cloneable());
    }

    #[test]
    fn test_parent_cycles_terminate() {
        let mut fixture = Fixture::new();
        let a = fixture.spawn(-0.1, Some(Grabbable::default()));
        let b = fixture.spawn(-3.0, Some(Grabbable::default()));
        fixture.scene.world.insert_one(a, Parent(b)).unwrap();
        fixture.scene.world.insert_one(b, Parent(a)).unwrap();

        let candidate = fixture.select().unwrap();
        assert_eq!(candidate.touched, a);
    }
}
