use generational_arena::{Arena, Index};
use glam::Affine3A;
use hecs::Entity;
use log::{debug, trace};

use crate::{components::Handedness, contexts::JointIndex};

/// Opaque handle to a grab held by the [`GrabContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrabHandle(Index);

/// A constraint binding an entity's pose to an avatar joint.
#[derive(Debug, Clone, Copy)]
pub struct Grab {
    /// Which hand holds the grab
    pub handedness: Handedness,
    /// The grabbed entity
    pub entity: Entity,
    /// The joint the entity is bound to
    pub joint: JointIndex,
    /// The entity's pose relative to the joint, captured when the grab started
    pub joint_from_entity: Affine3A,
}

/// Owns every grab constraint. Each hand can hold at most one grab at a time.
///
/// Releasing is always safe: releasing a handle that was already released does nothing.
#[derive(Debug, Default)]
pub struct GrabContext {
    grabs: Arena<Grab>,
    by_hand: [Option<Index>; 2],
}

impl GrabContext {
    /// Bind `entity` to `joint`. Any grab this hand already holds is released first.
    pub fn acquire(
        &mut self,
        handedness: Handedness,
        entity: Entity,
        joint: JointIndex,
        joint_from_entity: Affine3A,
    ) -> GrabHandle {
        self.release_hand(handedness);
        let index = self.grabs.insert(Grab {
            handedness,
            entity,
            joint,
            joint_from_entity,
        });
        self.by_hand[handedness.index()] = Some(index);
        debug!("{handedness:?} hand grabbed {entity:?} with joint {joint:?}");
        GrabHandle(index)
    }

    /// Release a grab. Returns `false` if the handle was already released.
    pub fn release(&mut self, handle: GrabHandle) -> bool {
        let Some(grab) = self.grabs.remove(handle.0) else {
            trace!("Ignoring release of stale handle {handle:?}");
            return false;
        };
        let slot = &mut self.by_hand[grab.handedness.index()];
        if *slot == Some(handle.0) {
            *slot = None;
        }
        debug!("{:?} hand released {:?}", grab.handedness, grab.entity);
        true
    }

    /// Release whatever this hand is holding. Returns `false` if it held nothing.
    pub fn release_hand(&mut self, handedness: Handedness) -> bool {
        match self.by_hand[handedness.index()] {
            Some(index) => self.release(GrabHandle(index)),
            None => false,
        }
    }

    pub fn get(&self, handle: GrabHandle) -> Option<&Grab> {
        self.grabs.get(handle.0)
    }

    pub fn grab_for_hand(&self, handedness: Handedness) -> Option<&Grab> {
        self.by_hand[handedness.index()].and_then(|index| self.grabs.get(index))
    }

    pub fn is_held(&self, entity: Entity) -> bool {
        self.grabs.iter().any(|(_, grab)| grab.entity == entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GrabHandle, &Grab)> {
        self.grabs.iter().map(|(index, grab)| (GrabHandle(index), grab))
    }

    pub fn len(&self) -> usize {
        self.grabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grabs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    #[test]
    fn test_one_grab_per_hand() {
        let mut world = World::new();
        let a = world.spawn(());
        let b = world.spawn(());
        let mut grab_context = GrabContext::default();

        let first = grab_context.acquire(Handedness::Right, a, JointIndex(0), Affine3A::IDENTITY);
        let second = grab_context.acquire(Handedness::Right, b, JointIndex(0), Affine3A::IDENTITY);
        let left = grab_context.acquire(Handedness::Left, a, JointIndex(1), Affine3A::IDENTITY);

        assert_eq!(grab_context.len(), 2);
        assert!(grab_context.get(first).is_none());
        assert_eq!(grab_context.get(second).unwrap().entity, b);
        assert_eq!(grab_context.grab_for_hand(Handedness::Left).unwrap().entity, a);
        assert!(grab_context.is_held(a));

        assert!(grab_context.release(left));
        assert!(!grab_context.is_held(a));
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut world = World::new();
        let a = world.spawn(());
        let mut grab_context = GrabContext::default();

        let handle = grab_context.acquire(Handedness::Left, a, JointIndex(0), Affine3A::IDENTITY);
        assert!(grab_context.release(handle));
        assert!(!grab_context.release(handle));
        assert!(!grab_context.release_hand(Handedness::Left));
        assert!(grab_context.is_empty());

        // A stale handle must not release a newer grab that reused its slot.
        let newer = grab_context.acquire(Handedness::Left, a, JointIndex(0), Affine3A::IDENTITY);
        assert!(!grab_context.release(handle));
        assert!(grab_context.get(newer).is_some());
    }
}
