use std::collections::HashMap;

use hecs::Entity;
use log::trace;

use crate::components::Handedness;

/// Tracks which entities are currently outlined for the user. An entity stays outlined until
/// every hand that highlighted it has let go of it.
#[derive(Debug, Default, Clone)]
pub struct HighlightContext {
    highlighted: HashMap<Entity, [bool; 2]>,
}

impl HighlightContext {
    /// Returns `true` if the entity wasn't already highlighted by this hand
    pub fn highlight(&mut self, handedness: Handedness, entity: Entity) -> bool {
        let hands = self.highlighted.entry(entity).or_default();
        let added = !hands[handedness.index()];
        if added {
            trace!("{handedness:?} hand is highlighting {entity:?}");
        }
        hands[handedness.index()] = true;
        added
    }

    /// Returns `true` if the entity was highlighted by this hand
    pub fn unhighlight(&mut self, handedness: Handedness, entity: Entity) -> bool {
        let Some(hands) = self.highlighted.get_mut(&entity) else {
            return false;
        };
        let removed = std::mem::take(&mut hands[handedness.index()]);
        if hands.iter().all(|h| !h) {
            trace!("Unhighlighting {entity:?}");
            self.highlighted.remove(&entity);
        }
        removed
    }

    pub fn is_highlighted(&self, entity: Entity) -> bool {
        self.highlighted.contains_key(&entity)
    }

    /// Number of entities outlined
    pub fn len(&self) -> usize {
        self.highlighted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlighted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    #[test]
    fn test_highlight_is_shared_between_hands() {
        let mut world = World::new();
        let entity = world.spawn(());
        let mut highlight_context = HighlightContext::default();

        assert!(highlight_context.highlight(Handedness::Left, entity));
        assert!(!highlight_context.highlight(Handedness::Left, entity));
        assert!(highlight_context.highlight(Handedness::Right, entity));
        assert_eq!(highlight_context.len(), 1);

        assert!(highlight_context.unhighlight(Handedness::Right, entity));
        assert!(highlight_context.is_highlighted(entity));
        assert!(!highlight_context.unhighlight(Handedness::Right, entity));

        assert!(highlight_context.unhighlight(Handedness::Left, entity));
        assert!(!highlight_context.is_highlighted(entity));
        assert!(highlight_context.is_empty());
    }
}
