use hecs::Entity;

/// Component used to indicate that this entity is part of a compound object rooted at its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);
