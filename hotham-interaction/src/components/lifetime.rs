/// Seconds left before the entity is removed from the world by [`crate::systems::lifetime_system`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime(pub f32);
