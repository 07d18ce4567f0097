use hecs::Entity;

/// Grab metadata for an entity. Entities without this component can't be near-grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grabbable {
    /// Can this entity be grabbed at all?
    pub grabbable: bool,
    /// Bind the grab to the tracked controller rather than the avatar's hand, when one is available
    pub grab_follows_controller: bool,
    /// Grabbing this entity should grab its [`super::Parent`] instead
    pub grab_delegate_to_parent: bool,
}

impl Default for Grabbable {
    fn default() -> Self {
        Self {
            grabbable: true,
            grab_follows_controller: true,
            grab_delegate_to_parent: true,
        }
    }
}

/// Marks an entity as a stamp: grabbing it grabs a fresh copy instead.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cloneable {
    /// Maximum number of live clones, `0` for no limit
    pub limit: u32,
    /// How long each clone lives for, in seconds. `0` for forever
    pub lifetime: f32,
}

/// The entity this one was cloned from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloneOrigin(pub Entity);

/// A locked entity can't be grabbed, regardless of its [`Grabbable`] component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Locked;
