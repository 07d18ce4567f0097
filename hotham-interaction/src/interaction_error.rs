use hecs::Entity;
use thiserror::Error;

/// Everything that can go wrong while interacting with the scene.
///
/// None of these ever cross the [`crate::Dispatcher`] boundary: controller modules log them and
/// report themselves inactive instead.
#[derive(Error, Debug)]
pub enum InteractionError {
    /// The avatar has no joint with this name, so a grab can't be bound to it
    #[error("Unable to resolve avatar joint {name}")]
    InvalidJoint {
        /// Name of the joint that was requested
        name: String,
    },
    /// The entity no longer exists, or has no transform
    #[error("Entity {0:?} could not be found")]
    UnknownEntity(Entity),
    /// A clone was requested for an entity that isn't cloneable
    #[error("Entity {0:?} is not cloneable")]
    NotCloneable(Entity),
    /// The entity already has as many clones as it is allowed
    #[error("Entity {entity:?} already has {limit} clones")]
    CloneLimitReached {
        /// The entity that was to be cloned
        entity: Entity,
        /// Its clone limit
        limit: u32,
    },
    /// A configuration value was out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Configuration or payload JSON could not be (de)serialised
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    /// Some other error
    Other(#[from] anyhow::Error),
}
