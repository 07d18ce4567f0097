#![allow(missing_docs)]
pub mod bounding_box;
pub mod grabbable;
pub mod hand;
pub mod info;
pub mod lifetime;
pub mod parent;
pub mod script;
pub mod transform;

pub use bounding_box::BoundingBox;
pub use grabbable::{CloneOrigin, Cloneable, Grabbable, Locked};
pub use hand::Handedness;
pub use info::{EntityKind, Info};
pub use lifetime::Lifetime;
pub use parent::Parent;
pub use script::{EntityCall, Script};
pub use transform::Transform;
