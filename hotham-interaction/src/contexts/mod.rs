#![allow(missing_docs)]
pub mod avatar_context;
pub mod grab_context;
pub mod haptic_context;
pub mod highlight_context;
pub mod input_context;
pub mod message_context;

pub use avatar_context::{AvatarContext, JointIndex};
pub use grab_context::{Grab, GrabContext, GrabHandle};
pub use haptic_context::{HapticContext, HapticPulse};
pub use highlight_context::HighlightContext;
pub use input_context::{HandInput, InputContext};
pub use message_context::{
    ChannelMessage, ManipulationAction, ManipulationMessage, MessageContext, UnhighlightMessage,
};
