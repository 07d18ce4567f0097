use std::collections::VecDeque;

use hecs::Entity;
use log::trace;
use serde::Serialize;

use crate::{components::Handedness, InteractionResult};

/// Channel carrying [`ManipulationMessage`]s
pub const OBJECT_MANIPULATION_CHANNEL: &str = "Object-Manipulation";
/// Channel carrying [`UnhighlightMessage`]s
pub const UNHIGHLIGHT_CHANNEL: &str = "Unhighlight-Entity";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ManipulationAction {
    Grab,
    Release,
}

/// Sent whenever a hand starts or stops holding an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ManipulationMessage {
    pub action: ManipulationAction,
    #[serde(with = "entity_bits")]
    pub entity: Entity,
    /// Name of the hand joint doing the holding, eg. `"RightHand"`
    pub joint: &'static str,
}

/// Sent whenever a hand stops pointing out an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnhighlightMessage {
    pub hand: Handedness,
    #[serde(with = "entity_bits")]
    pub entity: Entity,
}

/// A fire-and-forget notification for anyone observing the hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMessage {
    ObjectManipulation(ManipulationMessage),
    Unhighlight(UnhighlightMessage),
}

impl ChannelMessage {
    pub fn channel(&self) -> &'static str {
        match self {
            ChannelMessage::ObjectManipulation(_) => OBJECT_MANIPULATION_CHANNEL,
            ChannelMessage::Unhighlight(_) => UNHIGHLIGHT_CHANNEL,
        }
    }

    /// The message body as JSON, ready to be handed to a UI or a script
    pub fn payload_json(&self) -> InteractionResult<String> {
        let json = match self {
            ChannelMessage::ObjectManipulation(m) => serde_json::to_string(m)?,
            ChannelMessage::Unhighlight(m) => serde_json::to_string(m)?,
        };
        Ok(json)
    }
}

/// Outbound message queue. Messages sent during a tick are drained by the host.
#[derive(Debug, Default, Clone)]
pub struct MessageContext {
    messages: VecDeque<ChannelMessage>,
}

impl MessageContext {
    pub fn send(&mut self, message: ChannelMessage) {
        trace!("Sending {message:?} on {}", message.channel());
        self.messages.push_back(message);
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChannelMessage> {
        self.messages.iter()
    }

    pub fn drain(&mut self) -> Vec<ChannelMessage> {
        self.messages.drain(..).collect()
    }
}

mod entity_bits {
    use hecs::Entity;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(entity: &Entity, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(entity.to_bits().get())
    }
}
