use serde::Serialize;

use super::Handedness;

/// A lifecycle call delivered to an entity's own behaviour while it is being grabbed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum EntityCall {
    /// The entity was just grabbed
    StartNearGrab {
        /// Which hand grabbed it
        side: Handedness,
        /// Session id of the avatar that owns the hand
        avatar_session_id: String,
    },
    /// The entity is still being held, delivered every tick
    ContinueNearGrab {
        side: Handedness,
        avatar_session_id: String,
    },
    /// The entity was let go
    ReleaseGrab {
        side: Handedness,
        avatar_session_id: String,
    },
}

impl EntityCall {
    /// Which hand the call concerns
    pub fn side(&self) -> Handedness {
        match self {
            EntityCall::StartNearGrab { side, .. }
            | EntityCall::ContinueNearGrab { side, .. }
            | EntityCall::ReleaseGrab { side, .. } => *side,
        }
    }
}

/// An entity's behaviour inbox. Calls accumulate here until the entity's script drains them.
///
/// Entities without a `Script` silently ignore lifecycle calls.
#[derive(Debug, Clone, Default)]
pub struct Script {
    calls: Vec<EntityCall>,
}

impl Script {
    pub fn deliver(&mut self, call: EntityCall) {
        self.calls.push(call);
    }

    /// Calls received since the last drain
    pub fn calls(&self) -> &[EntityCall] {
        &self.calls
    }

    pub fn drain(&mut self) -> Vec<EntityCall> {
        std::mem::take(&mut self.calls)
    }
}
