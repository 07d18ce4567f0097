use hecs::Entity;
use log::{debug, error, warn};

use crate::{
    components::Handedness,
    config::GrabConfig,
    contexts::{ChannelMessage, JointIndex, UnhighlightMessage},
    snapshot::{ControllerFrameSnapshot, EntityProperties},
    InteractionError, InteractionResult, Scene,
};

use super::{
    candidate::select_candidate,
    clone_gate::CloneGate,
    grab_lifecycle::{choose_joint, continue_near_grab, end_near_grab, start_near_grab},
    ControllerModule, GrabSession, RunningValues,
};

/// Where a [`GrabModule`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrabPhase {
    /// Trigger and grip are released
    #[default]
    Idle,
    /// The user is reaching, but there's nothing in range
    Searching,
    /// Something is in range and highlighted
    Highlighted,
    /// Something is being held
    Grabbing,
}

/// Near grab: pick up whatever is closest to the hand.
///
/// Reaching towards something grabbable highlights it (with a haptic pulse whenever the hand moves
/// onto something new), clicking the trigger or squeezing the grip grabs it and releasing both
/// lets it go. Cloneable entities are stamped out instead: the clone is grabbed, and no further
/// clones are made until both inputs have been released.
///
/// Create one per hand.
#[derive(Debug)]
pub struct GrabModule {
    handedness: Handedness,
    config: GrabConfig,
    phase: GrabPhase,
    target: Option<Entity>,
    highlighted: Option<Entity>,
    haptic_target: Option<Entity>,
    clone_gate: CloneGate,
    session: Option<GrabSession>,
}

impl GrabModule {
    /// Create a module for one hand
    pub fn new(handedness: Handedness, config: GrabConfig) -> Self {
        Self {
            handedness,
            config,
            phase: Default::default(),
            target: None,
            highlighted: None,
            haptic_target: None,
            clone_gate: Default::default(),
            session: None,
        }
    }

    /// Where the module is in its lifecycle
    pub fn phase(&self) -> GrabPhase {
        self.phase
    }

    /// The entity being highlighted or held
    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    /// The entity currently highlighted by this hand
    pub fn highlighted(&self) -> Option<Entity> {
        self.highlighted
    }

    /// The last entity that triggered a haptic pulse
    pub fn haptic_target(&self) -> Option<Entity> {
        self.haptic_target
    }

    /// May the next grab of a cloneable entity make a clone?
    pub fn clone_allowed(&self) -> bool {
        self.clone_gate.is_open()
    }

    /// The grab in progress, if any
    pub fn session(&self) -> Option<&GrabSession> {
        self.session.as_ref()
    }

    fn run_grabbing(
        &mut self,
        snapshot: &ControllerFrameSnapshot,
        scene: &mut Scene,
    ) -> RunningValues {
        let hand = snapshot.hand(self.handedness);
        if hand.is_released(&self.config) {
            self.clone_gate.update(hand, &self.config);
            self.end_grab(scene);
            return RunningValues::inactive();
        }

        if snapshot.both_hands_squeezed(&self.config) {
            debug!(
                "Both grips squeezed, {:?} hand is letting go for a two handed grab",
                self.handedness
            );
            self.end_grab(scene);
            return RunningValues::inactive();
        }

        let Some(target) = self.target else {
            self.end_grab(scene);
            return RunningValues::inactive();
        };

        if snapshot.resolve(target, scene).is_none() {
            debug!("{target:?} was deleted while being held, releasing");
            self.end_grab(scene);
            return RunningValues::inactive();
        }

        if let Some(session) = &self.session {
            continue_near_grab(self.handedness, session, scene);
        }
        RunningValues::active(vec![target])
    }

    fn try_grab(
        &mut self,
        target: &EntityProperties,
        snapshot: &ControllerFrameSnapshot,
        scene: &mut Scene,
    ) -> InteractionResult<Option<Entity>> {
        // Resolve the joint first: there's no point stamping out a clone we can't hold.
        let joint = choose_joint(self.handedness, target, snapshot, &scene.avatar_context)?;

        if target.is_cloneable() {
            // One clone per press; the stamp itself is never picked up.
            if !self.clone_gate.is_open() {
                return Ok(None);
            }
            let clone = match scene.clone_entity(target.entity) {
                Ok(clone) => clone,
                Err(e) => {
                    warn!("Unable to clone {:?}: {e}", target.entity);
                    return Ok(None);
                }
            };
            let clone_props = scene
                .entity_properties(clone)
                .ok_or(InteractionError::UnknownEntity(clone))?;
            self.start_grab(&clone_props, joint, scene)?;
            self.clone_gate.close();
            return Ok(Some(clone));
        }

        self.start_grab(target, joint, scene)?;
        Ok(Some(target.entity))
    }

    fn start_grab(
        &mut self,
        target: &EntityProperties,
        joint: JointIndex,
        scene: &mut Scene,
    ) -> InteractionResult<()> {
        self.clear_highlight(scene);
        if let Some(previous) = self.session.take() {
            end_near_grab(self.handedness, previous, scene);
        }

        let session = start_near_grab(self.handedness, target, joint, &self.config, scene)?;
        self.target = Some(session.entity);
        self.session = Some(session);
        self.phase = GrabPhase::Grabbing;
        Ok(())
    }

    fn end_grab(&mut self, scene: &mut Scene) {
        if let Some(session) = self.session.take() {
            end_near_grab(self.handedness, session, scene);
        }
        self.clear_highlight(scene);
        self.haptic_target = None;
        self.target = None;
        self.phase = GrabPhase::Idle;
    }

    fn set_highlight(&mut self, entity: Entity, scene: &mut Scene) {
        if self.highlighted == Some(entity) {
            return;
        }
        self.clear_highlight(scene);
        scene.highlight_context.highlight(self.handedness, entity);
        self.highlighted = Some(entity);
    }

    fn clear_highlight(&mut self, scene: &mut Scene) {
        if let Some(entity) = self.highlighted.take() {
            scene.highlight_context.unhighlight(self.handedness, entity);
            scene
                .message_context
                .send(ChannelMessage::Unhighlight(UnhighlightMessage {
                    hand: self.handedness,
                    entity,
                }));
        }
    }

    fn pulse_if_new(&mut self, entity: Entity, scene: &mut Scene) {
        if self.haptic_target == Some(entity) {
            return;
        }
        scene.haptic_context.request_haptic_feedback(
            self.config.haptic_pulse_strength,
            self.config.haptic_pulse_duration_ms,
            self.handedness,
        );
        self.haptic_target = Some(entity);
    }
}

impl ControllerModule for GrabModule {
    fn handedness(&self) -> Handedness {
        self.handedness
    }

    fn is_ready(
        &mut self,
        snapshot: &ControllerFrameSnapshot,
        scene: &mut Scene,
    ) -> RunningValues {
        let hand = snapshot.hand(self.handedness);
        self.clone_gate.update(hand, &self.config);
        if hand.is_released(&self.config) {
            // A held entity is let go by `run`, which owns the release lifecycle.
            if self.session.is_none() {
                self.clear_highlight(scene);
                self.haptic_target = None;
                self.target = None;
                self.phase = GrabPhase::Idle;
            }
            return RunningValues::inactive();
        }

        if self.session.is_some() {
            return RunningValues::active(self.target.into_iter().collect());
        }

        match select_candidate(self.handedness, snapshot, scene, &self.config) {
            Some(candidate) => {
                let entity = candidate.target.entity;
                self.pulse_if_new(candidate.touched, scene);
                self.set_highlight(entity, scene);
                self.target = Some(entity);
                self.phase = GrabPhase::Highlighted;
                RunningValues::active(vec![entity])
            }
            None => {
                self.clear_highlight(scene);
                self.haptic_target = None;
                self.target = None;
                self.phase = GrabPhase::Searching;
                RunningValues::inactive()
            }
        }
    }

    fn run(&mut self, snapshot: &ControllerFrameSnapshot, scene: &mut Scene) -> RunningValues {
        if self.session.is_some() {
            return self.run_grabbing(snapshot, scene);
        }

        let ready = self.is_ready(snapshot, scene);
        if !ready.active {
            self.clear_highlight(scene);
            return ready;
        }

        let hand = snapshot.hand(self.handedness);
        if !hand.trigger_click && hand.secondary_value <= self.config.secondary_on {
            return ready;
        }

        let Some(candidate) = select_candidate(self.handedness, snapshot, scene, &self.config)
        else {
            return ready;
        };

        match self.try_grab(&candidate.target, snapshot, scene) {
            Ok(Some(grabbed)) => RunningValues::active(vec![grabbed]),
            // Nothing changed, so try again next tick.
            Ok(None) => ready,
            Err(e) => {
                error!(
                    "{:?} hand was unable to grab {:?}: {e}",
                    self.handedness, candidate.target.entity
                );
                self.end_grab(scene);
                RunningValues::inactive()
            }
        }
    }

    fn cleanup(&mut self, scene: &mut Scene) {
        self.end_grab(scene);
    }
}
