//! Controller modules are the behaviours that compete for a hand. Each tick the
//! [`crate::Dispatcher`] asks every module whether it's ready, runs the highest priority one that
//! is, and tells the previous owner of the hand to clean up if it lost out.
/// Picking what a hand would grab
pub mod candidate;
/// Stops a held trigger from stamping out a clone every tick
pub mod clone_gate;
/// Starting, continuing and ending a grab
pub mod grab_lifecycle;
/// The near grab module
pub mod near_grab;

pub use candidate::{select_candidate, Candidate};
pub use clone_gate::CloneGate;
pub use grab_lifecycle::GrabSession;
pub use near_grab::{GrabModule, GrabPhase};

use hecs::Entity;

use crate::{components::Handedness, snapshot::ControllerFrameSnapshot, Scene};

/// What a module reports back to the dispatcher from [`ControllerModule::is_ready`] and
/// [`ControllerModule::run`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunningValues {
    /// Does the module want (or want to keep) the hand?
    pub active: bool,
    /// The entities the module is acting on
    pub targets: Vec<Entity>,
}

impl RunningValues {
    /// The module wants the hand, to act on `targets`
    pub fn active(targets: Vec<Entity>) -> Self {
        Self {
            active: true,
            targets,
        }
    }

    /// The module doesn't want the hand
    pub fn inactive() -> Self {
        Self::default()
    }
}

/// The contract every controller module satisfies so that the dispatcher can arbitrate between
/// them.
///
/// None of these methods may block, and none of them return errors: anything that goes wrong is
/// dealt with inside the module, which then reports itself inactive.
pub trait ControllerModule {
    /// The hand this module instance competes for
    fn handedness(&self) -> Handedness;

    /// Would this module like to take the hand this tick? Called for modules that don't currently
    /// own the hand.
    fn is_ready(&mut self, snapshot: &ControllerFrameSnapshot, scene: &mut Scene)
        -> RunningValues;

    /// Do this tick's work. Only called while the module owns the hand; returning inactive gives
    /// the hand back.
    fn run(&mut self, snapshot: &ControllerFrameSnapshot, scene: &mut Scene) -> RunningValues;

    /// Let go of everything. Called when the module loses the hand to a higher priority module,
    /// when it is unregistered and at teardown. Must be safe to call at any time, any number of
    /// times.
    fn cleanup(&mut self, scene: &mut Scene);
}
