use log::{debug, trace};

use crate::{
    components::Handedness,
    config::GrabConfig,
    contexts::InputContext,
    modules::{ControllerModule, RunningValues},
    snapshot::ControllerFrameSnapshot,
    Scene,
};

/// Identifies a module registered with a [`Dispatcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(usize);

struct Registration {
    id: ModuleId,
    name: String,
    priority: u32,
    module: Box<dyn ControllerModule>,
}

/// Decides which controller module owns each hand.
///
/// Each tick the dispatcher builds one [`ControllerFrameSnapshot`] and, for each hand, walks the
/// modules registered for that hand from highest to lowest priority (modules with the same
/// priority are walked in the order they were registered). The module that owned the hand last
/// tick keeps its place in that walk without being asked again: it gives the hand back by
/// returning inactive from [`ControllerModule::run`]. Otherwise the first module reporting itself
/// ready wins. If that's not the previous owner, the previous owner is cleaned up before the
/// winner runs, so each hand has exactly one owner per tick.
///
/// **IMPORTANT**: make sure you call [`Dispatcher::teardown`] before dropping the dispatcher, or
/// grabs and highlights may be left behind.
pub struct Dispatcher {
    config: GrabConfig,
    registrations: Vec<Registration>,
    owners: [Option<ModuleId>; 2],
    next_id: usize,
}

impl Dispatcher {
    /// Create a dispatcher with no modules
    pub fn new(config: GrabConfig) -> Self {
        Self {
            config,
            registrations: Vec::new(),
            owners: [None; 2],
            next_id: 0,
        }
    }

    /// Add a module. Higher priorities are considered first.
    pub fn register<M: ControllerModule + 'static>(
        &mut self,
        name: impl Into<String>,
        priority: u32,
        module: M,
    ) -> ModuleId {
        let id = ModuleId(self.next_id);
        self.next_id += 1;
        let name = name.into();
        debug!(
            "Registering {name} for the {:?} hand at priority {priority}",
            module.handedness()
        );

        self.registrations.push(Registration {
            id,
            name,
            priority,
            module: Box::new(module),
        });

        // Stable, so registration order breaks ties.
        self.registrations.sort_by(|a, b| b.priority.cmp(&a.priority));
        id
    }

    /// Remove a module, cleaning it up first. Returns `false` if it wasn't registered.
    pub fn unregister(&mut self, id: ModuleId, scene: &mut Scene) -> bool {
        let Some(position) = self.position(id) else {
            return false;
        };
        let mut registration = self.registrations.remove(position);
        registration.module.cleanup(scene);
        for owner in self.owners.iter_mut() {
            if *owner == Some(id) {
                *owner = None;
            }
        }
        debug!("Unregistered {}", registration.name);
        true
    }

    /// The module that currently owns this hand, if any
    pub fn owner(&self, handedness: Handedness) -> Option<ModuleId> {
        self.owners[handedness.index()]
    }

    /// Name a module was registered with
    pub fn name(&self, id: ModuleId) -> Option<&str> {
        self.registrations
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.as_str())
    }

    /// Run one tick of arbitration for both hands. Returns what each hand's owner reported from
    /// its run, left then right.
    pub fn tick(
        &mut self,
        scene: &mut Scene,
        input_context: &InputContext,
    ) -> [RunningValues; 2] {
        scene.avatar_context.sync_with_input(input_context);
        let snapshot = ControllerFrameSnapshot::capture(scene, input_context, &self.config);

        Handedness::BOTH.map(|handedness| self.tick_hand(handedness, &snapshot, scene))
    }

    fn tick_hand(
        &mut self,
        handedness: Handedness,
        snapshot: &ControllerFrameSnapshot,
        scene: &mut Scene,
    ) -> RunningValues {
        let previous = self.owners[handedness.index()];

        let winner = self
            .registrations
            .iter_mut()
            .filter(|r| r.module.handedness() == handedness)
            .find_map(|r| {
                if Some(r.id) == previous || r.module.is_ready(snapshot, scene).active {
                    Some(r.id)
                } else {
                    None
                }
            });

        if previous != winner {
            if let Some(previous) = previous.and_then(|id| self.position(id)) {
                let previous = &mut self.registrations[previous];
                debug!("{} lost the {handedness:?} hand, cleaning up", previous.name);
                previous.module.cleanup(scene);
            }
        }

        let Some(winner) = winner.and_then(|id| self.position(id)) else {
            self.owners[handedness.index()] = None;
            return RunningValues::inactive();
        };

        let winner = &mut self.registrations[winner];
        let values = winner.module.run(snapshot, scene);
        if values.active {
            trace!("{} owns the {handedness:?} hand", winner.name);
            self.owners[handedness.index()] = Some(winner.id);
        } else {
            debug!("{} let go of the {handedness:?} hand", winner.name);
            self.owners[handedness.index()] = None;
        }

        values
    }

    /// Clean up every module. Nothing is left grabbed or highlighted afterwards.
    pub fn teardown(&mut self, scene: &mut Scene) {
        for registration in self.registrations.iter_mut() {
            registration.module.cleanup(scene);
        }
        self.owners = [None; 2];
    }

    fn position(&self, id: ModuleId) -> Option<usize> {
        self.registrations.iter().position(|r| r.id == id)
    }
}
