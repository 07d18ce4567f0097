#![deny(missing_docs)]

//! Hand interaction for Hotham. 🤏
//!
//! This crate decides, every tick and separately for each hand, which of several competing
//! controller modules gets to own that hand, and ships the module that most games want first:
//! [`modules::GrabModule`], a near-grab state machine that highlights the closest grabbable thing
//! in reach, grabs it (or a clone of it) when the trigger is pulled and lets go again when the
//! trigger is released.
//!
//! # Getting started
//! Build a [`Scene`], register one [`modules::GrabModule`] per hand with a [`Dispatcher`] and call
//! [`Dispatcher::tick`] once per frame with the latest [`contexts::InputContext`]. When you're done,
//! call [`Dispatcher::teardown`] so that nothing is left grabbed or highlighted.
//!
//! ```ignore
//! let mut scene = Scene::new(AvatarContext::new("avatar"));
//! let mut dispatcher = Dispatcher::new(GrabConfig::default());
//! dispatcher.register("LeftNearGrab", 500, GrabModule::new(Handedness::Left, config));
//! dispatcher.register("RightNearGrab", 500, GrabModule::new(Handedness::Right, config));
//!
//! loop {
//!     dispatcher.tick(&mut scene, &input_context);
//! }
//! ```

pub use dispatcher::{Dispatcher, ModuleId};
pub use glam;
pub use hecs;
pub use interaction_error::InteractionError;
pub use scene::Scene;

/// Components are data stored against entities in the scene's [`hecs::World`]
pub mod components;
/// Tunable thresholds shared by every controller module
pub mod config;
/// Contexts are wrappers around the external state the modules interact with
pub mod contexts;
mod dispatcher;
mod interaction_error;
/// Controller modules compete for ownership of a hand each tick
pub mod modules;
mod scene;
/// The frozen, per-tick view of the controllers and the entities around them
pub mod snapshot;
/// Systems are functions called each tick to update the scene
pub mod systems;

/// Interaction result type
pub type InteractionResult<T> = std::result::Result<T, InteractionError>;
