#![allow(missing_docs)]
pub mod grab_follow;
pub mod lifetime;

pub use grab_follow::grab_follow_system;
pub use lifetime::lifetime_system;
