//! Session-aware screen routing.
//!
//! SYSTEM CONTEXT
//! ==============
//! Decides which top-level screen to show from the visible URL, the auth
//! session and any recovery tokens held across reloads. Pages never pick
//! their own screen; they send inputs to the driver and render `Screen`.
//!
//! `url` and `intent` are pure. `pending` and `location` wrap browser storage
//! and history behind traits with in-memory twins. `machine` owns the state
//! and `driver` serializes its inputs.

pub mod driver;
pub mod intent;
pub mod location;
pub mod machine;
pub mod pending;
pub mod url;

#[cfg(test)]
pub(crate) mod test_support;

pub use driver::{RouterReceiver, RouterSender, channel, run};
pub use machine::{Flow, RouterInput, Screen, SessionRouter};
