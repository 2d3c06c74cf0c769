//! Reactive state shared through Leptos context.
//!
//! Each struct here is plain data held in an `RwSignal` provided at the app
//! root, so its transitions can be unit tested without a runtime.

pub mod roster;
pub mod session;
