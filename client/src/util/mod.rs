//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and pure presentation
//! rules from page logic so they can be tested natively.

pub mod roles;
pub mod storage;
pub mod validation;
