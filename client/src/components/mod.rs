//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard sections while reading/writing shared state
//! from Leptos context providers.

pub mod documents_panel;
pub mod profiles_panel;
pub mod student_card;
pub mod student_form;
