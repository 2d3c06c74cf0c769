//! Page modules, one per routed `Screen`.
//!
//! ARCHITECTURE
//! ============
//! Pages never choose which screen is shown; they call collaborators and send
//! inputs to the session router, and delegate rendering details to
//! `components`.

pub mod auth;
pub mod dashboard;
pub mod recovery;
pub mod status;
