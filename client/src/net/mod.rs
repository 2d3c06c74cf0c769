//! Networking modules for the hosted auth, data and storage platform.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` owns the session and its change notifications, `rest` and
//! `storage` issue data and file calls with the session's token, `http`
//! holds the shared request plumbing, and `types` defines the wire schema.

pub mod auth;
pub mod error;
pub mod http;
pub mod rest;
pub mod storage;
pub mod types;
