//! Holding area for recovery tokens that must survive a reload.
//!
//! Tokens are stashed when a recovery link is first parsed and cleared once
//! the exchange they feed has finished, so a reload during the exchange picks
//! them up again. Evaluations never overlap, so a stashed pair is exchanged at
//! most once per page.

#[cfg(test)]
#[path = "pending_test.rs"]
mod pending_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::net::types::TokenPair;
use crate::util::storage::{self, StorageArea};

const ACCESS_KEY: &str = "roster.recovery.access_token";
const REFRESH_KEY: &str = "roster.recovery.refresh_token";

pub trait PendingRecoveryStore {
    fn load(&self) -> Option<TokenPair>;
    fn store(&self, tokens: &TokenPair);
    /// Idempotent: clearing an empty store is a no-op.
    fn clear(&self);

    fn is_present(&self) -> bool {
        self.load().is_some()
    }
}

/// `sessionStorage`-backed store. Survives reloads, not tab closes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStoragePending;

impl PendingRecoveryStore for SessionStoragePending {
    fn load(&self) -> Option<TokenPair> {
        let access = storage::load_raw(StorageArea::Session, ACCESS_KEY).filter(|v| !v.is_empty())?;
        let refresh = storage::load_raw(StorageArea::Session, REFRESH_KEY).filter(|v| !v.is_empty())?;
        Some(TokenPair::new(access, refresh))
    }

    fn store(&self, tokens: &TokenPair) {
        storage::save_raw(StorageArea::Session, ACCESS_KEY, &tokens.access_token);
        storage::save_raw(StorageArea::Session, REFRESH_KEY, &tokens.refresh_token);
    }

    fn clear(&self) {
        storage::remove(StorageArea::Session, ACCESS_KEY);
        storage::remove(StorageArea::Session, REFRESH_KEY);
    }
}

/// In-memory store, used on the server render path and in tests.
///
/// Clones share the same slot so a test can inspect what the router wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryPending {
    slot: Rc<RefCell<Option<TokenPair>>>,
}

impl MemoryPending {
    pub fn with(tokens: TokenPair) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(tokens))),
        }
    }
}

impl PendingRecoveryStore for MemoryPending {
    fn load(&self) -> Option<TokenPair> {
        self.slot.borrow().clone()
    }

    fn store(&self, tokens: &TokenPair) {
        *self.slot.borrow_mut() = Some(tokens.clone());
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}
