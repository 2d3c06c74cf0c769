use super::*;

#[test]
fn memory_load_keeps_tokens_until_cleared() {
    let pending = MemoryPending::with(TokenPair::new("a", "r"));
    assert!(pending.is_present());
    assert_eq!(pending.load(), Some(TokenPair::new("a", "r")));
    assert_eq!(pending.load(), Some(TokenPair::new("a", "r")));
    pending.clear();
    assert!(!pending.is_present());
}

#[test]
fn memory_clones_share_the_slot() {
    let pending = MemoryPending::default();
    let observer = pending.clone();
    pending.store(&TokenPair::new("a", "r"));
    assert_eq!(observer.load(), Some(TokenPair::new("a", "r")));
    observer.clear();
    assert_eq!(pending.load(), None);
}

#[test]
fn memory_clear_is_idempotent() {
    let pending = MemoryPending::default();
    pending.clear();
    pending.clear();
    assert_eq!(pending.load(), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn session_storage_store_is_empty_outside_the_browser() {
    let pending = SessionStoragePending;
    pending.store(&TokenPair::new("a", "r"));
    assert_eq!(pending.load(), None);
    pending.clear();
}
