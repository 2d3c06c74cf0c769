use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;

use super::*;
use crate::router::location::MemoryLocation;
use crate::router::machine::Screen;
use crate::router::pending::MemoryPending;
use crate::router::test_support::{FakeAuth, session_for};

type Seen = Rc<RefCell<Vec<&'static str>>>;

fn observed(fake: &FakeAuth, location: &MemoryLocation) -> (SessionRouter<FakeAuth, MemoryLocation, MemoryPending>, Seen) {
    let seen: Seen = Rc::default();
    let sink = Rc::clone(&seen);
    let router = SessionRouter::new(fake.clone(), location.clone(), MemoryPending::default())
        .with_observer(move |screen, _| sink.borrow_mut().push(screen.name()));
    (router, seen)
}

#[test]
fn queued_shutdown_stops_after_start() {
    let fake = FakeAuth::signed_in("u1");
    let (router, _) = observed(&fake, &MemoryLocation::new("/", ""));
    let (tx, rx) = channel();
    assert!(tx.send(RouterInput::Shutdown));

    let router = block_on(run(router, tx.clone(), rx));
    assert_eq!(router.screen(), &Screen::Dashboard);
    assert_eq!(fake.listener_count(), 0);
    assert!(!tx.send(RouterInput::Reevaluate));
}

#[test]
fn session_events_are_processed_in_arrival_order() {
    let fake = FakeAuth::default();
    let (router, seen) = observed(&fake, &MemoryLocation::new("/", ""));
    let (tx, rx) = channel();

    let mut pool = LocalPool::new();
    let handle = pool.spawner().spawn_local_with_handle(run(router, tx.clone(), rx)).unwrap();
    pool.run_until_stalled();
    assert_eq!(fake.listener_count(), 1);

    fake.emit(&SessionEvent::SignedIn(session_for("u1")));
    fake.emit(&SessionEvent::SignedOut);
    fake.emit(&SessionEvent::SignedIn(session_for("u2")));
    pool.run_until_stalled();
    assert_eq!(*seen.borrow(), vec!["sign_in", "dashboard", "sign_in", "dashboard"]);

    tx.send(RouterInput::Shutdown);
    let router = pool.run_until(handle);
    assert_eq!(router.session().map(|s| s.user.id.as_str()), Some("u2"));
    assert_eq!(fake.listener_count(), 0);
}

#[test]
fn events_emitted_during_exchange_are_queued_not_reentrant() {
    let fake = FakeAuth::default();
    let location = MemoryLocation::new("/reset-password", "access_token=abc&refresh_token=def&type=recovery");
    let (router, seen) = observed(&fake, &location);
    let (tx, rx) = channel();

    let mut pool = LocalPool::new();
    let handle = pool.spawner().spawn_local_with_handle(run(router, tx.clone(), rx)).unwrap();
    pool.run_until_stalled();

    // The SignedIn emitted by the exchange is handled after it and keeps the recovery form.
    assert_eq!(*seen.borrow(), vec!["processing_recovery", "password_recovery"]);
    assert_eq!(fake.exchange_calls().len(), 1);

    tx.send(RouterInput::CancelRecovery);
    tx.send(RouterInput::Shutdown);
    let router = pool.run_until(handle);
    assert_eq!(router.screen(), &Screen::Dashboard);
    assert_eq!(location.path(), "/");
}

#[test]
fn inputs_after_shutdown_are_ignored() {
    let fake = FakeAuth::default();
    let (router, _) = observed(&fake, &MemoryLocation::new("/", ""));
    let (tx, rx) = channel();
    tx.send(RouterInput::Shutdown);
    tx.send(RouterInput::SessionChanged(SessionEvent::SignedIn(session_for("late"))));

    let router = block_on(run(router, tx, rx));
    assert_eq!(router.screen(), &Screen::SignIn);
    assert!(router.session().is_none());
}
