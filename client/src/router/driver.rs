//! Serialized input queue for the session router.
//!
//! SYSTEM CONTEXT
//! ==============
//! Session-change notifications arrive from the auth gateway at arbitrary
//! times, including while an exchange is still in flight. The listener only
//! enqueues; a single task drains the queue in arrival order, so every
//! notification observes the result of the evaluation before it.

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;

use futures::StreamExt;
use futures::channel::mpsc;

use super::location::Location;
use super::machine::{RouterInput, SessionRouter};
use super::pending::PendingRecoveryStore;
use crate::net::auth::AuthGateway;
use crate::net::types::SessionEvent;

pub type RouterReceiver = mpsc::UnboundedReceiver<RouterInput>;

/// Cloneable handle for queueing router work.
#[derive(Clone, Debug)]
pub struct RouterSender(mpsc::UnboundedSender<RouterInput>);

impl RouterSender {
    /// Returns `false` once the driver has stopped.
    pub fn send(&self, input: RouterInput) -> bool {
        self.0.unbounded_send(input).is_ok()
    }
}

pub fn channel() -> (RouterSender, RouterReceiver) {
    let (tx, rx) = mpsc::unbounded();
    (RouterSender(tx), rx)
}

/// Start the router and process queued inputs until `Shutdown`.
///
/// Returns the router with its listener released.
pub async fn run<G, L, P>(
    mut router: SessionRouter<G, L, P>,
    tx: RouterSender,
    mut rx: RouterReceiver,
) -> SessionRouter<G, L, P>
where
    G: AuthGateway,
    L: Location,
    P: PendingRecoveryStore,
{
    let listener = Box::new(move |event: SessionEvent| {
        if !tx.send(RouterInput::SessionChanged(event)) {
            leptos::logging::warn!("router: session event after shutdown dropped");
        }
    });
    router.start(listener).await;

    while let Some(input) = rx.next().await {
        let stop = input == RouterInput::Shutdown;
        router.handle(input).await;
        if stop {
            break;
        }
    }
    router.teardown();
    router
}
