//! Session-facing state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written only by the router's screen observer and the profile fetch; read
//! by the root view to pick a page and by the dashboard for role gating.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::{AuthUser, Profile, Session};
use crate::router::Screen;
use crate::util::roles::Role;

#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub screen: Screen,
    pub user: Option<AuthUser>,
    /// `Member` until the user's profile has been fetched.
    pub role: Role,
}

impl SessionState {
    /// Record a routed screen and the session it was routed with.
    ///
    /// Returns `true` when the signed-in user changed, so the caller can
    /// refetch the profile.
    pub fn apply(&mut self, screen: Screen, session: Option<&Session>) -> bool {
        self.screen = screen;
        let user = session.map(|s| s.user.clone());
        let changed = user.as_ref().map(|u| &u.id) != self.user.as_ref().map(|u| &u.id);
        if changed {
            self.role = Role::Member;
        }
        self.user = user;
        changed && self.user.is_some()
    }

    /// Apply a fetched profile if it still belongs to the current user.
    pub fn apply_profile(&mut self, profile: Option<&Profile>) {
        let Some(profile) = profile else {
            self.role = Role::Member;
            return;
        };
        if self.user.as_ref().is_some_and(|u| u.id == profile.id) {
            self.role = Role::parse(profile.role.as_deref());
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }
}
