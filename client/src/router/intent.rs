//! Navigation intent resolution.
//!
//! `NavigationIntent::resolve` is a pure function of the URL, session
//! presence, and the router's recovery hold. Precedence is fixed: recovery,
//! then email confirmation, then sign-in versus dashboard. Stale fragments
//! left by earlier redirects can satisfy several conditions at once. A
//! recovery URL with nothing to recover is only an error when signed out.

#[cfg(test)]
#[path = "intent_test.rs"]
mod intent_test;

use super::url::{Fragment, LinkType, RoutePath};
use crate::net::types::{OneTimeCode, TokenPair};

/// Recovery tokens the router is holding outside the URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryHold {
    None,
    /// Stashed by an earlier evaluation and not yet consumed.
    Pending,
    /// Already exchanged for a session in this router instance.
    Exchanged,
}

/// Where a recovery evaluation gets its tokens from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenSource {
    Fragment(TokenPair),
    Pending,
    Exchanged,
}

/// Screen the current URL and session call for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationIntent {
    PasswordRecovery(TokenSource),
    /// A recovery link with no usable tokens anywhere and no session.
    InvalidRecovery,
    EmailConfirmation(OneTimeCode),
    SignIn,
    Dashboard,
}

impl NavigationIntent {
    pub fn resolve(path: RoutePath, fragment: &Fragment, has_session: bool, hold: RecoveryHold) -> Self {
        let link = fragment.link_type();
        let recovery_link = link == Some(LinkType::Recovery);

        if recovery_link {
            if let Some(pair) = fragment.token_pair() {
                return Self::PasswordRecovery(TokenSource::Fragment(pair));
            }
        }
        match hold {
            RecoveryHold::Exchanged => return Self::PasswordRecovery(TokenSource::Exchanged),
            RecoveryHold::Pending => return Self::PasswordRecovery(TokenSource::Pending),
            RecoveryHold::None => {}
        }
        if link == Some(LinkType::Signup) {
            return Self::EmailConfirmation(OneTimeCode(fragment.raw().to_owned()));
        }

        if has_session {
            return Self::Dashboard;
        }
        if recovery_link || path == RoutePath::ResetPassword {
            return Self::InvalidRecovery;
        }
        Self::SignIn
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PasswordRecovery(_) => "password_recovery",
            Self::InvalidRecovery => "invalid_recovery",
            Self::EmailConfirmation(_) => "email_confirmation",
            Self::SignIn => "sign_in",
            Self::Dashboard => "dashboard",
        }
    }
}
