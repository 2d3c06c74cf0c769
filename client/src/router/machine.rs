//! Session router state machine.
//!
//! ARCHITECTURE
//! ============
//! One owned `SessionRouter` holds the session, the exchanged recovery pair,
//! the current screen and the single session-change subscription. Each
//! evaluation resolves a `NavigationIntent` from the live URL and then runs at
//! most one collaborator call (token exchange or code verification).
//!
//! INVARIANTS
//! ==========
//! - Evaluations take `&mut self`, so two can never overlap.
//! - Pending recovery tokens stay stashed until the exchange they feed
//!   finishes, then are cleared whether it succeeded or not.
//! - A token pair that was already exchanged is never exchanged again.
//! - Consumed fragments are removed with a history replace.
//! - `Error` is retained until sign-out or an explicit return to sign-in.

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

use super::intent::{NavigationIntent, RecoveryHold, TokenSource};
use super::location::Location;
use super::pending::PendingRecoveryStore;
use super::url::{Fragment, RoutePath};
use crate::net::auth::{AuthGateway, Subscription};
use crate::net::error::RouteError;
use crate::net::types::{OneTimeCode, Session, SessionEvent, TokenPair};

/// Collaborator call the processing screen is waiting on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Recovery,
    Confirmation,
}

/// Screen the application should render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    /// Before the first evaluation completes.
    #[default]
    Loading,
    Processing(Flow),
    SignIn,
    Dashboard,
    PasswordRecovery,
    Error(RouteError),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Processing(Flow::Recovery) => "processing_recovery",
            Self::Processing(Flow::Confirmation) => "email_confirmation",
            Self::SignIn => "sign_in",
            Self::Dashboard => "dashboard",
            Self::PasswordRecovery => "password_recovery",
            Self::Error(_) => "error",
        }
    }
}

/// Work queued for the router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouterInput {
    SessionChanged(SessionEvent),
    /// Leave the recovery form without changing the password.
    CancelRecovery,
    /// The error screen's only action.
    ReturnToSignIn,
    Reevaluate,
    Shutdown,
}

pub struct SessionRouter<G, L, P> {
    gateway: G,
    location: L,
    pending: P,
    session: Option<Session>,
    exchanged: Option<TokenPair>,
    screen: Screen,
    subscription: Option<Subscription>,
    observer: Option<Box<dyn Fn(&Screen, Option<&Session>)>>,
    /// User id the observer last saw.
    observed_user: Option<String>,
}

impl<G, L, P> SessionRouter<G, L, P>
where
    G: AuthGateway,
    L: Location,
    P: PendingRecoveryStore,
{
    pub fn new(gateway: G, location: L, pending: P) -> Self {
        Self {
            gateway,
            location,
            pending,
            session: None,
            exchanged: None,
            screen: Screen::Loading,
            subscription: None,
            observer: None,
            observed_user: None,
        }
    }

    /// Call `observer` on every screen change, including transient ones, and
    /// whenever the signed-in user changes under an unchanged screen.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(&Screen, Option<&Session>) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    /// Register the session listener (once), load the session, evaluate.
    pub async fn start(&mut self, listener: Box<dyn Fn(SessionEvent)>) -> &Screen {
        if self.subscription.is_none() {
            self.subscription = Some(self.gateway.on_session_change(listener));
        }
        self.session = match self.gateway.current_session().await {
            Ok(session) => session,
            Err(e) => {
                leptos::logging::warn!("router: session lookup failed: {e}");
                None
            }
        };
        self.evaluate().await
    }

    /// Release the session listener. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    pub async fn handle(&mut self, input: RouterInput) -> &Screen {
        match input {
            RouterInput::SessionChanged(event) => self.on_session_event(event).await,
            RouterInput::CancelRecovery | RouterInput::ReturnToSignIn => {
                self.clear_recovery();
                self.reset_url();
                self.evaluate().await
            }
            RouterInput::Reevaluate => {
                if matches!(self.screen, Screen::Error(_)) {
                    return &self.screen;
                }
                self.evaluate().await
            }
            RouterInput::Shutdown => {
                self.teardown();
                &self.screen
            }
        }
    }

    async fn on_session_event(&mut self, event: SessionEvent) -> &Screen {
        leptos::logging::log!("router: session event {}", event.name());
        self.session = event.session().cloned();
        match event {
            SessionEvent::SignedOut => {
                self.clear_recovery();
                self.reset_url();
                self.evaluate().await
            }
            SessionEvent::UserUpdated(_) if self.screen == Screen::PasswordRecovery => {
                self.clear_recovery();
                self.reset_url();
                self.evaluate().await
            }
            _ if matches!(self.screen, Screen::Error(_)) => &self.screen,
            _ => self.evaluate().await,
        }
    }

    /// Resolve the live URL and session into a screen.
    pub async fn evaluate(&mut self) -> &Screen {
        let raw_path = self.location.path();
        let path = RoutePath::parse(&raw_path);
        let fragment = Fragment::parse(&self.location.fragment());
        let hold = if self.exchanged.is_some() {
            RecoveryHold::Exchanged
        } else if self.pending.is_present() {
            RecoveryHold::Pending
        } else {
            RecoveryHold::None
        };
        let intent = NavigationIntent::resolve(path, &fragment, self.session.is_some(), hold);
        leptos::logging::log!("router: path={} intent={}", path.as_str(), intent.name());

        let next = match intent {
            NavigationIntent::PasswordRecovery(TokenSource::Fragment(pair)) => {
                self.recover_from_fragment(pair, &raw_path).await
            }
            NavigationIntent::PasswordRecovery(TokenSource::Pending) => self.recover_from_pending(path).await,
            NavigationIntent::PasswordRecovery(TokenSource::Exchanged) => Screen::PasswordRecovery,
            NavigationIntent::InvalidRecovery => Screen::Error(RouteError::invalid_reset_link()),
            NavigationIntent::EmailConfirmation(code) => self.confirm_email(code, &raw_path).await,
            NavigationIntent::SignIn => Screen::SignIn,
            NavigationIntent::Dashboard => Screen::Dashboard,
        };
        self.set_screen(next);
        &self.screen
    }

    async fn recover_from_fragment(&mut self, pair: TokenPair, raw_path: &str) -> Screen {
        if self.exchanged.as_ref() == Some(&pair) {
            self.strip_fragment(raw_path);
            return Screen::PasswordRecovery;
        }
        // Stash before hiding the tokens so a reload mid-exchange can resume.
        self.pending.store(&pair);
        self.strip_fragment(raw_path);
        self.exchange(pair).await
    }

    async fn recover_from_pending(&mut self, path: RoutePath) -> Screen {
        match self.pending.load() {
            Some(pair) => self.exchange(pair).await,
            None if self.session.is_some() => Screen::Dashboard,
            None if path == RoutePath::ResetPassword => Screen::Error(RouteError::invalid_reset_link()),
            None => Screen::SignIn,
        }
    }

    /// Exchange `pair`, then release the holding area either way.
    async fn exchange(&mut self, pair: TokenPair) -> Screen {
        self.set_screen(Screen::Processing(Flow::Recovery));
        let result = self.gateway.exchange_tokens(&pair).await;
        self.pending.clear();
        match result {
            Ok(session) => {
                self.session = Some(session);
                self.exchanged = Some(pair);
                Screen::PasswordRecovery
            }
            Err(e) => {
                leptos::logging::warn!("router: recovery exchange failed: {e}");
                Screen::Error(RouteError::from_link_failure(RouteError::invalid_reset_link(), &e))
            }
        }
    }

    async fn confirm_email(&mut self, code: OneTimeCode, raw_path: &str) -> Screen {
        self.set_screen(Screen::Processing(Flow::Confirmation));
        let result = self.gateway.verify_one_time_code(&code).await;
        // Consumed either way; re-submitting it would only fail.
        self.strip_fragment(raw_path);
        if let Err(e) = result {
            leptos::logging::warn!("router: confirmation failed: {e}");
            return Screen::Error(RouteError::from_link_failure(
                RouteError::invalid_confirmation_link(),
                &e,
            ));
        }
        match self.gateway.current_session().await {
            Ok(session) => self.session = session,
            Err(e) => leptos::logging::warn!("router: session lookup after confirmation failed: {e}"),
        }
        if self.session.is_some() { Screen::Dashboard } else { Screen::SignIn }
    }

    fn set_screen(&mut self, next: Screen) {
        let user = self.session.as_ref().map(|s| s.user.id.clone());
        if self.screen == next && self.observed_user == user {
            return;
        }
        if self.screen != next {
            leptos::logging::log!("router: {} -> {}", self.screen.name(), next.name());
            self.screen = next;
        }
        self.observed_user = user;
        if let Some(observer) = &self.observer {
            observer(&self.screen, self.session.as_ref());
        }
    }

    fn clear_recovery(&mut self) {
        self.exchanged = None;
        self.pending.clear();
    }

    /// Drop the fragment, keeping the path. No-op without a fragment.
    fn strip_fragment(&self, raw_path: &str) {
        if !self.location.fragment().is_empty() {
            self.location.replace(raw_path);
        }
    }

    /// Go back to `/` with no fragment. No-op when already there.
    fn reset_url(&self) {
        let at_root = self.location.path().trim_end_matches('/').is_empty();
        if !at_root || !self.location.fragment().is_empty() {
            self.location.replace(RoutePath::Root.as_str());
        }
    }
}
