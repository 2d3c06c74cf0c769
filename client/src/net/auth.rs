//! Auth gateway: the session collaborator consumed by the router and screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Accounts, token issuance, email links and password storage all live on the
//! hosted platform. This module wraps its REST auth endpoints behind
//! `AuthGateway`, caches the session in `localStorage`, and broadcasts
//! session changes to at most the listeners that subscribed.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `ApiError`; nothing here panics. Sign-out clears the
//! local session even when the platform call fails.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use async_trait::async_trait;

use super::error::ApiError;
use super::types::{OneTimeCode, Session, SessionEvent, TokenPair};
use crate::config::AppConfig;
use crate::router::url::Fragment;
use crate::util::storage::{self, StorageArea};

const SESSION_KEY: &str = "roster.session";
/// Refresh this many seconds before the access token expires.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// Operations the router and auth screens need from the auth platform.
///
/// Futures are `!Send`: everything runs on the browser's single event loop.
#[async_trait(?Send)]
pub trait AuthGateway {
    /// Current session, refreshed first if it is about to expire.
    async fn current_session(&self) -> Result<Option<Session>, ApiError>;
    /// Register a session-change listener. Dropping the handle unregisters it.
    fn on_session_change(&self, listener: Box<dyn Fn(SessionEvent)>) -> Subscription;
    async fn exchange_tokens(&self, tokens: &TokenPair) -> Result<Session, ApiError>;
    async fn verify_one_time_code(&self, code: &OneTimeCode) -> Result<(), ApiError>;
    async fn sign_out(&self) -> Result<(), ApiError>;
    async fn update_password(&self, new_password: &str) -> Result<(), ApiError>;
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ApiError>;
    /// Register an account; the platform emails a confirmation link.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), ApiError>;
    /// Email a recovery link pointing at `/reset-password`.
    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError>;
}

#[async_trait(?Send)]
impl<T: AuthGateway + ?Sized> AuthGateway for Rc<T> {
    async fn current_session(&self) -> Result<Option<Session>, ApiError> {
        (**self).current_session().await
    }
    fn on_session_change(&self, listener: Box<dyn Fn(SessionEvent)>) -> Subscription {
        (**self).on_session_change(listener)
    }
    async fn exchange_tokens(&self, tokens: &TokenPair) -> Result<Session, ApiError> {
        (**self).exchange_tokens(tokens).await
    }
    async fn verify_one_time_code(&self, code: &OneTimeCode) -> Result<(), ApiError> {
        (**self).verify_one_time_code(code).await
    }
    async fn sign_out(&self) -> Result<(), ApiError> {
        (**self).sign_out().await
    }
    async fn update_password(&self, new_password: &str) -> Result<(), ApiError> {
        (**self).update_password(new_password).await
    }
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        (**self).sign_in_with_password(email, password).await
    }
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), ApiError> {
        (**self).sign_up(email, password).await
    }
    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        (**self).request_password_reset(email).await
    }
}

// =============================================================
// Session-change broadcasting
// =============================================================

type Listener = Rc<dyn Fn(SessionEvent)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Fan-out of session-change events to registered listeners.
#[derive(Clone, Default)]
pub struct SessionEvents {
    inner: Rc<RefCell<Listeners>>,
}

impl SessionEvents {
    pub fn subscribe(&self, listener: Box<dyn Fn(SessionEvent)>) -> Subscription {
        let id = {
            let mut listeners = self.inner.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Rc::from(listener)));
            id
        };
        let weak: Weak<RefCell<Listeners>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Deliver `event` to every listener in registration order.
    pub fn emit(&self, event: &SessionEvent) {
        // Snapshot first so a listener may unsubscribe while being called.
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(event.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

/// Listener registration handle. Unregisters when dropped.
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A handle with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

// =============================================================
// Link and expiry helpers
// =============================================================

/// How a confirmation link proves ownership of the email address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
    /// PKCE-style link: `token_hash` + `type`.
    TokenHash { kind: String, token_hash: String },
    /// Emailed OTP: `token` + `email` + `type`.
    EmailToken { kind: String, token: String, email: String },
    /// Implicit-flow link that already carries a session.
    Session(TokenPair),
}

/// Interpret a confirmation link fragment.
///
/// # Errors
///
/// Returns `ApiError::Parse` when the fragment carries no usable code.
pub fn parse_verification(code: &OneTimeCode) -> Result<Verification, ApiError> {
    let fragment = Fragment::parse(&code.0);
    let kind = fragment.get("type").unwrap_or("signup").to_owned();
    if let Some(token_hash) = fragment.get("token_hash").filter(|v| !v.is_empty()) {
        return Ok(Verification::TokenHash {
            kind,
            token_hash: token_hash.to_owned(),
        });
    }
    if let (Some(token), Some(email)) = (
        fragment.get("token").filter(|v| !v.is_empty()),
        fragment.get("email").filter(|v| !v.is_empty()),
    ) {
        return Ok(Verification::EmailToken {
            kind,
            token: token.to_owned(),
            email: email.to_owned(),
        });
    }
    if let Some(pair) = fragment.token_pair() {
        return Ok(Verification::Session(pair));
    }
    Err(ApiError::Parse("confirmation link carries no code".to_owned()))
}

/// Whether a session expiring at `expires_at` should be refreshed now.
pub fn needs_refresh(expires_at: Option<i64>, now_secs: i64) -> bool {
    expires_at.is_some_and(|at| at - REFRESH_MARGIN_SECS <= now_secs)
}

/// Seconds to wait before refreshing, or the fallback when expiry is unknown.
pub fn refresh_delay_secs(expires_at: Option<i64>, now_secs: i64) -> u64 {
    const UNKNOWN_EXPIRY_DELAY_SECS: u64 = 50 * 60;
    match expires_at {
        Some(at) => u64::try_from(at - REFRESH_MARGIN_SECS - now_secs).unwrap_or(0),
        None => UNKNOWN_EXPIRY_DELAY_SECS,
    }
}

pub fn now_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0) as i64;
        secs
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .ok()
            .and_then(|d| i64::try_from(d.as_secs()).ok())
            .unwrap_or_default()
    }
}

// =============================================================
// Hosted platform implementation
// =============================================================

/// `AuthGateway` over the platform's `/auth/v1` endpoints.
#[derive(Clone)]
pub struct PlatformAuth {
    config: AppConfig,
    events: SessionEvents,
    session: Rc<RefCell<Option<Session>>>,
}

impl PlatformAuth {
    /// Build the gateway, restoring any session cached by an earlier visit.
    pub fn new(config: AppConfig) -> Self {
        let cached = storage::load_json::<Session>(StorageArea::Local, SESSION_KEY);
        Self::with_session(config, cached)
    }

    pub fn with_session(config: AppConfig, session: Option<Session>) -> Self {
        Self {
            config,
            events: SessionEvents::default(),
            session: Rc::new(RefCell::new(session)),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cached_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    /// Bearer token for data and storage calls.
    pub fn access_token(&self) -> Option<String> {
        self.session.borrow().as_ref().map(|s| s.access_token.clone())
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Store (or clear) the session, persist it, then notify listeners.
    fn set_session(&self, session: Option<Session>, event: Option<SessionEvent>) {
        match &session {
            Some(s) => storage::save_json(StorageArea::Local, SESSION_KEY, s),
            None => storage::remove(StorageArea::Local, SESSION_KEY),
        }
        *self.session.borrow_mut() = session;
        if let Some(event) = event {
            leptos::logging::log!("auth: session event {}", event.name());
            self.events.emit(&event);
        }
    }

    /// Trade the cached refresh token for a new session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NoSession` when nothing is cached, or the platform error.
    pub async fn refresh_session(&self) -> Result<Session, ApiError> {
        let Some(current) = self.cached_session() else {
            return Err(ApiError::NoSession);
        };
        match self.refresh_grant(&current.refresh_token).await {
            Ok(session) => {
                self.set_session(Some(session.clone()), Some(SessionEvent::TokenRefreshed(session.clone())));
                Ok(session)
            }
            Err(err) => {
                if !err.is_transient() {
                    self.set_session(None, Some(SessionEvent::SignedOut));
                }
                Err(err)
            }
        }
    }

    async fn refresh_grant(&self, refresh_token: &str) -> Result<Session, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::http::endpoint(&self.config, "/auth/v1/token?grant_type=refresh_token");
            let builder = super::http::with_auth(gloo_net::http::Request::post(&url), &self.config, None);
            let resp = builder
                .json(&serde_json::json!({ "refresh_token": refresh_token }))
                .map_err(|e| ApiError::Parse(e.to_string()))?
                .send()
                .await
                .map_err(super::http::network)?;
            let body: super::types::TokenResponse = super::http::read_json(resp).await?;
            Ok(body.into_session(now_secs()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = refresh_token;
            Err(ApiError::Unavailable)
        }
    }

    async fn fetch_user(&self, access_token: &str) -> Result<super::types::AuthUser, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::http::endpoint(&self.config, "/auth/v1/user");
            let builder =
                super::http::with_auth(gloo_net::http::Request::get(&url), &self.config, Some(access_token));
            let resp = builder.send().await.map_err(super::http::network)?;
            super::http::read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = access_token;
            Err(ApiError::Unavailable)
        }
    }

    async fn post_verify(&self, body: serde_json::Value) -> Result<Session, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::http::endpoint(&self.config, "/auth/v1/verify");
            let builder = super::http::with_auth(gloo_net::http::Request::post(&url), &self.config, None);
            let resp = builder
                .json(&body)
                .map_err(|e| ApiError::Parse(e.to_string()))?
                .send()
                .await
                .map_err(super::http::network)?;
            let body: super::types::TokenResponse = super::http::read_json(resp).await?;
            Ok(body.into_session(now_secs()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = body;
            Err(ApiError::Unavailable)
        }
    }
}

#[async_trait(?Send)]
impl AuthGateway for PlatformAuth {
    async fn current_session(&self) -> Result<Option<Session>, ApiError> {
        let Some(session) = self.cached_session() else {
            return Ok(None);
        };
        if !needs_refresh(session.expires_at, now_secs()) {
            return Ok(Some(session));
        }
        match self.refresh_session().await {
            Ok(session) => Ok(Some(session)),
            Err(err) if err.is_transient() => Err(err),
            Err(_) => Ok(None),
        }
    }

    fn on_session_change(&self, listener: Box<dyn Fn(SessionEvent)>) -> Subscription {
        self.events.subscribe(listener)
    }

    async fn exchange_tokens(&self, tokens: &TokenPair) -> Result<Session, ApiError> {
        // A still-valid access token only needs its user looked up; an expired
        // one is traded through its refresh token.
        let session = match self.fetch_user(&tokens.access_token).await {
            Ok(user) => Session {
                access_token: tokens.access_token.clone(),
                refresh_token: tokens.refresh_token.clone(),
                expires_at: None,
                user,
            },
            Err(ApiError::Http { status: 401 | 403, .. }) => self.refresh_grant(&tokens.refresh_token).await?,
            Err(err) => return Err(err),
        };
        self.set_session(Some(session.clone()), Some(SessionEvent::SignedIn(session.clone())));
        Ok(session)
    }

    async fn verify_one_time_code(&self, code: &OneTimeCode) -> Result<(), ApiError> {
        let session = match parse_verification(code)? {
            Verification::TokenHash { kind, token_hash } => {
                self.post_verify(serde_json::json!({ "type": kind, "token_hash": token_hash }))
                    .await?
            }
            Verification::EmailToken { kind, token, email } => {
                self.post_verify(serde_json::json!({ "type": kind, "token": token, "email": email }))
                    .await?
            }
            Verification::Session(pair) => return self.exchange_tokens(&pair).await.map(|_| ()),
        };
        self.set_session(Some(session.clone()), Some(SessionEvent::SignedIn(session)));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        let token = self.access_token();
        self.set_session(None, Some(SessionEvent::SignedOut));
        let Some(token) = token else {
            return Ok(());
        };
        #[cfg(feature = "hydrate")]
        {
            let url = super::http::endpoint(&self.config, "/auth/v1/logout");
            let builder = super::http::with_auth(gloo_net::http::Request::post(&url), &self.config, Some(&token));
            let resp = builder.send().await.map_err(super::http::network)?;
            super::http::read_empty(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
            Ok(())
        }
    }

    async fn update_password(&self, new_password: &str) -> Result<(), ApiError> {
        let Some(session) = self.cached_session() else {
            return Err(ApiError::NoSession);
        };
        #[cfg(feature = "hydrate")]
        {
            let url = super::http::endpoint(&self.config, "/auth/v1/user");
            let builder = super::http::with_auth(
                gloo_net::http::Request::put(&url),
                &self.config,
                Some(&session.access_token),
            );
            let resp = builder
                .json(&serde_json::json!({ "password": new_password }))
                .map_err(|e| ApiError::Parse(e.to_string()))?
                .send()
                .await
                .map_err(super::http::network)?;
            let user: super::types::AuthUser = super::http::read_json(resp).await?;
            let session = Session { user, ..session };
            self.set_session(Some(session.clone()), Some(SessionEvent::UserUpdated(session)));
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (new_password, session);
            Err(ApiError::Unavailable)
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::http::endpoint(&self.config, "/auth/v1/token?grant_type=password");
            let builder = super::http::with_auth(gloo_net::http::Request::post(&url), &self.config, None);
            let resp = builder
                .json(&serde_json::json!({ "email": email, "password": password }))
                .map_err(|e| ApiError::Parse(e.to_string()))?
                .send()
                .await
                .map_err(super::http::network)?;
            let body: super::types::TokenResponse = super::http::read_json(resp).await?;
            let session = body.into_session(now_secs());
            self.set_session(Some(session.clone()), Some(SessionEvent::SignedIn(session.clone())));
            Ok(session)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(ApiError::Unavailable)
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let redirect = format!("{}/auth/callback", self.config.redirect_origin());
        let path = format!("/auth/v1/signup?redirect_to={}", super::http::encode_query_value(&redirect));
        #[cfg(feature = "hydrate")]
        {
            let url = super::http::endpoint(&self.config, &path);
            let builder = super::http::with_auth(gloo_net::http::Request::post(&url), &self.config, None);
            let resp = builder
                .json(&serde_json::json!({ "email": email, "password": password }))
                .map_err(|e| ApiError::Parse(e.to_string()))?
                .send()
                .await
                .map_err(super::http::network)?;
            super::http::read_empty(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password, path);
            Err(ApiError::Unavailable)
        }
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let redirect = format!("{}/reset-password", self.config.redirect_origin());
        let path = format!("/auth/v1/recover?redirect_to={}", super::http::encode_query_value(&redirect));
        #[cfg(feature = "hydrate")]
        {
            let url = super::http::endpoint(&self.config, &path);
            let builder = super::http::with_auth(gloo_net::http::Request::post(&url), &self.config, None);
            let resp = builder
                .json(&serde_json::json!({ "email": email }))
                .map_err(|e| ApiError::Parse(e.to_string()))?
                .send()
                .await
                .map_err(super::http::network)?;
            super::http::read_empty(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, path);
            Err(ApiError::Unavailable)
        }
    }
}

/// Keep the session fresh until `alive` is cleared.
///
/// Sleeps until shortly before expiry, refreshes, and repeats. A failed
/// refresh that signs the user out ends the loop after the sign-out event.
#[cfg(feature = "hydrate")]
pub async fn run_refresh_loop(auth: PlatformAuth, alive: std::sync::Arc<std::sync::atomic::AtomicBool>) {
    loop {
        let expires_at = auth.cached_session().and_then(|s| s.expires_at);
        let delay = refresh_delay_secs(expires_at, now_secs()).max(5);
        gloo_timers::future::sleep(std::time::Duration::from_secs(delay)).await;
        if !alive.load(std::sync::atomic::Ordering::Relaxed) {
            break;
        }
        if auth.cached_session().is_none() {
            continue;
        }
        if let Err(e) = auth.refresh_session().await {
            leptos::logging::warn!("auth: session refresh failed: {e}");
        }
    }
}
