//! In-memory auth gateway for router tests.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use crate::net::auth::{AuthGateway, SessionEvents, Subscription};
use crate::net::error::ApiError;
use crate::net::types::{AuthUser, OneTimeCode, Session, SessionEvent, TokenPair};

pub fn session_for(user_id: &str) -> Session {
    Session {
        access_token: format!("{user_id}-access"),
        refresh_token: format!("{user_id}-refresh"),
        expires_at: None,
        user: AuthUser {
            id: user_id.to_owned(),
            email: Some(format!("{user_id}@dojo.test")),
        },
    }
}

#[derive(Default)]
struct FakeState {
    session: Option<Session>,
    exchange_calls: Vec<TokenPair>,
    verify_calls: Vec<OneTimeCode>,
    sign_out_calls: usize,
    reject_exchange: Option<ApiError>,
    reject_verify: Option<ApiError>,
    /// Exchanges are recorded but never complete.
    stall_exchange: bool,
    /// Mimic the platform: a used pair cannot be exchanged twice.
    consumed: Vec<TokenPair>,
}

/// Scriptable gateway. Clones share state and listeners.
#[derive(Clone, Default)]
pub struct FakeAuth {
    state: Rc<RefCell<FakeState>>,
    events: SessionEvents,
}

impl FakeAuth {
    pub fn signed_in(user_id: &str) -> Self {
        let fake = Self::default();
        fake.state.borrow_mut().session = Some(session_for(user_id));
        fake
    }

    pub fn reject_exchange(&self, err: ApiError) {
        self.state.borrow_mut().reject_exchange = Some(err);
    }

    pub fn stall_exchange(&self, stall: bool) {
        self.state.borrow_mut().stall_exchange = stall;
    }

    pub fn reject_verify(&self, err: ApiError) {
        self.state.borrow_mut().reject_verify = Some(err);
    }

    pub fn exchange_calls(&self) -> Vec<TokenPair> {
        self.state.borrow().exchange_calls.clone()
    }

    pub fn verify_calls(&self) -> usize {
        self.state.borrow().verify_calls.len()
    }

    pub fn sign_out_calls(&self) -> usize {
        self.state.borrow().sign_out_calls
    }

    pub fn has_session(&self) -> bool {
        self.state.borrow().session.is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.events.listener_count()
    }

    /// Emit an event as the platform would.
    pub fn emit(&self, event: &SessionEvent) {
        self.state.borrow_mut().session = event.session().cloned();
        self.events.emit(event);
    }
}

#[async_trait(?Send)]
impl AuthGateway for FakeAuth {
    async fn current_session(&self) -> Result<Option<Session>, ApiError> {
        Ok(self.state.borrow().session.clone())
    }

    fn on_session_change(&self, listener: Box<dyn Fn(SessionEvent)>) -> Subscription {
        self.events.subscribe(listener)
    }

    async fn exchange_tokens(&self, tokens: &TokenPair) -> Result<Session, ApiError> {
        let stalled = {
            let mut state = self.state.borrow_mut();
            state.exchange_calls.push(tokens.clone());
            state.stall_exchange
        };
        if stalled {
            futures::future::pending::<()>().await;
        }
        let outcome = {
            let mut state = self.state.borrow_mut();
            if let Some(err) = state.reject_exchange.clone() {
                Err(err)
            } else if state.consumed.contains(tokens) {
                Err(ApiError::Http { status: 401, message: "token already used".to_owned() })
            } else {
                state.consumed.push(tokens.clone());
                let session = session_for("recovering");
                state.session = Some(session.clone());
                Ok(session)
            }
        };
        if let Ok(session) = &outcome {
            self.events.emit(&SessionEvent::SignedIn(session.clone()));
        }
        outcome
    }

    async fn verify_one_time_code(&self, code: &OneTimeCode) -> Result<(), ApiError> {
        let outcome = {
            let mut state = self.state.borrow_mut();
            state.verify_calls.push(code.clone());
            match state.reject_verify.clone() {
                Some(err) => Err(err),
                None => {
                    state.session = Some(session_for("confirmed"));
                    Ok(())
                }
            }
        };
        if outcome.is_ok() {
            self.events.emit(&SessionEvent::SignedIn(session_for("confirmed")));
        }
        outcome
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        self.state.borrow_mut().sign_out_calls += 1;
        self.emit(&SessionEvent::SignedOut);
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> Result<(), ApiError> {
        let session = self.state.borrow().session.clone().ok_or(ApiError::NoSession)?;
        if new_password.len() < 6 {
            return Err(ApiError::Http { status: 422, message: "weak password".to_owned() });
        }
        self.emit(&SessionEvent::UserUpdated(session));
        Ok(())
    }

    async fn sign_in_with_password(&self, email: &str, _password: &str) -> Result<Session, ApiError> {
        let session = session_for(email.split('@').next().unwrap_or(email));
        self.emit(&SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn request_password_reset(&self, _email: &str) -> Result<(), ApiError> {
        Ok(())
    }
}
