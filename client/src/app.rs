//! Root component, HTML shell and the session router wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every path (`/`, `/auth/callback`, `/reset-password`) renders `RootView`,
//! which shows whatever `Screen` the session router last published. In the
//! browser the router runs as one local task fed by a FIFO queue; the server
//! render only ever shows `Loading`.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::config::AppConfig;
use crate::net::auth::PlatformAuth;
use crate::pages::auth::AuthPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::recovery::RecoveryPage;
use crate::pages::status::{ErrorScreen, LoadingScreen, ProcessingScreen};
use crate::router::{RouterInput, RouterSender, Screen};
use crate::state::roster::RosterState;
use crate::state::session::SessionState;

/// Browser-side collaborators shared through context.
#[derive(Clone, Copy)]
pub struct Services {
    auth: StoredValue<PlatformAuth, LocalStorage>,
    router: StoredValue<Option<RouterSender>, LocalStorage>,
}

impl Services {
    pub fn new(auth: PlatformAuth) -> Self {
        Self {
            auth: StoredValue::new_local(auth),
            router: StoredValue::new_local(None),
        }
    }

    pub fn auth(&self) -> PlatformAuth {
        self.auth.get_value()
    }

    /// Queue work for the session router. Dropped before the router starts.
    pub fn send(&self, input: RouterInput) {
        let sent = self
            .router
            .with_value(|tx| tx.as_ref().is_some_and(|tx| tx.send(input)));
        if !sent {
            leptos::logging::warn!("router not running; input dropped");
        }
    }

    #[cfg(feature = "hydrate")]
    fn attach_router(&self, tx: RouterSender) {
        self.router.set_value(Some(tx));
    }
}

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <script src="/runtime-config.js"></script>
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::load();
    if !config.is_configured() {
        leptos::logging::warn!("platform backend not configured; auth calls will fail");
    }
    let services = Services::new(PlatformAuth::new(config));
    let session = RwSignal::new(SessionState::default());
    let roster = RwSignal::new(RosterState::default());
    provide_context(services);
    provide_context(session);
    provide_context(roster);

    #[cfg(feature = "hydrate")]
    start_session_router(services, session, roster);

    view! {
        <Title text="Dojo Roster" />
        <Stylesheet id="leptos" href="/pkg/roster.css" />
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <RootView /> }>
                    <Route path=path!("") view=RootView />
                    <Route path=path!("auth/callback") view=RootView />
                    <Route path=path!("reset-password") view=RootView />
                </Routes>
            </main>
        </Router>
    }
}

/// Render the routed screen.
#[component]
fn RootView() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let screen = Memo::new(move |_| session.with(|s| s.screen.clone()));

    move || match screen.get() {
        Screen::Loading => view! { <LoadingScreen /> }.into_any(),
        Screen::Processing(flow) => view! { <ProcessingScreen flow=flow /> }.into_any(),
        Screen::SignIn => view! { <AuthPage /> }.into_any(),
        Screen::Dashboard => view! { <DashboardPage /> }.into_any(),
        Screen::PasswordRecovery => view! { <RecoveryPage /> }.into_any(),
        Screen::Error(error) => view! { <ErrorScreen error=error /> }.into_any(),
    }
}

#[cfg(feature = "hydrate")]
fn start_session_router(services: Services, session: RwSignal<SessionState>, roster: RwSignal<RosterState>) {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::net::types::Session;
    use crate::router::location::BrowserLocation;
    use crate::router::pending::SessionStoragePending;
    use crate::router::{self, SessionRouter};

    let auth = services.auth();
    let (tx, rx) = router::channel();
    services.attach_router(tx.clone());

    let machine = SessionRouter::new(auth.clone(), BrowserLocation, SessionStoragePending).with_observer(
        move |screen: &Screen, current: Option<&Session>| {
            let mut user_changed = false;
            session.update(|s| user_changed = s.apply(screen.clone(), current));
            if current.is_none() || user_changed {
                roster.update(RosterState::reset);
            }
            if user_changed {
                crate::pages::dashboard::load_role(services, session);
            }
        },
    );

    leptos::task::spawn_local(async move {
        router::run(machine, tx, rx).await;
        leptos::logging::log!("router: stopped");
    });

    let refresh_alive = Arc::new(AtomicBool::new(true));
    leptos::task::spawn_local(crate::net::auth::run_refresh_loop(auth, refresh_alive.clone()));

    on_cleanup(move || {
        refresh_alive.store(false, Ordering::Relaxed);
        services.send(RouterInput::Shutdown);
    });
}
