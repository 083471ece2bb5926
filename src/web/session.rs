//! Session context for the footer. The provider fetches the status once on
//! mount and exposes an explicit `refresh`; logout invalidates the session and
//! refreshes. Only the username is kept in memory.

use super::api::WebClient;
use crate::{
    config::Endpoints,
    session::{self, SessionStatus},
};
use leptos::{prelude::*, task::spawn_local};

#[derive(Clone)]
/// Session context shared through Leptos.
pub struct SessionContext {
    pub status: RwSignal<SessionStatus>,
    client: WebClient,
}

impl SessionContext {
    fn new(client: WebClient) -> Self {
        Self {
            status: RwSignal::new(SessionStatus::default()),
            client,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        self.client.endpoints()
    }

    /// Re-reads the status from the server.
    pub fn refresh(&self) {
        let status = self.status;
        let client = self.client.clone();
        spawn_local(async move {
            status.set(session::refresh(&client).await);
        });
    }

    /// Invalidates the session, then refreshes the status.
    pub fn logout(&self) {
        let status = self.status;
        let client = self.client.clone();
        spawn_local(async move {
            match session::logout_and_refresh(&client).await {
                Ok(next) => status.set(next),
                Err(err) => tracing::warn!(error = %err, "logout failed"),
            }
        });
    }
}

/// Provides the session context and hydrates it once on mount.
#[component]
pub fn SessionProvider(client: WebClient, children: Children) -> impl IntoView {
    let context = SessionContext::new(client);
    context.refresh();
    provide_context(context);

    view! { {children()} }
}

/// Returns the session context. Components outside the provider see a
/// logged-out status.
pub fn use_session() -> Option<SessionContext> {
    use_context::<SessionContext>()
}
