use crate::web::{api::WebClient, config::AppConfig, routes::AppRoutes, session::SessionProvider};
use leptos::prelude::*;
use leptos_router::components::Router;

#[component]
pub fn App() -> impl IntoView {
    let client = WebClient::new(&AppConfig::load());

    view! {
        <SessionProvider client=client>
            <Router>
                <AppRoutes />
            </Router>
        </SessionProvider>
    }
}
