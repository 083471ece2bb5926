//! Not-found copy shared by the route fallback and the alias page.

use crate::web::{components::AppShell, config::AppConfig};
use crate::workflow::copy::{self, LINK_NOT_FOUND};
use leptos::prelude::*;

/// Route fallback for paths that are not an alias.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    let home = AppConfig::load().endpoints.home;

    view! {
        <AppShell home_url=home.clone()>
            <LinkNotFound home_url=home />
        </AppShell>
    }
}

/// Explains that the link does not exist and points to link creation.
#[component]
pub fn LinkNotFound(home_url: String) -> impl IntoView {
    view! {
        <div class="my-12">
            <p class="text-lg font-bold text-gray-700 dark:text-gray-200 mb-2">
                {LINK_NOT_FOUND.heading}
            </p>
            <p class="text-2xl font-bold text-gray-700 dark:text-gray-200 mb-8">
                {LINK_NOT_FOUND.lead}
            </p>
            <p class="text-lg text-gray-700 dark:text-gray-300">
                "Try to "
                <a href=home_url class="text-blue-700 hover:underline dark:text-blue-400">
                    {copy::CREATE_LINK_LABEL}
                </a>
                "."
            </p>
        </div>
    }
}
