//! Page chrome: header with the home link, content container, and footer.

use crate::web::components::Footer;
use leptos::prelude::*;

/// Wraps routes with a header, content container, and the session footer.
#[component]
pub fn AppShell(home_url: String, children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-gray-200 dark:bg-gray-900">
                <div class="max-w-screen-xl flex items-center mx-auto p-4">
                    <a href=home_url class="flex items-center space-x-3">
                        <span class="font-semibold whitespace-nowrap dark:text-white">"Linkr"</span>
                    </a>
                </div>
            </header>
            <main class="flex-1">
                <div class="container mx-auto p-4 mt-6">{children()}</div>
            </main>
            <Footer />
        </div>
    }
}
