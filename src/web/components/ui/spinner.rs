use leptos::prelude::*;

/// Thin indeterminate bar pinned to the top of the page while a lookup runs.
#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div
            class="fixed inset-x-0 top-0 h-1 animate-pulse bg-blue-600"
            role="status"
            aria-live="polite"
            aria-label="Loading"
        ></div>
    }
}
