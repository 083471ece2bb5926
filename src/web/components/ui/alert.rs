//! Alert banners for success and error notices. Messages must be safe to render
//! and should never include passwords.

use crate::workflow::copy::{Notice, NoticeKind};
use leptos::prelude::*;

/// Renders a styled alert banner with a bold title.
#[component]
pub fn Alert(notice: Notice) -> impl IntoView {
    let class = match notice.kind {
        NoticeKind::Error => {
            "rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-700 dark:border-red-400 dark:bg-red-900/30 dark:text-red-200"
        }
        NoticeKind::Success => {
            "rounded-lg border border-emerald-200 bg-emerald-50 px-4 py-3 text-sm text-emerald-700 dark:border-emerald-400 dark:bg-emerald-900/30 dark:text-emerald-200"
        }
    };

    view! {
        <div class=class role="alert">
            <p class="font-semibold">{notice.title}</p>
            <p>{notice.message}</p>
        </div>
    }
}
