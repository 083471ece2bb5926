//! Footer with the logged-in username and account/logout actions. Renders
//! nothing without a username.

use super::ui::{Button, ButtonVariant};
use crate::{
    session::{FooterAction, FooterModel},
    web::{platform::assign_location, session::use_session},
};
use leptos::{ev::MouseEvent, prelude::*};

#[component]
pub fn Footer() -> impl IntoView {
    let Some(session) = use_session() else {
        return ().into_any();
    };
    let status = session.status;
    let model = Memo::new(move |_| status.with(FooterModel::from_status));

    view! {
        {move || {
            model
                .get()
                .map(|footer| {
                    let buttons = footer
                        .actions
                        .into_iter()
                        .map(|action| {
                            let session = session.clone();
                            let on_click = Callback::new(move |_: MouseEvent| match action {
                                FooterAction::Account => {
                                    if let Some(target) = action.target(session.endpoints()) {
                                        assign_location(target);
                                    }
                                }
                                FooterAction::Logout => session.logout(),
                            });
                            view! {
                                <Button variant=ButtonVariant::Compact on_click=on_click>
                                    {action.label()}
                                </Button>
                            }
                        })
                        .collect_view();

                    view! {
                        <footer class="bg-gray-800 text-gray-100 px-4 py-3 flex items-center justify-between">
                            <div>
                                <p class="hidden sm:block text-xs text-gray-400">{footer.caption}</p>
                                <span class="text-sm font-bold">{footer.username}</span>
                            </div>
                            <div class="text-right">{buttons}</div>
                        </footer>
                    }
                })
        }}
    }
    .into_any()
}
