//! Alias landing page. The workflow lives in a signal; commands it returns run
//! as local tasks, and the redirect timer is owned by a local `StoredValue`
//! that is cancelled when the page is torn down.

use super::not_found::LinkNotFound;
use crate::{
    link::{Alias, DetailsLoader, HitRecorder},
    web::{
        api::WebClient,
        components::{Alert, AppShell, Button, Spinner},
        config::AppConfig,
        platform::{BrowserTimer, WindowNavigator},
    },
    workflow::{copy, Command, RedirectScheduler, Screen, Workflow},
};
use leptos::{ev::SubmitEvent, prelude::*, task::spawn_local};
use leptos_router::hooks::use_params_map;
use secrecy::SecretString;

type Scheduler = RedirectScheduler<BrowserTimer, WindowNavigator>;

/// Executes workflow commands against the browser.
#[derive(Clone)]
struct Driver {
    workflow: RwSignal<Workflow>,
    scheduler: StoredValue<Scheduler, LocalStorage>,
    client: WebClient,
}

impl Driver {
    fn execute(&self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            match command {
                Command::Lookup(ticket) => {
                    let driver = self.clone();
                    spawn_local(async move {
                        let result = DetailsLoader::new(driver.client.clone())
                            .lookup(&ticket.request)
                            .await;
                        // `None` once the page is gone.
                        let next = driver
                            .workflow
                            .try_update(|workflow| workflow.complete(ticket.sequence, result))
                            .unwrap_or_default();
                        driver.execute(next);
                    });
                }
                Command::RecordHit(hit) => HitRecorder::new(self.client.clone()).record(hit),
                Command::ScheduleRedirect { destination, delay } => {
                    self.scheduler.update_value(|scheduler| {
                        scheduler.schedule(&destination, delay);
                    });
                }
            }
        }
    }
}

#[component]
pub fn AliasPage() -> impl IntoView {
    let config = AppConfig::load();
    let home = config.endpoints.home.clone();
    let params = use_params_map();
    let raw_alias = params.with_untracked(|params| params.get("alias").unwrap_or_default());

    let Ok(alias) = Alias::parse(&raw_alias) else {
        return view! {
            <AppShell home_url=home.clone()>
                <LinkNotFound home_url=home />
            </AppShell>
        }
        .into_any();
    };

    let workflow = RwSignal::new(Workflow::new(alias).with_redirect_delay(config.redirect_delay));
    let scheduler = StoredValue::new_local(RedirectScheduler::new(
        BrowserTimer,
        WindowNavigator { workflow },
    ));
    on_cleanup(move || scheduler.update_value(|scheduler| scheduler.cancel()));

    let driver = Driver {
        workflow,
        scheduler,
        client: WebClient::new(&config),
    };
    driver.execute(workflow.try_update(Workflow::start).flatten());

    let password = RwSignal::new(String::new());
    let loading = Signal::derive(move || workflow.with(Workflow::is_loading));
    let leaving = Signal::derive(move || workflow.with(Workflow::navigated));
    let settled = Memo::new(move |_| workflow.with(Workflow::settled_screen));
    let banner = Memo::new(move |_| workflow.with(Workflow::shows_rejection_banner));
    let destination = Memo::new(move |_| {
        workflow.with(|workflow| workflow.redirect_destination().map(str::to_string))
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let secret = SecretString::from(password.get_untracked());
        let commands = workflow
            .try_update(|workflow| workflow.submit_password(secret))
            .flatten();
        driver.execute(commands);
    };

    view! {
        <AppShell home_url=home.clone()>
            <Show when=move || loading.get() || leaving.get()>
                <Spinner />
            </Show>
            <div class="transition-opacity" class:opacity-50=move || loading.get()>
                {move || {
                    destination
                        .get()
                        .map(|url| view! { <Alert notice=copy::redirect_notice(&url) /> })
                }}
                {move || {
                    banner
                        .get()
                        .then(|| view! { <Alert notice=copy::rejected_password_notice() /> })
                }}
                {move || match settled.get() {
                    Some(Screen::NotFound) => {
                        view! { <LinkNotFound home_url=home.clone() /> }.into_any()
                    }
                    Some(Screen::PasswordPrompt { .. }) => {
                        view! {
                            <form class="my-12" on:submit=on_submit.clone()>
                                <p class="text-lg font-bold text-gray-700 dark:text-gray-200 mb-2">
                                    {copy::PASSWORD_PROTECTED.heading}
                                </p>
                                <p class="text-2xl font-bold text-gray-700 dark:text-gray-200 mb-8">
                                    {copy::PASSWORD_PROTECTED.lead}
                                </p>
                                <label
                                    class="block mb-2 text-lg text-gray-700 dark:text-gray-300"
                                    for="link_password"
                                >
                                    {copy::PASSWORD_PROTECTED.hint}
                                </label>
                                <input
                                    id="link_password"
                                    type="password"
                                    class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                                    autocomplete="current-password"
                                    prop:value=move || password.get()
                                    on:input=move |event| password.set(event_target_value(&event))
                                />
                                <div class="mt-6">
                                    <Button button_type="submit" disabled=loading>
                                        "Submit"
                                    </Button>
                                </div>
                            </form>
                        }
                        .into_any()
                    }
                    Some(Screen::Loading | Screen::Redirect { .. }) | None => ().into_any(),
                }}
            </div>
        </AppShell>
    }
    .into_any()
}
