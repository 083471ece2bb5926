//! Terminal driver for the resolution workflow. It executes the state
//! machine's commands in order, asks a [`PasswordSource`] whenever the prompt
//! is showing, and waits for the redirect timer before reporting the outcome.

use super::timer::TokioTimer;
use crate::{
    error::AppError,
    link::{Alias, DetailsLoader, HitRecorder, LinkApi},
    workflow::{Command, Navigator, RedirectScheduler, Screen, Workflow},
};
use secrecy::SecretString;
use std::{collections::VecDeque, future::Future, rc::Rc, time::Duration};
use tokio::{sync::Notify, task::LocalSet};
use tracing::{debug, info, warn};

/// Supplies passwords for protected links. `None` means the user gave up.
pub trait PasswordSource {
    fn read_password(&mut self) -> impl Future<Output = Result<Option<SecretString>, AppError>>;
}

/// Renders the workflow whenever it changes.
pub trait Presenter {
    fn present(&mut self, workflow: &Workflow);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Redirected { destination: String },
    NotFound,
    Abandoned,
}

/// Wakes the driver once the wrapped navigator ran.
#[derive(Clone)]
struct Signalling<N> {
    inner: N,
    done: Rc<Notify>,
}

impl<N: Navigator> Navigator for Signalling<N> {
    fn navigate(&self, destination: &str) {
        self.inner.navigate(destination);
        self.done.notify_one();
    }
}

pub struct AliasResolver<A, N> {
    loader: DetailsLoader<A>,
    hits: HitRecorder<A>,
    navigator: N,
    redirect_delay: Duration,
}

impl<A, N> AliasResolver<A, N>
where
    A: LinkApi + Clone + 'static,
    N: Navigator + Clone + 'static,
{
    pub fn new(api: A, navigator: N, redirect_delay: Duration) -> Self {
        Self {
            loader: DetailsLoader::new(api.clone()),
            hits: HitRecorder::new(api),
            navigator,
            redirect_delay,
        }
    }

    /// Runs [`Self::run`] on its own `LocalSet`, then gives detached work such
    /// as hit recording up to `drain` to finish before it is dropped.
    ///
    /// # Errors
    /// Returns errors raised by the password source.
    pub async fn run_local<P, R>(
        &self,
        alias: Alias,
        passwords: &mut P,
        presenter: &mut R,
        drain: Duration,
    ) -> Result<Outcome, AppError>
    where
        P: PasswordSource,
        R: Presenter,
    {
        let local = LocalSet::new();
        let outcome = local.run_until(self.run(alias, passwords, presenter)).await;
        if tokio::time::timeout(drain, local).await.is_err() {
            warn!(?drain, "background requests still pending, abandoning them");
        }
        outcome
    }

    /// Runs one workflow instance to a terminal state. Must be called inside a
    /// `LocalSet`; the redirect timer and hit recording run as local tasks.
    ///
    /// # Errors
    /// Returns errors raised by the password source.
    pub async fn run<P, R>(
        &self,
        alias: Alias,
        passwords: &mut P,
        presenter: &mut R,
    ) -> Result<Outcome, AppError>
    where
        P: PasswordSource,
        R: Presenter,
    {
        let navigated = Rc::new(Notify::new());
        let mut redirect = RedirectScheduler::new(
            TokioTimer,
            Signalling {
                inner: self.navigator.clone(),
                done: Rc::clone(&navigated),
            },
        );
        let mut workflow = Workflow::new(alias).with_redirect_delay(self.redirect_delay);
        let mut queue: VecDeque<Command> = workflow.start().into_iter().collect();

        loop {
            while let Some(command) = queue.pop_front() {
                match command {
                    Command::Lookup(ticket) => {
                        presenter.present(&workflow);
                        let result = self.loader.lookup(&ticket.request).await;
                        queue.extend(workflow.complete(ticket.sequence, result));
                    }
                    Command::RecordHit(hit) => self.hits.record(hit),
                    Command::ScheduleRedirect { destination, delay } => {
                        redirect.schedule(&destination, delay);
                    }
                }
            }

            presenter.present(&workflow);

            match workflow.screen() {
                Screen::Redirect { destination } => {
                    if !redirect.is_armed() {
                        warn!(alias = %workflow.alias(), %destination, "redirect was never armed");
                        return Ok(Outcome::Abandoned);
                    }
                    navigated.notified().await;
                    workflow.mark_navigated();
                    info!(alias = %workflow.alias(), %destination, "alias resolved");
                    return Ok(Outcome::Redirected { destination });
                }
                Screen::NotFound => return Ok(Outcome::NotFound),
                Screen::PasswordPrompt { .. } => match passwords.read_password().await? {
                    Some(password) => queue.extend(workflow.submit_password(password)),
                    None => {
                        redirect.cancel();
                        return Ok(Outcome::Abandoned);
                    }
                },
                Screen::Loading => {
                    debug!(alias = %workflow.alias(), "no pending command while loading");
                    return Ok(Outcome::Abandoned);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{
        testing::{failure, redirect, FakeLinkApi},
        LinkDetailsResponse,
    };
    use std::cell::RefCell;
    use tokio::time::Instant;

    struct Scripted(VecDeque<&'static str>);

    impl PasswordSource for Scripted {
        async fn read_password(&mut self) -> Result<Option<SecretString>, AppError> {
            Ok(self
                .0
                .pop_front()
                .map(|value| SecretString::from(value.to_string())))
        }
    }

    #[derive(Default)]
    struct Recorder {
        screens: Vec<(Screen, bool)>,
    }

    impl Presenter for Recorder {
        fn present(&mut self, workflow: &Workflow) {
            self.screens
                .push((workflow.screen(), workflow.shows_rejection_banner()));
        }
    }

    fn navigator() -> (Rc<RefCell<Vec<(String, Instant)>>>, impl Navigator + Clone + 'static) {
        let visits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&visits);
        (visits, move |url: &str| {
            sink.borrow_mut().push((url.to_string(), Instant::now()));
        })
    }

    async fn resolve(
        api: FakeLinkApi,
        alias: &str,
        passwords: &[&'static str],
    ) -> (Result<Outcome, AppError>, Recorder, Vec<(String, Instant)>, Instant) {
        let (visits, navigator) = navigator();
        let resolver = AliasResolver::new(api, navigator, Duration::from_millis(1500));
        let mut source = Scripted(passwords.iter().copied().collect());
        let mut recorder = Recorder::default();
        let started = Instant::now();

        let outcome = resolver
            .run_local(
                Alias::parse(alias).unwrap(),
                &mut source,
                &mut recorder,
                Duration::from_secs(10),
            )
            .await;

        let visits = visits.borrow().clone();
        (outcome, recorder, visits, started)
    }

    #[tokio::test(start_paused = true)]
    async fn anonymous_alias_redirects_after_delay_without_hit() {
        let api = FakeLinkApi::with_responses([redirect(1, "https://example.com")]);

        let (outcome, recorder, visits, started) = resolve(api.clone(), "abc", &[]).await;

        assert_eq!(
            outcome.unwrap(),
            Outcome::Redirected {
                destination: "https://example.com".to_string()
            }
        );
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].0, "https://example.com");
        assert!(visits[0].1 - started >= Duration::from_millis(1500));
        assert!(api.hits.borrow().is_empty());
        assert_eq!(
            recorder.screens.first().map(|(screen, _)| screen.clone()),
            Some(Screen::Loading)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_alias_is_not_found_without_redirect() {
        let api = FakeLinkApi::with_responses([failure("failure_nonexistent_link")]);

        let (outcome, recorder, visits, _) = resolve(api, "xyz", &["unused"]).await;

        assert_eq!(outcome.unwrap(), Outcome::NotFound);
        assert!(visits.is_empty());
        assert_eq!(
            recorder.screens.last(),
            Some(&(Screen::NotFound, false))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failure_degrades_to_not_found() {
        let api = FakeLinkApi::with_responses([Err(AppError::Network("offline".to_string()))]);

        let (outcome, _, visits, _) = resolve(api, "abc", &[]).await;

        assert_eq!(outcome.unwrap(), Outcome::NotFound);
        assert!(visits.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn password_retry_loop_records_one_hit() {
        let api = FakeLinkApi::with_responses([
            failure("failure_incorrect_link_password"),
            failure("failure_incorrect_link_password"),
            redirect(77, "https://example.com/private"),
        ]);

        let (outcome, recorder, visits, _) =
            resolve(api.clone(), "secret", &["wrong", "hunter2"]).await;

        assert_eq!(
            outcome.unwrap(),
            Outcome::Redirected {
                destination: "https://example.com/private".to_string()
            }
        );
        assert_eq!(visits.len(), 1);

        let prompts: Vec<bool> = recorder
            .screens
            .iter()
            .filter_map(|(screen, banner)| match screen {
                Screen::PasswordPrompt { first_attempt } => {
                    assert_eq!(*banner, !first_attempt);
                    Some(*first_attempt)
                }
                _ => None,
            })
            .collect();
        assert_eq!(prompts, vec![true, false]);

        assert_eq!(
            api.lookups.borrow().as_slice(),
            &[
                ("secret".to_string(), None),
                ("secret".to_string(), Some("wrong".to_string())),
                ("secret".to_string(), Some("hunter2".to_string())),
            ]
        );
        assert_eq!(
            api.hits.borrow().as_slice(),
            &[(77, Some("hunter2".to_string()))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn closed_password_source_abandons() {
        let api = FakeLinkApi::with_responses([failure("failure_incorrect_link_password")]);

        let (outcome, _, visits, _) = resolve(api.clone(), "secret", &[]).await;

        assert_eq!(outcome.unwrap(), Outcome::Abandoned);
        assert!(visits.is_empty());
        assert!(api.hits.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_hit_completes_before_returning() {
        let api = FakeLinkApi {
            hit_latency: Duration::from_millis(2000),
            ..FakeLinkApi::with_responses([
                failure("failure_incorrect_link_password"),
                redirect(77, "https://example.com/private"),
            ])
        };

        let (outcome, _, visits, _) = resolve(api.clone(), "secret", &["hunter2"]).await;

        assert!(matches!(outcome.unwrap(), Outcome::Redirected { .. }));
        assert_eq!(visits.len(), 1);
        assert_eq!(api.hits.borrow().len(), 1);
        assert_eq!(api.hits_completed.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn destination_wins_over_failure_code() {
        let body = |link_id: i64| -> Result<LinkDetailsResponse, AppError> {
            serde_json::from_value(serde_json::json!({
                "success": false,
                "failure": "failure_incorrect_link_password",
                "details": {"link_id": link_id, "outgoing_url": "https://example.com/mixed"}
            }))
            .map_err(|err| AppError::Parse(err.to_string()))
        };
        let api = FakeLinkApi::with_responses([
            failure("failure_incorrect_link_password"),
            body(5),
        ]);

        let (outcome, recorder, visits, _) = resolve(api.clone(), "mixed", &["hunter2"]).await;

        assert_eq!(
            outcome.unwrap(),
            Outcome::Redirected {
                destination: "https://example.com/mixed".to_string()
            }
        );
        assert_eq!(visits.len(), 1);
        assert_eq!(
            api.hits.borrow().as_slice(),
            &[(5, Some("hunter2".to_string()))]
        );
        assert!(!recorder
            .screens
            .iter()
            .any(|(screen, _)| *screen == Screen::NotFound));

        let anonymous = FakeLinkApi::with_responses([body(6)]);
        let (outcome, _, visits, _) = resolve(anonymous.clone(), "mixed", &[]).await;
        assert!(matches!(outcome.unwrap(), Outcome::Redirected { .. }));
        assert_eq!(visits.len(), 1);
        assert!(anonymous.hits.borrow().is_empty());
    }
}
