use crate::{
    config::DEFAULT_REDIRECT_DELAY,
    link::{Alias, HitRequest, LookupRequest, LookupResult},
};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Idle,
}

/// What the page shows for the current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Redirect { destination: String },
    NotFound,
    PasswordPrompt { first_attempt: bool },
}

/// A lookup to run, tagged with the sequence number its result must carry back.
#[derive(Debug)]
pub struct Ticket {
    pub sequence: u64,
    pub request: LookupRequest,
}

/// Side effects requested by the state machine. Drivers execute them in order.
#[derive(Debug)]
pub enum Command {
    Lookup(Ticket),
    RecordHit(HitRequest),
    ScheduleRedirect {
        destination: String,
        delay: Duration,
    },
}

#[derive(Debug)]
struct InFlight {
    sequence: u64,
    password: Option<SecretString>,
}

/// State of one alias resolution, from mount to navigation or not-found.
#[derive(Debug)]
pub struct Workflow {
    alias: Alias,
    phase: Phase,
    result: Option<LookupResult>,
    first_attempt: bool,
    sequence: u64,
    in_flight: Option<InFlight>,
    redirect_delay: Duration,
    redirect_armed: bool,
    hit_recorded: bool,
    navigated: bool,
}

impl Workflow {
    #[must_use]
    pub fn new(alias: Alias) -> Self {
        Self {
            alias,
            phase: Phase::Loading,
            result: None,
            first_attempt: true,
            sequence: 0,
            in_flight: None,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            redirect_armed: false,
            hit_recorded: false,
            navigated: false,
        }
    }

    #[must_use]
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Issues the password-less lookup. Only the first call has an effect.
    pub fn start(&mut self) -> Option<Command> {
        if self.sequence != 0 {
            return None;
        }
        Some(self.issue(None))
    }

    /// Resubmits the lookup with a password. A no-op unless the password
    /// prompt is showing and no lookup is pending.
    pub fn submit_password(&mut self, password: SecretString) -> Option<Command> {
        let prompting = self
            .result
            .as_ref()
            .is_some_and(LookupResult::needs_password);
        if self.phase == Phase::Loading || !prompting {
            debug!(alias = %self.alias, phase = ?self.phase, "password submission ignored");
            return None;
        }
        Some(self.issue(Some(password)))
    }

    /// Applies a lookup result. Results for anything but the latest ticket are dropped.
    pub fn complete(&mut self, sequence: u64, result: LookupResult) -> Vec<Command> {
        let in_flight = match self.in_flight.take() {
            Some(in_flight) if in_flight.sequence == sequence => in_flight,
            other => {
                self.in_flight = other;
                debug!(alias = %self.alias, sequence, latest = self.sequence, "stale lookup result dropped");
                return Vec::new();
            }
        };

        self.phase = Phase::Idle;
        let password_supplied = in_flight.password.is_some();
        let mut commands = Vec::new();

        match &result {
            LookupResult::Redirect {
                link_id,
                destination,
            } => {
                match (in_flight.password, link_id) {
                    (Some(password), Some(link_id)) if !self.hit_recorded => {
                        self.hit_recorded = true;
                        commands.push(Command::RecordHit(HitRequest {
                            link_id: *link_id,
                            password,
                        }));
                    }
                    (Some(_), None) => {
                        debug!(alias = %self.alias, "authenticated redirect without link id, hit skipped");
                    }
                    _ => {}
                }
                if !self.redirect_armed {
                    self.redirect_armed = true;
                    commands.push(Command::ScheduleRedirect {
                        destination: destination.clone(),
                        delay: self.redirect_delay,
                    });
                }
            }
            LookupResult::PasswordRequired | LookupResult::PasswordRejected => {
                self.first_attempt = !password_supplied;
            }
            LookupResult::NotFound | LookupResult::TransportError { .. } => {}
        }

        debug!(alias = %self.alias, sequence, screen = ?self.screen_for(&result), "lookup applied");
        self.result = Some(result);
        commands
    }

    /// Records that the redirect scheduler fired.
    pub fn mark_navigated(&mut self) {
        self.navigated = true;
    }

    #[must_use]
    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    #[must_use]
    pub fn result(&self) -> Option<&LookupResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_first_attempt(&self) -> bool {
        self.first_attempt
    }

    #[must_use]
    pub fn navigated(&self) -> bool {
        self.navigated
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        match (&self.phase, &self.result) {
            (Phase::Loading, _) | (Phase::Idle, None) => Screen::Loading,
            (Phase::Idle, Some(result)) => self.screen_for(result),
        }
    }

    /// The screen of the last applied result, kept visible while a
    /// resubmission is loading.
    #[must_use]
    pub fn settled_screen(&self) -> Option<Screen> {
        self.result.as_ref().map(|result| self.screen_for(result))
    }

    #[must_use]
    pub fn redirect_destination(&self) -> Option<&str> {
        self.result.as_ref().and_then(LookupResult::destination)
    }

    /// The error banner shows on every prompt after a rejected password, never on the first.
    #[must_use]
    pub fn shows_rejection_banner(&self) -> bool {
        matches!(
            self.settled_screen(),
            Some(Screen::PasswordPrompt {
                first_attempt: false
            })
        )
    }

    fn screen_for(&self, result: &LookupResult) -> Screen {
        match result {
            LookupResult::Redirect { destination, .. } => Screen::Redirect {
                destination: destination.clone(),
            },
            LookupResult::NotFound | LookupResult::TransportError { .. } => Screen::NotFound,
            LookupResult::PasswordRequired | LookupResult::PasswordRejected => {
                Screen::PasswordPrompt {
                    first_attempt: self.first_attempt,
                }
            }
        }
    }

    fn issue(&mut self, password: Option<SecretString>) -> Command {
        self.sequence += 1;
        self.phase = Phase::Loading;
        let request_password = password
            .as_ref()
            .map(|secret| SecretString::from(secret.expose_secret().to_string()));
        self.in_flight = Some(InFlight {
            sequence: self.sequence,
            password,
        });
        debug!(alias = %self.alias, sequence = self.sequence, with_password = request_password.is_some(), "lookup issued");
        Command::Lookup(Ticket {
            sequence: self.sequence,
            request: LookupRequest::new(self.alias.clone(), request_password),
        })
    }
}
