//! Terminal I/O for the `linkr` binary. Page copy goes to stderr so that stdout
//! only ever carries the destination URL.

use super::resolver::{PasswordSource, Presenter};
use crate::{
    error::AppError,
    session::FooterModel,
    workflow::{
        copy::{self, Notice, Panel},
        Screen, Workflow,
    },
};
use secrecy::SecretString;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

/// Reads one password per line. End of input abandons the prompt.
pub struct LinePasswords<R> {
    lines: Lines<BufReader<R>>,
}

impl<R: AsyncRead + Unpin> LinePasswords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }
}

impl LinePasswords<tokio::io::Stdin> {
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin> PasswordSource for LinePasswords<R> {
    async fn read_password(&mut self) -> Result<Option<SecretString>, AppError> {
        eprint!("Password: ");
        if let Err(err) = std::io::stderr().flush() {
            tracing::debug!(error = %err, "failed to flush password prompt");
        }
        let line = self
            .lines
            .next_line()
            .await
            .map_err(|err| AppError::Config(format!("Failed to read password: {err}")))?;
        Ok(line.map(|value| SecretString::from(value.trim_end_matches('\r').to_string())))
    }
}

/// Writes the landing page copy, skipping repeats of the same screen.
pub struct TerminalPresenter<W> {
    out: W,
    home_url: String,
    last: Option<(Screen, bool)>,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, home_url: impl Into<String>) -> Self {
        Self {
            out,
            home_url: home_url.into(),
            last: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_notice(&mut self, notice: &Notice) -> std::io::Result<()> {
        writeln!(self.out, "{}", notice.title)?;
        writeln!(self.out, "{}", notice.message)
    }

    fn write_panel(&mut self, panel: Panel) -> std::io::Result<()> {
        writeln!(self.out, "{}", panel.heading)?;
        writeln!(self.out, "{}", panel.lead)?;
        writeln!(self.out, "{}", panel.hint)
    }

    fn render(&mut self, screen: &Screen, banner: bool) -> std::io::Result<()> {
        match screen {
            Screen::Loading => Ok(()),
            Screen::Redirect { destination } => {
                self.write_notice(&copy::redirect_notice(destination))
            }
            Screen::NotFound => {
                self.write_panel(copy::LINK_NOT_FOUND)?;
                writeln!(self.out, "{}", self.home_url)
            }
            Screen::PasswordPrompt { .. } => {
                if banner {
                    self.write_notice(&copy::rejected_password_notice())?;
                }
                self.write_panel(copy::PASSWORD_PROTECTED)
            }
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, workflow: &Workflow) {
        let current = (workflow.screen(), workflow.shows_rejection_banner());
        if self.last.as_ref() == Some(&current) {
            return;
        }
        if let Err(err) = self.render(&current.0, current.1) {
            tracing::warn!(error = %err, "failed to write to terminal");
        }
        self.last = Some(current);
    }
}

/// Navigates by printing the destination on stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutNavigator;

impl crate::workflow::Navigator for StdoutNavigator {
    fn navigate(&self, destination: &str) {
        println!("{destination}");
    }
}

/// Renders the footer for the session commands.
pub fn write_footer<W: Write>(out: &mut W, footer: Option<&FooterModel>) -> std::io::Result<()> {
    let Some(footer) = footer else {
        return Ok(());
    };
    writeln!(out, "{} {}", footer.caption, footer.username)?;
    let labels: Vec<&str> = footer.actions.iter().map(|action| action.label()).collect();
    writeln!(out, "[{}]", labels.join("] ["))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        link::{Alias, LookupResult},
        session::SessionStatus,
        workflow::Command,
    };

    fn rendered(presenter: TerminalPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    fn sequence(command: Option<Command>) -> u64 {
        match command {
            Some(Command::Lookup(ticket)) => ticket.sequence,
            other => panic!("expected lookup, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn line_passwords_read_until_eof() {
        let mut source = LinePasswords::new(&b"first\r\nsecond\n"[..]);
        let first = source.read_password().await.unwrap().unwrap();
        let second = source.read_password().await.unwrap().unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(&first), "first");
        assert_eq!(secrecy::ExposeSecret::expose_secret(&second), "second");
        assert!(source.read_password().await.unwrap().is_none());
    }

    #[test]
    fn presenter_renders_banner_only_after_rejection() {
        let mut workflow = Workflow::new(Alias::parse("secret").unwrap());
        let mut presenter = TerminalPresenter::new(Vec::new(), "https://lnk.example/linkr");

        let first = sequence(workflow.start());
        presenter.present(&workflow);
        workflow.complete(first, LookupResult::PasswordRequired);
        presenter.present(&workflow);
        presenter.present(&workflow);

        let second = sequence(workflow.submit_password(SecretString::from("x".to_string())));
        workflow.complete(second, LookupResult::PasswordRejected);
        presenter.present(&workflow);

        let output = rendered(presenter);
        assert_eq!(output.matches("PASSWORD PROTECTED LINK").count(), 2);
        assert_eq!(
            output.matches("The submitted password was not correct.").count(),
            1
        );
    }

    #[test]
    fn presenter_renders_not_found_with_home_link() {
        let mut workflow = Workflow::new(Alias::parse("xyz").unwrap());
        let mut presenter = TerminalPresenter::new(Vec::new(), "https://lnk.example/linkr");
        let first = sequence(workflow.start());
        workflow.complete(first, LookupResult::NotFound);
        presenter.present(&workflow);

        let output = rendered(presenter);
        assert!(output.starts_with("LINK NOT FOUND\n"));
        assert!(output.contains("https://lnk.example/linkr"));
    }

    #[test]
    fn footer_renders_username_and_actions() {
        let status = SessionStatus {
            is_logged_in: true,
            username: Some("ada".to_string()),
        };
        let mut out = Vec::new();
        write_footer(&mut out, FooterModel::from_status(&status).as_ref()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "LOGGED IN AS ADA\n[ACCOUNT] [LOGOUT]\n"
        );

        let mut empty = Vec::new();
        write_footer(&mut empty, None).unwrap();
        assert!(empty.is_empty());
    }
}
