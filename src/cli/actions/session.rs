use crate::{
    cli::globals::GlobalArgs,
    native::terminal::write_footer,
    session::{logout_and_refresh, refresh, FooterModel, SessionStatus},
};
use anyhow::{Context, Result};

/// Print the footer for the current session; prints nothing when logged out.
/// # Errors
/// Returns an error if the client cannot be configured or stdout is closed.
pub async fn status(globals: GlobalArgs) -> Result<()> {
    let client = globals.client().context("invalid client configuration")?;
    let status = refresh(&client).await;
    print_footer(&status)
}

/// Invalidate the session, then print the refreshed footer.
/// # Errors
/// Returns an error if the logout request fails.
pub async fn logout(globals: GlobalArgs) -> Result<()> {
    let client = globals.client().context("invalid client configuration")?;
    let status = logout_and_refresh(&client)
        .await
        .context("failed to log out")?;
    print_footer(&status)
}

fn print_footer(status: &SessionStatus) -> Result<()> {
    let footer = FooterModel::from_status(status);
    let mut stdout = std::io::stdout().lock();
    write_footer(&mut stdout, footer.as_ref()).context("failed to write footer")
}
