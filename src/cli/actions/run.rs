use crate::cli::actions::{resolve, session, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Resolve(args) => resolve::execute(args).await,
        Action::Session(globals) => session::status(globals).await,
        Action::Logout(globals) => session::logout(globals).await,
    }
}
