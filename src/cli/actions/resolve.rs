use crate::{
    cli::globals::GlobalArgs,
    link::Alias,
    native::{
        terminal::{LinePasswords, StdoutNavigator, TerminalPresenter},
        AliasResolver, Outcome,
    },
};
use anyhow::{anyhow, Context, Result};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub alias: Alias,
}

/// Resolve an alias on the terminal, printing the destination on success.
/// # Errors
/// Returns an error when the link does not exist, the prompt is abandoned, or
/// the client cannot be configured.
pub async fn execute(args: Args) -> Result<()> {
    let client = args.globals.client().context("invalid client configuration")?;
    let resolver = AliasResolver::new(client, StdoutNavigator, args.globals.redirect_delay);
    let mut passwords = LinePasswords::stdin();
    let mut presenter = TerminalPresenter::new(std::io::stderr(), args.globals.home_url());

    debug!(alias = %args.alias, base_url = %args.globals.base_url, "resolving alias");

    let outcome = resolver
        .run_local(
            args.alias.clone(),
            &mut passwords,
            &mut presenter,
            args.globals.timeout,
        )
        .await
        .context("failed to resolve alias")?;

    match outcome {
        Outcome::Redirected { .. } => Ok(()),
        Outcome::NotFound => Err(anyhow!("link not found: {}", args.alias)),
        Outcome::Abandoned => Err(anyhow!("no password supplied for: {}", args.alias)),
    }
}
