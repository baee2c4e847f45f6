//! `lockbox add` — encrypt and store a new credential.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{resolve_key, Cli, Context};
use crate::errors::{LockboxError, Result};

/// Execute the `add` command.
pub fn execute(cli: &Cli, site: &str, username: &str, secret: Option<&str>) -> Result<()> {
    let ctx = Context::from_cli(cli)?;
    let mut engine = ctx.open_engine()?;

    // A key is needed before asking for anything else.
    let key = resolve_key(&ctx)?;

    // Determine the secret from one of three sources.
    let secret_value = if let Some(s) = secret {
        // Source 1: Inline value on the command line.
        output::warning("Secret provided on command line — it may appear in shell history.");
        Zeroizing::new(s.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end().to_string())
    } else {
        // Source 3: Interactive prompt, entered twice.
        let value = dialoguer::Password::new()
            .with_prompt(format!("Secret for {username}@{site}"))
            .with_confirmation("Confirm secret", "Secrets do not match, try again")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| LockboxError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(value)
    };

    let record = engine.add(site, username, &secret_value, &key)?;

    crate::audit::log_audit(&ctx, "add", Some(record.id), Some(&record.site), None);

    output::success(&format!(
        "Added '{}' ({}) as id {} ({} total)",
        record.site,
        record.username,
        record.id,
        engine.len()?
    ));
    output::tip(&format!("Run `lockbox reveal {}` to view the secret.", record.id));

    Ok(())
}
