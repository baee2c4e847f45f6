//! `lockbox reveal` — decrypt a credential's secret and print or copy it.

use crate::cli::output;
use crate::cli::{resolve_key, Cli, Context};
use crate::errors::{LockboxError, Result};

/// Execute the `reveal` command.
pub fn execute(cli: &Cli, id: i64, copy: bool) -> Result<()> {
    let ctx = Context::from_cli(cli)?;
    let engine = ctx.open_engine()?;

    // Look the record up first so a missing id is reported before
    // asking for a key.
    let record = engine.get(id)?;
    let key = resolve_key(&ctx)?;
    let secret = engine.reveal_record(&record, &key)?;

    crate::audit::log_audit(&ctx, "reveal", Some(id), Some(&record.site), None);

    if copy {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| LockboxError::CommandFailed(format!("clipboard unavailable: {e}")))?;
        clipboard
            .set_text(secret.as_str())
            .map_err(|e| LockboxError::CommandFailed(format!("clipboard write: {e}")))?;
        output::success(&format!(
            "Secret for '{}' ({}) copied to clipboard",
            record.site, record.username
        ));
    } else {
        println!("{}", secret.as_str());
    }

    Ok(())
}
