//! `lockbox remove` — delete a credential from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{LockboxError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, id: i64, force: bool) -> Result<()> {
    let ctx = Context::from_cli(cli)?;
    let mut engine = ctx.open_engine()?;

    // Removing an absent id is not an error.
    let record = match engine.get(id) {
        Ok(record) => record,
        Err(LockboxError::NotFound(_)) => {
            output::info(&format!("No record with id {id}; nothing to remove."));
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove '{}' ({}) [id {id}]?",
                record.site, record.username
            ))
            .default(false)
            .interact()
            .map_err(|e| LockboxError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    engine.remove(id)?;

    crate::audit::log_audit(&ctx, "remove", Some(id), Some(&record.site), None);
    output::success(&format!("Removed '{}' [id {id}]", record.site));

    Ok(())
}
