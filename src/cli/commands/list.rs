//! `lockbox list` — display all credentials without decrypting them.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{LockboxError, Result};

/// Execute the `list` command.
pub fn execute(cli: &Cli, json: bool) -> Result<()> {
    let ctx = Context::from_cli(cli)?;
    let mut engine = ctx.open_engine()?;

    let mut records = engine.load_all()?;
    // Storage order carries no meaning; show a stable order.
    records.sort_by_key(|r| r.id);

    if json {
        let text = serde_json::to_string_pretty(&records)
            .map_err(|e| LockboxError::SerializationError(format!("JSON encoding: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    output::info(&format!("{} credential(s)", records.len()));
    output::print_records_table(&records);

    Ok(())
}
