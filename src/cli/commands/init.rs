//! `lockbox init` — create the data directory, database, and key file.

use std::fs;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::crypto::{generate_key, keyfile};
use crate::errors::Result;
use crate::vault::VaultEngine;

/// Execute the `init` command.
pub fn execute(cli: &Cli, no_key_file: bool) -> Result<()> {
    let ctx = Context::from_cli(cli)?;

    // 1. Create the data directory if it doesn't exist.
    if !ctx.data_dir.exists() {
        fs::create_dir_all(&ctx.data_dir)?;
        output::info(&format!(
            "Created data directory: {}",
            ctx.data_dir.display()
        ));
    }

    // 2. Open the database; this creates the record table if needed.
    let engine = VaultEngine::open(&ctx.db_path)?;
    output::success(&format!(
        "Vault ready at {} ({} credential(s))",
        ctx.db_path.display(),
        engine.len()?
    ));

    // 3. Generate a key file unless one exists or the user opted out.
    if no_key_file {
        output::tip("No key file written. Run `lockbox keygen` and keep the key safe.");
    } else if ctx.key_path.exists() {
        output::info(&format!("Using existing key file {}", ctx.key_path.display()));
    } else {
        let key = generate_key();
        keyfile::write_key_file(&ctx.key_path, &key)?;
        output::success(&format!("Key written to {}", ctx.key_path.display()));
        output::warning("Back up this key file. Secrets cannot be decrypted without it.");
    }

    // 4. Audit log.
    crate::audit::log_audit(&ctx, "init", None, None, Some("vault initialized"));

    // 5. Show helpful tips.
    output::tip("Run `lockbox add <SITE> <USERNAME>` to add a credential.");
    output::tip("Run `lockbox list` to see all credentials.");

    Ok(())
}
