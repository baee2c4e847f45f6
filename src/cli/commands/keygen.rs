//! `lockbox keygen` — generate a fresh random key.
//!
//! The key is printed, or written to a key file with `--output`.
//! Keep it somewhere safe: it is never stored in the database, and
//! secrets encrypted under it cannot be recovered without it.

use std::path::Path;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::crypto::{generate_key, keyfile};
use crate::errors::Result;

/// Execute the `keygen` command.
pub fn execute(cli: &Cli, output_path: Option<&str>) -> Result<()> {
    let key = generate_key();

    match output_path {
        Some(dest) => {
            let ctx = Context::from_cli(cli)?;
            let path = Path::new(dest);
            keyfile::write_key_file(path, &key)?;
            crate::audit::log_audit(&ctx, "keygen", None, None, Some("written to key file"));
            output::success(&format!("Key written to {}", path.display()));
            output::tip("Pass it with --key-file, or set LOCKBOX_KEY.");
        }
        None => {
            println!("{}", key.as_str());
        }
    }

    Ok(())
}
