//! Key material file.
//!
//! A key file is a plain-text file whose first line is a key token.
//! The CLI reads it to avoid prompting; the vault engine itself never
//! touches it and only ever receives the token as a call parameter.

use std::fs;
use std::path::Path;

use zeroize::Zeroizing;

use crate::errors::{LockboxError, Result};

/// Read the key token from the first line of the file at `path`.
pub fn read_key_file(path: &Path) -> Result<Zeroizing<String>> {
    if !path.exists() {
        return Err(LockboxError::KeyfileError(format!(
            "key file not found at {}",
            path.display()
        )));
    }

    let contents = Zeroizing::new(
        fs::read_to_string(path)
            .map_err(|e| LockboxError::KeyfileError(format!("failed to read key file: {e}")))?,
    );

    let first_line = contents.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return Err(LockboxError::KeyfileError(format!(
            "key file at {} is empty",
            path.display()
        )));
    }

    Ok(Zeroizing::new(first_line.to_string()))
}

/// Write `token` to a new key file at `path`.
///
/// Refuses to overwrite an existing file.  The file is written with
/// owner-only permissions on Unix.
pub fn write_key_file(path: &Path, token: &str) -> Result<()> {
    if path.exists() {
        return Err(LockboxError::KeyfileError(format!(
            "key file already exists at {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                LockboxError::KeyfileError(format!("cannot create key file directory: {e}"))
            })?;
        }
    }

    fs::write(path, format!("{token}\n"))
        .map_err(|e| LockboxError::KeyfileError(format!("failed to write key file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, perms).map_err(|e| {
            LockboxError::KeyfileError(format!("failed to set key file permissions: {e}"))
        })?;
    }

    Ok(())
}
