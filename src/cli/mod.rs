//! CLI module — Clap argument parser, output helpers, and command implementations.
//!
//! This is a thin presentation layer: every command goes through
//! `VaultEngine` and never touches the store or the cipher directly.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::keyfile;
use crate::errors::{LockboxError, Result};
use crate::vault::VaultEngine;

/// Environment variable checked first for the vault key.
pub const KEY_ENV: &str = "LOCKBOX_KEY";

/// Lockbox CLI: local encrypted credential vault.
#[derive(Parser)]
#[command(name = "lockbox", about = "Local encrypted credential vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (default: .lockbox, or `data_dir` in .lockbox.toml)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Path to the key file (default: <data_dir>/secret_key.skf)
    #[arg(long, global = true)]
    pub key_file: Option<String>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create the data directory, database, and key file
    Init {
        /// Do not generate a key file
        #[arg(long)]
        no_key_file: bool,
    },

    /// Generate a new random key
    Keygen {
        /// Write the key to this file instead of printing it
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Add a credential
    Add {
        /// Site, address, or app name
        site: String,
        /// Username for the site
        username: String,
        /// Secret value (omit for interactive prompt)
        secret: Option<String>,
    },

    /// List stored credentials (secrets stay encrypted)
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Decrypt and show a credential's secret
    Reveal {
        /// Record id (see `lockbox list`)
        id: i64,
        /// Copy to the clipboard instead of printing
        #[arg(short, long)]
        copy: bool,
    },

    /// Remove a credential
    Remove {
        /// Record id
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Show version
    Version,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolved locations for one invocation.
pub struct Context {
    pub settings: Settings,
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub key_path: PathBuf,
}

impl Context {
    /// Load `.lockbox.toml` from the working directory and apply the
    /// CLI overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let mut settings = Settings::load(&cwd)?;

        if let Some(dir) = &cli.data_dir {
            settings.data_dir = dir.clone();
        }

        let data_dir = settings.data_path(&cwd);
        let db_path = settings.db_path(&cwd);
        let key_path = match &cli.key_file {
            Some(path) => cwd.join(path),
            None => settings.key_path(&cwd),
        };

        Ok(Self {
            settings,
            data_dir,
            db_path,
            key_path,
        })
    }

    /// Open the vault engine.  The data directory must already exist.
    pub fn open_engine(&self) -> Result<VaultEngine> {
        if !self.data_dir.is_dir() {
            return Err(LockboxError::DataDirNotFound(self.data_dir.clone()));
        }
        VaultEngine::open(&self.db_path)
    }
}

/// Get the vault key, trying in order:
/// 1. `LOCKBOX_KEY` env var
/// 2. The key file, if it exists
/// 3. Interactive prompt
///
/// Returns `Zeroizing<String>` so the key is wiped from memory on drop.
pub fn resolve_key(ctx: &Context) -> Result<Zeroizing<String>> {
    if let Ok(key) = std::env::var(KEY_ENV) {
        if !key.trim().is_empty() {
            return Ok(Zeroizing::new(key.trim().to_string()));
        }
    }

    if ctx.key_path.exists() {
        return keyfile::read_key_file(&ctx.key_path);
    }

    let key = dialoguer::Password::new()
        .with_prompt("Enter vault key")
        .interact()
        .map_err(|e| LockboxError::CommandFailed(format!("key prompt: {e}")))?;
    let key = Zeroizing::new(key);

    if key.trim().is_empty() {
        return Err(LockboxError::CommandFailed(
            "a key is required — run `lockbox keygen` to create one".into(),
        ));
    }
    Ok(key)
}
