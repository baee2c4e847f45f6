//! `lockbox completions <SHELL>`: write a completion script to stdout.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    generate(shell, &mut Cli::command(), "lockbox", &mut io::stdout());
    Ok(())
}
