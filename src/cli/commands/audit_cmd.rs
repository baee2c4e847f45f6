//! `lockbox audit` — display the audit log.
//!
//! Usage:
//!   lockbox audit               # show last 50 entries
//!   lockbox audit --last 20     # show last 20

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::audit::{AuditEntry, AuditLog};
use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{LockboxError, Result};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize) -> Result<()> {
    let ctx = Context::from_cli(cli)?;
    if !ctx.data_dir.is_dir() {
        return Err(LockboxError::DataDirNotFound(ctx.data_dir));
    }

    let audit = AuditLog::open(&ctx.data_dir)
        .ok_or_else(|| LockboxError::AuditError("failed to open audit database".into()))?;

    let entries = audit.query(last)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);

    Ok(())
}

/// Print audit entries in a formatted table.
pub fn print_audit_table(entries: &[AuditEntry]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Id", "Site", "Details"]);

    for entry in entries {
        let time = entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        let id = entry
            .record_id
            .map_or_else(|| "-".to_string(), |id| id.to_string());

        table.add_row(vec![
            time,
            colorize_operation(&entry.operation),
            id,
            entry.site.clone().unwrap_or_else(|| "-".to_string()),
            entry.details.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }

    println!(
        "{}",
        style(format!("{} audit entries:", entries.len())).bold()
    );
    println!("{table}");
}

/// Colorize operation names for display.
fn colorize_operation(op: &str) -> String {
    match op {
        "init" | "keygen" => style(op).green().to_string(),
        "add" => style(op).blue().to_string(),
        "remove" => style(op).red().to_string(),
        "reveal" => style(op).yellow().to_string(),
        _ => op.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorize_operation_returns_string() {
        assert!(!colorize_operation("init").is_empty());
        assert!(!colorize_operation("reveal").is_empty());
        assert!(!colorize_operation("unknown").is_empty());
    }

    #[test]
    fn audit_empty_returns_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let audit = AuditLog::open(dir.path()).unwrap();
        let entries = audit.query(10).unwrap();
        assert!(entries.is_empty());
    }
}
