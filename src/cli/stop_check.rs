//! `gitguard stop-check` — run the session gate against a real repository.
//!
//! Prints which check decided the outcome, including the non-blocking ones,
//! so "why was the agent allowed to stop?" has an answer too.

use crate::cli::ExitStatus;
use crate::gate::SessionGate;
use crate::repo::ShellQuery;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

pub fn run_stop_check(dir: Option<&Path>, already_ran: bool) -> Result<ExitStatus> {
    let query = match dir {
        Some(d) => {
            let d = d
                .canonicalize()
                .with_context(|| format!("Cannot open directory {}", d.display()))?;
            ShellQuery::in_dir(d)
        }
        None => ShellQuery::new(),
    };

    let finding = SessionGate::new(&query).inspect(already_ran);

    println!();
    if let Some(dir) = query.workdir() {
        println!("  Repository: {}", dir.display().to_string().dimmed());
    }
    println!("  Check:      {}", finding.name().cyan());

    let status = if finding.is_blocking() {
        println!("  {} Stop blocked", "✗".red().bold());
        println!("  {}", finding);
        ExitStatus::Blocked
    } else {
        println!("  {} Stop allowed: {}", "✓".green().bold(), finding);
        ExitStatus::Success
    };
    println!();

    Ok(status)
}
