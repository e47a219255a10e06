//! `gitguard check` — run the command gate over a command by hand.

use crate::cli::ExitStatus;
use crate::gate::command::CommandMatch;
use crate::gate::CommandGate;
use anyhow::Result;
use colored::Colorize;

pub fn run_check(command: &str) -> Result<ExitStatus> {
    let gate = CommandGate::global();

    println!();
    println!("  Command: {}", command.cyan());

    let status = match gate.find_match(command) {
        None => {
            println!("  {} Allowed", "✓".green().bold());
            ExitStatus::Success
        }
        Some(m) => {
            println!("  {} Blocked by {}", "✗".red().bold(), describe(&m).bold());
            println!("  {}", m.reason());
            ExitStatus::Blocked
        }
    };
    println!();

    Ok(status)
}

fn describe(m: &CommandMatch) -> String {
    match m {
        CommandMatch::Rule(rule) => format!("rule '{}'", rule.name),
        CommandMatch::ProtectedBranch(branch) => {
            format!("protected branch check ('{}')", branch)
        }
    }
}
