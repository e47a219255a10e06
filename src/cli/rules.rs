//! `gitguard rules` — show what the command gate blocks.

use crate::gate::command::{PROTECTED_BRANCHES, PROTECTED_BRANCH_REASON, RULES};
use colored::Colorize;

pub fn run_rules() {
    println!();
    println!("  {}", "Blocked commands (first match wins):".bold());
    println!();
    for (i, rule) in RULES.iter().enumerate() {
        println!("  {}. {}  {}", i + 1, rule.name.cyan(), rule.pattern.dimmed());
        println!("     {}", rule.reason);
    }

    println!();
    println!(
        "  {} {}",
        "Then:".bold(),
        format!(
            "pushes to {} unless an origin/<branch>.. range names the same branch",
            PROTECTED_BRANCHES.join(", ")
        )
        .cyan()
    );
    println!("     {}", PROTECTED_BRANCH_REASON);
    println!();
}
