//! gitguard — git workflow guardrails for AI coding agents.
//!
//! The hooks do the real work at agent runtime; this binary is for humans:
//!   gitguard install              # wire both hooks into Claude Code
//!   gitguard check <command>      # would this command be blocked?
//!   gitguard stop-check           # would the agent be allowed to stop here?
//!   gitguard rules                # what gets blocked, in which order

use clap::{Parser, Subcommand};
use colored::Colorize;
use gitguard::cli;
use gitguard::utils::logging::init_cli_logging;
use std::path::PathBuf;

/// Keeps your AI agent from wrecking your git history.
#[derive(Parser)]
#[command(
    name = "gitguard",
    version,
    about = "Git workflow guardrails for AI coding agents",
    long_about = "gitguard blocks dangerous git commands before they run and keeps\n\
                  the agent working until its branch is committed, pushed, and has a PR.\n\n\
                  Quick start:\n  \
                  gitguard install          # install the hooks\n  \
                  gitguard check -- git push --force\n  \
                  gitguard stop-check"
)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true, env = "GITGUARD_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the command gate over a shell command
    Check {
        /// The command to check (quote it, or pass after `--`)
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Run the stop gate against a repository
    StopCheck {
        /// Repository directory (defaults to the current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Pretend the stop gate already ran this turn
        #[arg(long)]
        already_ran: bool,
    },

    /// List the blocked command patterns in precedence order
    Rules,

    /// Install both hooks into Claude Code settings
    Install {
        /// Settings file to update (defaults to ~/.claude/settings.json)
        #[arg(short, long, conflicts_with = "project")]
        settings: Option<PathBuf>,

        /// Install into ./.claude/settings.json instead of the user settings
        #[arg(short, long)]
        project: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_cli_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check { command } => cli::check::run_check(&command.join(" ")),
        Commands::StopCheck { dir, already_ran } => {
            cli::stop_check::run_stop_check(dir.as_deref(), already_ran)
        }
        Commands::Rules => {
            cli::rules::run_rules();
            Ok(cli::ExitStatus::Success)
        }
        Commands::Install { settings, project } => {
            cli::install::run_install(settings.as_deref(), project)
        }
    };

    match result {
        Ok(status) => std::process::exit(status.code()),
        Err(e) => {
            eprintln!();
            eprintln!("  {} {}", "✗".red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  {} {}", "caused by:".dimmed(), cause);
            }
            eprintln!();
            std::process::exit(1);
        }
    }
}
