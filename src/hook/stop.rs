//! gitguard-stop-hook — Claude Code Stop hook.
//!
//! Called when the agent tries to finish. Checks that the git workflow on
//! the current feature branch is complete (committed, pushed, PR open).
//!   - allow: exit 0, no output
//!   - block: exit 2, reason on stderr (shown to the agent)
//!
//! Bad input or failing tools never block.

use gitguard::gate::SessionGate;
use gitguard::protocol::envelope::{read_envelope, StopInput};
use gitguard::repo::ShellQuery;
use gitguard::utils::logging::init_hook_logging;
use std::io::Write;
use std::process;

/// Exit code that tells the host to keep the agent working.
const BLOCK_EXIT_CODE: i32 = 2;

fn main() {
    init_hook_logging();

    let input: StopInput = match read_envelope(std::io::stdin().lock()) {
        Ok(i) => i,
        Err(e) => {
            tracing::warn!("{}", e);
            process::exit(0);
        }
    };

    let query = match input.workdir() {
        Some(dir) => ShellQuery::in_dir(dir),
        None => ShellQuery::new(),
    };

    tracing::debug!(
        session = input.session_id.as_deref().unwrap_or("-"),
        event = input.hook_event_name.as_deref().unwrap_or("-"),
        workdir = ?query.workdir(),
        "checking stop"
    );

    let verdict = SessionGate::new(&query).evaluate(input.already_ran());
    if let Some(reason) = verdict.reason() {
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(reason.as_bytes());
        let _ = stderr.flush();
        process::exit(BLOCK_EXIT_CODE);
    }

    process::exit(0);
}
