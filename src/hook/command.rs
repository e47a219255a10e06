//! gitguard-command-hook — Claude Code PreToolUse hook.
//!
//! Called before every tool use. Reads the tool call JSON from stdin and
//! runs the command gate over `tool_input.command`:
//!   - allowed: exit 0, no output
//!   - denied:  exit 0, deny decision JSON on stdout
//!
//! Anything that goes wrong (unreadable stdin, bad JSON, no command) is an
//! allow. The hook must never wedge the agent.

use gitguard::gate::CommandGate;
use gitguard::protocol::envelope::{read_envelope, PreToolUseInput, PreToolUseOutput};
use gitguard::utils::logging::init_hook_logging;
use std::io::Write;
use std::process;

fn main() {
    init_hook_logging();

    let input: PreToolUseInput = match read_envelope(std::io::stdin().lock()) {
        Ok(i) => i,
        Err(e) => {
            // Fail open
            tracing::warn!("{}", e);
            process::exit(0);
        }
    };

    let command = match input.command() {
        Some(c) => c,
        None => process::exit(0),
    };

    tracing::debug!(
        session = input.session_id.as_deref().unwrap_or("-"),
        event = input.hook_event_name.as_deref().unwrap_or("-"),
        tool = input.tool_name.as_deref().unwrap_or("-"),
        command,
        "checking command"
    );

    let verdict = CommandGate::global().evaluate(command);
    if let Some(reason) = verdict.reason() {
        match PreToolUseOutput::deny(reason).to_json() {
            Ok(json) => {
                let mut stdout = std::io::stdout().lock();
                let _ = stdout.write_all(json.as_bytes());
                let _ = stdout.flush();
            }
            Err(e) => tracing::warn!("{}", e),
        }
    }

    process::exit(0);
}
