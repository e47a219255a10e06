//! Tracing setup for the three binaries.
//!
//! The hooks share stderr with the host runtime (the stop hook's block reason
//! goes there), so they stay silent unless `GITGUARD_LOG` asks otherwise.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the hook log filter, e.g. `GITGUARD_LOG=debug`.
pub const HOOK_LOG_ENV: &str = "GITGUARD_LOG";

/// Logging for hook binaries: off unless `GITGUARD_LOG` is set.
pub fn init_hook_logging() {
    let filter = EnvFilter::try_from_env(HOOK_LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Logging for the operator CLI: warnings by default, `RUST_LOG` to raise it.
pub fn init_cli_logging(verbose: bool) {
    let default_level = if verbose { "gitguard=debug" } else { "gitguard=warn" };
    let filter = EnvFilter::from_default_env().add_directive(
        default_level
            .parse()
            .unwrap_or_else(|_| LevelFilter::WARN.into()),
    );
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
