//! Locating Claude Code settings files and the installed hook binaries.

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Binary name of the PreToolUse (command gate) hook.
pub const COMMAND_HOOK_BIN: &str = "gitguard-command-hook";

/// Binary name of the Stop (session gate) hook.
pub const STOP_HOOK_BIN: &str = "gitguard-stop-hook";

/// `~/.claude/settings.json`
pub fn user_settings_path() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(home.join(".claude").join("settings.json"))
}

/// `<project>/.claude/settings.json`
pub fn project_settings_path(project_root: &Path) -> PathBuf {
    project_root.join(".claude").join("settings.json")
}

/// Find a hook binary: next to the running executable first, then common
/// install locations, then fall back to a bare name resolved through PATH.
pub fn find_hook_binary(name: &str) -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join(name);
            if candidate.exists() {
                return candidate;
            }
        }
    }

    let mut candidates = vec![
        PathBuf::from("/usr/local/bin").join(name),
        PathBuf::from("/usr/bin").join(name),
    ];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".cargo/bin").join(name));
        candidates.push(home.join(".local/bin").join(name));
    }

    candidates
        .into_iter()
        .find(|p| p.exists())
        .unwrap_or_else(|| PathBuf::from(name))
}
