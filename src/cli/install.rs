//! `gitguard install` — wire both hooks into a Claude Code settings.json.
//!
//! Merges into whatever is already there; existing hooks are never touched,
//! and running it twice changes nothing.

use crate::cli::ExitStatus;
use crate::utils::paths::{
    find_hook_binary, project_settings_path, user_settings_path, COMMAND_HOOK_BIN, STOP_HOOK_BIN,
};
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::{json, Value};
use std::path::Path;

/// Which hook events were newly added by a merge.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added: Vec<&'static str>,
    pub already_present: Vec<&'static str>,
}

pub fn run_install(settings: Option<&Path>, project: bool) -> Result<ExitStatus> {
    let settings_path = match settings {
        Some(p) => p.to_path_buf(),
        None if project => project_settings_path(&std::env::current_dir()?),
        None => user_settings_path()?,
    };

    let mut doc = read_settings(&settings_path)?;

    let command_hook = find_hook_binary(COMMAND_HOOK_BIN);
    let stop_hook = find_hook_binary(STOP_HOOK_BIN);
    let report = merge_hooks(
        &mut doc,
        &command_hook.to_string_lossy(),
        &stop_hook.to_string_lossy(),
    )?;

    println!();
    for event in &report.already_present {
        println!("  {} {} hook already installed", "✓".green(), event);
    }

    if !report.added.is_empty() {
        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(&doc)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {}", settings_path.display()))?;

        for event in &report.added {
            println!("  {} Installed {} hook", "✓".green(), event);
        }
    }
    println!("    {}", settings_path.display().to_string().dimmed());
    println!();

    Ok(ExitStatus::Success)
}

/// Read settings, or start from `{}` when the file doesn't exist yet.
fn read_settings(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(json!({}));
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Add the PreToolUse (Bash) and Stop hook entries to a settings document.
pub fn merge_hooks(settings: &mut Value, command_hook: &str, stop_hook: &str) -> Result<MergeReport> {
    let hooks = settings
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("settings.json is not an object"))?
        .entry("hooks")
        .or_insert(json!({}))
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("hooks is not an object"))?;

    let mut report = MergeReport::default();
    let entries = [
        ("PreToolUse", Some("Bash"), command_hook, COMMAND_HOOK_BIN),
        ("Stop", None, stop_hook, STOP_HOOK_BIN),
    ];

    for (event, matcher, command, bin_name) in entries {
        let rules = hooks
            .entry(event)
            .or_insert(json!([]))
            .as_array_mut()
            .ok_or_else(|| anyhow::anyhow!("{} is not an array", event))?;

        if rules.iter().any(|rule| references_binary(rule, bin_name)) {
            report.already_present.push(event);
            continue;
        }

        let mut rule = json!({
            "hooks": [{ "type": "command", "command": command }]
        });
        if let (Some(m), Some(obj)) = (matcher, rule.as_object_mut()) {
            obj.insert("matcher".to_string(), json!(m));
        }
        rules.push(rule);
        report.added.push(event);
    }

    Ok(report)
}

fn references_binary(rule: &Value, bin_name: &str) -> bool {
    rule.get("hooks")
        .and_then(|h| h.as_array())
        .map(|hooks| {
            hooks.iter().any(|h| {
                h.get("command")
                    .and_then(|c| c.as_str())
                    .map(|c| c.contains(bin_name))
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false)
}
