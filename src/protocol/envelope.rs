//! Hook envelope types.
//!
//! The host runtime invokes each hook binary with one JSON object on stdin.
//! Only a couple of fields matter to the gates; everything else is ignored.
//!
//! PreToolUse stdin:
//! {
//!   "session_id": "...",
//!   "cwd": "/project/path",
//!   "hook_event_name": "PreToolUse",
//!   "tool_name": "Bash",
//!   "tool_input": { "command": "git push --force" }
//! }
//!
//! Stop stdin:
//! {
//!   "session_id": "...",
//!   "cwd": "/project/path",
//!   "hook_event_name": "Stop",
//!   "stop_hook_active": false
//! }

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("failed to read hook input: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse hook input: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Input to the command gate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreToolUseInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cwd: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hook_event_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: serde_json::Value,
}

impl PreToolUseInput {
    /// The shell command under review. Missing, empty, or non-string
    /// commands yield None.
    pub fn command(&self) -> Option<&str> {
        self.tool_input
            .get("command")
            .and_then(|v| v.as_str())
            .filter(|c| !c.is_empty())
    }
}

/// Input to the session gate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cwd: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hook_event_name: Option<String>,
    #[serde(default)]
    pub stop_hook_active: serde_json::Value,
}

impl StopInput {
    /// Only a literal JSON `true` counts as "already ran this turn".
    pub fn already_ran(&self) -> bool {
        self.stop_hook_active == serde_json::Value::Bool(true)
    }

    /// The session's working directory, if given and it exists.
    pub fn workdir(&self) -> Option<PathBuf> {
        existing_dir(self.cwd.as_deref())
    }
}

/// Structured denial written to stdout by the command gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreToolUseOutput {
    pub hook_specific_output: HookSpecificOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    pub permission_decision: String,
    pub permission_decision_reason: String,
}

impl PreToolUseOutput {
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: "PreToolUse".to_string(),
                permission_decision: "deny".to_string(),
                permission_decision_reason: reason.into(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, EnvelopeError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Read and parse one envelope from `reader`.
pub fn read_envelope<T: DeserializeOwned>(mut reader: impl Read) -> Result<T, EnvelopeError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_envelope(&input)
}

pub fn parse_envelope<T: DeserializeOwned>(input: &str) -> Result<T, EnvelopeError> {
    Ok(serde_json::from_str(input)?)
}

/// Informational string fields: a value of the wrong type reads as absent
/// instead of failing the whole envelope.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn existing_dir(path: Option<&str>) -> Option<PathBuf> {
    path.filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .filter(|p| p.is_dir())
}
