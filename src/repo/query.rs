//! The narrow shell interface the session gate talks through.
//!
//! `run(command)` yields the trimmed stdout of a successful command, or `None`
//! when the command could not be spawned, exited non-zero, or printed
//! something that isn't UTF-8. It never errors: a failed query is simply
//! "no evidence".

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Runs a read-only shell command and captures its trimmed output.
pub trait RepoQuery {
    fn run(&self, command: &str) -> Option<String>;
}

impl<T: RepoQuery + ?Sized> RepoQuery for &T {
    fn run(&self, command: &str) -> Option<String> {
        (**self).run(command)
    }
}

/// Real subprocess execution through `sh -c`.
#[derive(Debug, Clone, Default)]
pub struct ShellQuery {
    /// Working directory for every command (None = inherit the process cwd)
    workdir: Option<PathBuf>,
}

impl ShellQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            workdir: Some(dir.as_ref().to_path_buf()),
        }
    }

    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }
}

impl RepoQuery for ShellQuery {
    fn run(&self, command: &str) -> Option<String> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let output = match cmd.output() {
            Ok(o) => o,
            Err(e) => {
                tracing::debug!(command, error = %e, "query could not be spawned");
                return None;
            }
        };

        if !output.status.success() {
            tracing::debug!(command, code = ?output.status.code(), "query failed");
            return None;
        }

        match String::from_utf8(output.stdout) {
            Ok(stdout) => {
                let trimmed = stdout.trim().to_string();
                tracing::debug!(command, output = %trimmed, "query succeeded");
                Some(trimmed)
            }
            Err(_) => {
                tracing::debug!(command, "query printed non-UTF-8 output");
                None
            }
        }
    }
}

/// In-memory query backend: answers from a fixed table and records every
/// command it was asked, in order. Unknown commands fail (`None`).
#[derive(Debug, Default)]
pub struct ScriptedQuery {
    responses: HashMap<String, Option<String>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// The command succeeds with the given output.
    pub fn ok(mut self, command: impl Into<String>, output: impl Into<String>) -> Self {
        self.responses
            .insert(command.into(), Some(output.into()));
        self
    }

    /// The command fails.
    pub fn fail(mut self, command: impl Into<String>) -> Self {
        self.responses.insert(command.into(), None);
        self
    }

    /// Commands issued so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn was_called(&self, command: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == command)
    }
}

impl RepoQuery for ScriptedQuery {
    fn run(&self, command: &str) -> Option<String> {
        self.calls.borrow_mut().push(command.to_string());
        self.responses.get(command).cloned().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_shell_query_trims_output() {
        let tmp = TempDir::new().unwrap();
        let query = ShellQuery::in_dir(tmp.path());
        assert_eq!(query.run("echo '  hello  '").as_deref(), Some("hello"));
    }

    #[test]
    fn test_shell_query_failure_is_none() {
        let tmp = TempDir::new().unwrap();
        let query = ShellQuery::in_dir(tmp.path());
        assert_eq!(query.run("false"), None);
        assert_eq!(query.run("exit 3"), None);
    }

    #[test]
    fn test_shell_query_empty_success_is_some() {
        let query = ShellQuery::new();
        assert_eq!(query.run("true").as_deref(), Some(""));
    }

    #[test]
    fn test_shell_query_runs_in_workdir() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("marker.txt"), "x").unwrap();
        let query = ShellQuery::in_dir(tmp.path());
        assert_eq!(query.run("ls").as_deref(), Some("marker.txt"));
    }

    #[test]
    fn test_scripted_query_records_calls() {
        let query = ScriptedQuery::new().ok("a", "1").fail("b");
        assert_eq!(query.run("a").as_deref(), Some("1"));
        assert_eq!(query.run("b"), None);
        assert_eq!(query.run("unknown"), None);
        assert_eq!(query.calls(), vec!["a", "b", "unknown"]);
        assert!(query.was_called("b"));
    }
}
