//! Command gate — screens a proposed shell command before it runs.
//!
//! Two stages, in this order:
//!
//! 1. The rule table. Rules are evaluated **in order** and the first pattern
//!    that matches anywhere in the command wins. Adding or removing a rule is a
//!    pure data change to [`RULES`].
//! 2. The protected-branch check, only reached when no table rule fired. It is
//!    deliberately *not* a table entry: a push to `main`/`master` matches, but a
//!    diff-range reference to the same remote branch (`origin/main..HEAD`)
//!    vetoes the match. Folding it into the table would lose the veto.
//!
//! Matching is substring-based and case-sensitive. Patterns are compiled once
//! per process.

use crate::gate::types::Verdict;
use regex::Regex;
use std::sync::LazyLock;

/// One entry of the dangerous-command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Short identifier, used in logs and `gitguard rules`.
    pub name: &'static str,
    /// Regex matched against the whole command (unanchored).
    pub pattern: &'static str,
    /// Guidance shown to the agent when the rule fires.
    pub reason: &'static str,
}

/// The dangerous-command table, in precedence order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "force-push",
        // `-f\b` keeps `-f` a standalone flag, not the prefix of a longer word
        pattern: r"git\s+push\s+.*(-f\b|--force)",
        reason: "git push --force is blocked. Force pushing can destroy remote history. Use normal push instead.",
    },
    Rule {
        name: "hard-reset",
        pattern: r"git\s+reset\s+--hard",
        reason: "git reset --hard is blocked. This irreversibly destroys local changes. Use git stash or git reset --soft instead.",
    },
    Rule {
        name: "checkout-discard",
        pattern: r"git\s+checkout\s+--\s*\.",
        reason: "git checkout -- . is blocked. This irreversibly discards all uncommitted changes. Use git stash instead.",
    },
    Rule {
        name: "restore-discard",
        // bare `.` only at end of input, otherwise the full staged+worktree reset
        pattern: r"git\s+restore\s+\.$|git\s+restore\s+--staged\s+--worktree\s+\.",
        reason: "git restore . is blocked. This irreversibly discards all uncommitted changes. Use git stash instead.",
    },
    Rule {
        name: "clean-force",
        // `f` anywhere in a short-flag cluster: -f, -xf, -fd
        pattern: r"git\s+clean\s+-[a-zA-Z]*f",
        reason: "git clean -f is blocked. This irreversibly deletes untracked files.",
    },
    Rule {
        name: "branch-force-delete",
        pattern: r"git\s+branch\s+-D\b",
        reason: "git branch -D is blocked. Use git branch -d (lowercase) for safe branch deletion.",
    },
];

/// Branches that may never be pushed to directly.
pub const PROTECTED_BRANCHES: &[&str] = &["main", "master"];

/// Reason returned by the protected-branch check.
pub const PROTECTED_BRANCH_REASON: &str =
    "Direct push to main/master is blocked. Create a feature branch and use a Pull Request instead.";

static PROTECTED_PUSH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"git\s+push\s+(?:origin\s+)?(main|master)\b")
        .expect("Invalid regex pattern for protected branch push")
});

static DEFAULT_GATE: LazyLock<CommandGate> = LazyLock::new(CommandGate::new);

/// Which stage of the gate matched a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandMatch {
    /// A rule from the table fired.
    Rule(&'static Rule),
    /// A push to the named protected branch, not vetoed.
    ProtectedBranch(&'static str),
}

impl CommandMatch {
    pub fn reason(&self) -> &'static str {
        match self {
            CommandMatch::Rule(rule) => rule.reason,
            CommandMatch::ProtectedBranch(_) => PROTECTED_BRANCH_REASON,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandMatch::Rule(rule) => rule.name,
            CommandMatch::ProtectedBranch(_) => "protected-branch-push",
        }
    }
}

/// A table rule with its compiled pattern.
struct CompiledRule {
    rule: &'static Rule,
    regex: Regex,
}

/// Pre-compiled command gate. Stateless: evaluating the same command always
/// yields the same verdict.
pub struct CommandGate {
    compiled_rules: Vec<CompiledRule>,
}

impl CommandGate {
    /// Compile the built-in table. The patterns are constants, so a failure
    /// here is a programming error rather than a runtime condition.
    pub fn new() -> Self {
        let compiled_rules = RULES
            .iter()
            .map(|rule| CompiledRule {
                rule,
                regex: Regex::new(rule.pattern)
                    .unwrap_or_else(|e| panic!("Invalid pattern for rule {}: {}", rule.name, e)),
            })
            .collect();

        Self { compiled_rules }
    }

    /// The process-wide gate, compiled on first use.
    pub fn global() -> &'static CommandGate {
        &DEFAULT_GATE
    }

    /// Evaluate a candidate command. Empty input has nothing to judge.
    pub fn evaluate(&self, command: &str) -> Verdict {
        match self.find_match(command) {
            Some(m) => {
                tracing::info!(rule = m.name(), "command denied");
                Verdict::deny(m.reason())
            }
            None => Verdict::Allow,
        }
    }

    /// Run both stages and report which one fired, if any.
    pub fn find_match(&self, command: &str) -> Option<CommandMatch> {
        if command.is_empty() {
            return None;
        }

        // Stage 1: first table rule wins
        if let Some(compiled) = self
            .compiled_rules
            .iter()
            .find(|compiled| compiled.regex.is_match(command))
        {
            return Some(CommandMatch::Rule(compiled.rule));
        }

        // Stage 2: protected-branch match, subject to the diff-range veto
        protected_branch_push(command).map(CommandMatch::ProtectedBranch)
    }
}

impl Default for CommandGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a command with the process-wide gate.
pub fn evaluate(command: &str) -> Verdict {
    CommandGate::global().evaluate(command)
}

/// Find a push to a protected branch that is not vetoed by an
/// `origin/<branch>..` range on the same branch.
fn protected_branch_push(command: &str) -> Option<&'static str> {
    PROTECTED_PUSH_REGEX
        .captures_iter(command)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| {
            PROTECTED_BRANCHES
                .iter()
                .copied()
                .find(|branch| *branch == m.as_str())
        })
        .find(|branch| !command.contains(&format!("origin/{}..", branch)))
}
