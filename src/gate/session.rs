//! Session gate — decides whether the agent may stop working.
//!
//! Checks run in a fixed order and the first one that triggers ends the
//! evaluation:
//!
//! 1. re-entrancy guard (already ran this turn) → allow
//! 2. not inside a git work tree → allow
//! 3. branch unknown, `main`, `master`, or detached → allow
//! 4. staged or unstaged changes → block
//! 5. untracked files → block
//! 6. branch never pushed (with commits) / unpushed commits → block
//! 7. `gh` present and no pull request → block
//! 8. otherwise → allow
//!
//! Queries that fail count as "no evidence" for their check. Only as many
//! queries run as it takes to reach the first finding.

use crate::gate::command::PROTECTED_BRANCHES;
use crate::gate::types::Verdict;
use crate::repo::git::{GitRepo, DETACHED_HEAD, REMOTE};
use crate::repo::query::RepoQuery;
use std::fmt;

/// What the check sequence concluded, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopFinding {
    /// The gate already ran this turn; never block twice.
    AlreadyRan,
    /// Not inside a git work tree.
    NotARepository,
    /// Branch is unknown, protected, or a detached HEAD.
    NotAFeatureBranch { branch: Option<String> },
    UncommittedChanges { branch: String },
    UntrackedFiles { branch: String },
    /// No remote tracking branch, but local commits exist.
    BranchNotPushed { branch: String },
    UnpushedCommits { branch: String },
    NoPullRequest { branch: String },
    /// Every check passed.
    WorkflowComplete { branch: String },
}

impl StopFinding {
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            StopFinding::UncommittedChanges { .. }
                | StopFinding::UntrackedFiles { .. }
                | StopFinding::BranchNotPushed { .. }
                | StopFinding::UnpushedCommits { .. }
                | StopFinding::NoPullRequest { .. }
        )
    }

    /// Short identifier for logs and the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            StopFinding::AlreadyRan => "already-ran",
            StopFinding::NotARepository => "not-a-repository",
            StopFinding::NotAFeatureBranch { .. } => "not-a-feature-branch",
            StopFinding::UncommittedChanges { .. } => "uncommitted-changes",
            StopFinding::UntrackedFiles { .. } => "untracked-files",
            StopFinding::BranchNotPushed { .. } => "branch-not-pushed",
            StopFinding::UnpushedCommits { .. } => "unpushed-commits",
            StopFinding::NoPullRequest { .. } => "no-pull-request",
            StopFinding::WorkflowComplete { .. } => "workflow-complete",
        }
    }

    /// Guidance for the agent; None for non-blocking findings.
    pub fn message(&self) -> Option<String> {
        let msg = match self {
            StopFinding::UncommittedChanges { branch } => format!(
                "There are uncommitted changes on branch '{}'. \
                 Please commit your changes using Conventional Commits format before finishing.",
                branch
            ),
            StopFinding::UntrackedFiles { branch } => format!(
                "There are untracked files on branch '{}'. \
                 Please stage and commit them, or add them to .gitignore, before finishing.",
                branch
            ),
            StopFinding::BranchNotPushed { branch } => format!(
                "Branch '{}' has not been pushed to {}. \
                 Please push with 'git push -u {} {}' and create a Pull Request.",
                branch, REMOTE, REMOTE, branch
            ),
            StopFinding::UnpushedCommits { branch } => format!(
                "There are unpushed commits on branch '{}'. \
                 Please push and create a Pull Request.",
                branch
            ),
            StopFinding::NoPullRequest { branch } => format!(
                "No Pull Request exists for branch '{}'. \
                 Please create a PR with 'gh pr create'.",
                branch
            ),
            _ => return None,
        };
        Some(msg)
    }

    pub fn verdict(&self) -> Verdict {
        match self.message() {
            Some(reason) => Verdict::deny(reason),
            None => Verdict::Allow,
        }
    }
}

impl fmt::Display for StopFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopFinding::AlreadyRan => write!(f, "stop gate already ran this turn"),
            StopFinding::NotARepository => write!(f, "not inside a git repository"),
            StopFinding::NotAFeatureBranch { branch: Some(b) } => {
                write!(f, "'{}' is not a feature branch", b)
            }
            StopFinding::NotAFeatureBranch { branch: None } => {
                write!(f, "current branch could not be determined")
            }
            StopFinding::WorkflowComplete { branch } => {
                write!(f, "git workflow on '{}' is complete", branch)
            }
            blocking => match blocking.message() {
                Some(msg) => write!(f, "{}", msg),
                None => write!(f, "{}", blocking.name()),
            },
        }
    }
}

/// The stop-time workflow check, bound to one way of querying the repository.
pub struct SessionGate<Q> {
    git: GitRepo<Q>,
}

impl<Q: RepoQuery> SessionGate<Q> {
    pub fn new(query: Q) -> Self {
        Self {
            git: GitRepo::new(query),
        }
    }

    pub fn evaluate(&self, already_ran_this_turn: bool) -> Verdict {
        let finding = self.inspect(already_ran_this_turn);
        if finding.is_blocking() {
            tracing::info!(check = finding.name(), "stop blocked");
        } else {
            tracing::debug!(check = finding.name(), "stop allowed");
        }
        finding.verdict()
    }

    /// Run the check sequence and return the first finding.
    pub fn inspect(&self, already_ran_this_turn: bool) -> StopFinding {
        if already_ran_this_turn {
            return StopFinding::AlreadyRan;
        }

        if !self.git.is_inside_work_tree() {
            return StopFinding::NotARepository;
        }

        let branch = match self.git.current_branch() {
            Some(b) if !is_exempt_branch(&b) => b,
            other => return StopFinding::NotAFeatureBranch { branch: other },
        };

        if self.git.has_staged_changes() || self.git.has_unstaged_changes() {
            return StopFinding::UncommittedChanges { branch };
        }

        if self.git.has_untracked_files() {
            return StopFinding::UntrackedFiles { branch };
        }

        if !self.git.remote_branch_exists(&branch) {
            // Nothing committed yet means nothing to push
            if self.git.has_any_commit() {
                return StopFinding::BranchNotPushed { branch };
            }
        } else if self.git.has_unpushed_commits(&branch) {
            return StopFinding::UnpushedCommits { branch };
        }

        if self.git.gh_available() && !self.git.has_pull_request() {
            return StopFinding::NoPullRequest { branch };
        }

        StopFinding::WorkflowComplete { branch }
    }
}

fn is_exempt_branch(branch: &str) -> bool {
    branch == DETACHED_HEAD || PROTECTED_BRANCHES.contains(&branch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::query::ScriptedQuery;

    const INSIDE: &str = "git rev-parse --is-inside-work-tree";
    const BRANCH: &str = "git rev-parse --abbrev-ref HEAD";

    #[test]
    fn test_already_ran_issues_no_queries() {
        let query = ScriptedQuery::new();
        let gate = SessionGate::new(&query);
        assert_eq!(gate.inspect(true), StopFinding::AlreadyRan);
        assert!(query.calls().is_empty());
    }

    #[test]
    fn test_outside_repository_allows() {
        let query = ScriptedQuery::new().fail(INSIDE);
        let gate = SessionGate::new(&query);
        assert_eq!(gate.inspect(false), StopFinding::NotARepository);
        assert_eq!(query.calls(), vec![INSIDE]);
    }

    #[test]
    fn test_detached_head_allows() {
        let query = ScriptedQuery::new().ok(INSIDE, "true").ok(BRANCH, "HEAD");
        let gate = SessionGate::new(&query);
        assert_eq!(
            gate.inspect(false),
            StopFinding::NotAFeatureBranch {
                branch: Some("HEAD".to_string())
            }
        );
    }

    #[test]
    fn test_unknown_branch_allows() {
        let query = ScriptedQuery::new().ok(INSIDE, "true").fail(BRANCH);
        let gate = SessionGate::new(&query);
        assert!(gate.evaluate(false).is_allowed());
    }

    #[test]
    fn test_dirty_tree_stops_before_later_checks() {
        let query = ScriptedQuery::new()
            .ok(INSIDE, "true")
            .ok(BRANCH, "feat/x")
            .fail("git diff --cached --quiet");
        let gate = SessionGate::new(&query);
        assert_eq!(
            gate.inspect(false),
            StopFinding::UncommittedChanges {
                branch: "feat/x".to_string()
            }
        );
        assert!(!query.was_called("git ls-files --others --exclude-standard"));
        assert!(!query.was_called("gh --version"));
    }

    #[test]
    fn test_unpushed_branch_without_commits_falls_through() {
        let query = ScriptedQuery::new()
            .ok(INSIDE, "true")
            .ok(BRANCH, "feat/x")
            .ok("git diff --cached --quiet", "")
            .ok("git diff --quiet", "")
            .ok("git ls-files --others --exclude-standard", "")
            .fail("git rev-parse --verify origin/feat/x")
            .fail("git log --oneline -1")
            .fail("gh --version");
        let gate = SessionGate::new(&query);
        assert_eq!(
            gate.inspect(false),
            StopFinding::WorkflowComplete {
                branch: "feat/x".to_string()
            }
        );
    }

    #[test]
    fn test_messages_name_the_branch() {
        let finding = StopFinding::BranchNotPushed {
            branch: "feat/x".to_string(),
        };
        assert_eq!(
            finding.message().as_deref(),
            Some(
                "Branch 'feat/x' has not been pushed to origin. \
                 Please push with 'git push -u origin feat/x' and create a Pull Request."
            )
        );
        assert!(StopFinding::AlreadyRan.message().is_none());
    }
}
