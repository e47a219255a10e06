//! Typed, lazy access to the repository state the session gate inspects.
//!
//! Each method issues exactly the queries it needs and nothing is cached, so
//! callers that stop early never pay for later checks. Git output is only
//! ever tested for success, emptiness, or an exact value.

use crate::repo::query::RepoQuery;
use std::borrow::Cow;

/// Sentinel `git rev-parse --abbrev-ref HEAD` prints on a detached HEAD.
pub const DETACHED_HEAD: &str = "HEAD";

/// Remote the gate compares against.
pub const REMOTE: &str = "origin";

pub struct GitRepo<Q> {
    query: Q,
}

impl<Q: RepoQuery> GitRepo<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }

    pub fn is_inside_work_tree(&self) -> bool {
        self.query.run("git rev-parse --is-inside-work-tree").is_some()
    }

    /// Current branch name, or None when it can't be determined.
    /// A detached HEAD comes back as [`DETACHED_HEAD`].
    pub fn current_branch(&self) -> Option<String> {
        self.query
            .run("git rev-parse --abbrev-ref HEAD")
            .filter(|b| !b.is_empty())
    }

    /// `git diff --quiet` exits non-zero when there is a diff.
    pub fn has_staged_changes(&self) -> bool {
        self.query.run("git diff --cached --quiet").is_none()
    }

    pub fn has_unstaged_changes(&self) -> bool {
        self.query.run("git diff --quiet").is_none()
    }

    pub fn has_untracked_files(&self) -> bool {
        non_empty(self.query.run("git ls-files --others --exclude-standard"))
    }

    pub fn remote_branch_exists(&self, branch: &str) -> bool {
        self.query
            .run(&format!(
                "git rev-parse --verify {}",
                shell_quote(&format!("{}/{}", REMOTE, branch))
            ))
            .is_some()
    }

    pub fn has_any_commit(&self) -> bool {
        non_empty(self.query.run("git log --oneline -1"))
    }

    /// Commits reachable from HEAD but not from the remote branch.
    pub fn has_unpushed_commits(&self, branch: &str) -> bool {
        non_empty(
            self.query.run(&format!(
                "git log {}..HEAD --oneline",
                shell_quote(&format!("{}/{}", REMOTE, branch))
            )),
        )
    }

    pub fn gh_available(&self) -> bool {
        self.query.run("gh --version").is_some()
    }

    /// Whether `gh` reports a pull request for the current branch.
    pub fn has_pull_request(&self) -> bool {
        non_empty(self.query.run("gh pr view --json url -q '.url'"))
    }
}

/// Quote a word for `sh -c`. Ref names may hold `$`, `;`, backticks and the
/// like, so anything outside a plain charset is single-quoted with each `'`
/// written as `'\''`. Plain names pass through unchanged.
pub fn shell_quote(word: &str) -> Cow<'_, str> {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+@:,=%".contains(c));
    if plain {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', "'\\''")))
    }
}

fn non_empty(output: Option<String>) -> bool {
    output.is_some_and(|s| !s.is_empty())
}
