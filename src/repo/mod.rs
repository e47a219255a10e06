pub mod git;
pub mod query;

pub use git::GitRepo;
pub use query::{RepoQuery, ScriptedQuery, ShellQuery};
