//! gitguard — git workflow guardrails for AI coding agents.
//!
//! Two independent gates, each a pure function from its input (plus live
//! repository state) to a [`gate::Verdict`]:
//!
//! - the **command gate** screens a shell command before it runs and denies
//!   known-destructive git invocations;
//! - the **session gate** inspects the repository when the agent tries to
//!   stop and blocks until the branch is committed, pushed, and has a PR.
//!
//! The hook binaries in `src/hook/` are thin transports around these; the
//! `gitguard` binary is an operator CLI.

pub mod cli;
pub mod gate;
pub mod protocol;
pub mod repo;
pub mod utils;
