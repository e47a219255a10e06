//! Integration tests for the command gate.
//! Covers the rule table, its precedence, and the protected-branch veto.

use gitguard::gate::command::{self, CommandGate, CommandMatch, PROTECTED_BRANCH_REASON, RULES};
use gitguard::gate::Verdict;

fn rule_reason(name: &str) -> &'static str {
    RULES
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no rule named {}", name))
        .reason
}

fn assert_denied_by(cmd: &str, reason: &str) {
    let verdict = command::evaluate(cmd);
    assert_eq!(
        verdict.reason(),
        Some(reason),
        "Command '{}' should be denied with the expected reason. Got: {:?}",
        cmd,
        verdict
    );
}

fn assert_allowed(cmd: &str) {
    let verdict = command::evaluate(cmd);
    assert!(
        verdict.is_allowed(),
        "Command '{}' should be allowed. Got: {:?}",
        cmd,
        verdict
    );
}

#[test]
fn test_rule_table_order() {
    let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec![
            "force-push",
            "hard-reset",
            "checkout-discard",
            "restore-discard",
            "clean-force",
            "branch-force-delete",
        ]
    );
}

#[test]
fn test_force_push_regardless_of_other_flags() {
    let reason = rule_reason("force-push");
    for cmd in [
        "git push --force",
        "git push -f origin feature",
        "git push origin feature -f",
        "git push -u origin feature --force",
        "git push --no-verify origin feature -f",
        "cd repo && git push origin feature --force",
    ] {
        assert_denied_by(cmd, reason);
    }
}

#[test]
fn test_destructive_local_commands() {
    assert_denied_by("git reset --hard", rule_reason("hard-reset"));
    assert_denied_by("git reset --hard HEAD~1", rule_reason("hard-reset"));
    assert_denied_by("git checkout -- .", rule_reason("checkout-discard"));
    assert_denied_by("git checkout --.", rule_reason("checkout-discard"));
    assert_denied_by("git restore .", rule_reason("restore-discard"));
    assert_denied_by(
        "git restore --staged --worktree .",
        rule_reason("restore-discard"),
    );

    assert_allowed("git reset --soft HEAD~1");
    assert_allowed("git checkout -- src/main.rs");
    assert_allowed("git restore file.txt");
}

#[test]
fn test_clean_and_branch_delete() {
    for cmd in ["git clean -f", "git clean -xf", "git clean -fd"] {
        assert_denied_by(cmd, rule_reason("clean-force"));
    }
    assert_allowed("git clean -n");

    assert_denied_by("git branch -D foo", rule_reason("branch-force-delete"));
    assert_allowed("git branch -d foo");
}

#[test]
fn test_protected_branch() {
    assert_denied_by("git push origin main", PROTECTED_BRANCH_REASON);
    assert_denied_by("git push origin master", PROTECTED_BRANCH_REASON);
    assert_denied_by("git push main", PROTECTED_BRANCH_REASON);

    assert_allowed("git push origin feature/x");
    assert_allowed("git push -u origin feat/main-menu");
    assert_allowed("git diff origin/main..HEAD");
    assert_allowed("git log origin/master..HEAD --oneline");
}

#[test]
fn test_table_precedence_over_protected_branch() {
    let gate = CommandGate::new();
    let m = gate.find_match("git push --force origin main");
    assert!(matches!(m, Some(CommandMatch::Rule(r)) if r.name == "force-push"));
    assert_denied_by("git push -f origin main", rule_reason("force-push"));
}

#[test]
fn test_safe_commands_allowed() {
    for cmd in [
        "git status",
        "git add -A",
        "git commit -m 'feat: add thing'",
        "git push -u origin feat/thing",
        "cargo test",
        "ls -la",
    ] {
        assert_allowed(cmd);
    }
}

#[test]
fn test_empty_command_allowed() {
    assert_eq!(command::evaluate(""), Verdict::Allow);
}

#[test]
fn test_matching_is_case_sensitive() {
    assert_allowed("GIT PUSH --FORCE");
    assert_allowed("git branch -d Feature");
}

#[test]
fn test_evaluation_is_idempotent() {
    let gate = CommandGate::new();
    for cmd in ["git push origin main", "git status", "git clean -xf"] {
        let first = gate.evaluate(cmd);
        for _ in 0..10 {
            assert_eq!(gate.evaluate(cmd), first);
        }
    }
}
