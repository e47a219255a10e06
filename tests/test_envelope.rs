//! Integration tests for the hook envelopes as the host runtime sends them.

use gitguard::protocol::envelope::{parse_envelope, read_envelope};
use gitguard::protocol::{EnvelopeError, PreToolUseInput, PreToolUseOutput, StopInput};

#[test]
fn test_full_pre_tool_use_envelope() {
    let input: PreToolUseInput = parse_envelope(
        r#"{
            "session_id": "abc-123",
            "transcript_path": "/tmp/t.jsonl",
            "cwd": "/project",
            "permission_mode": "default",
            "hook_event_name": "PreToolUse",
            "tool_name": "Bash",
            "tool_input": {"command": "git push origin main", "timeout": 120000}
        }"#,
    )
    .unwrap();

    assert_eq!(input.session_id.as_deref(), Some("abc-123"));
    assert_eq!(input.hook_event_name.as_deref(), Some("PreToolUse"));
    assert_eq!(input.tool_name.as_deref(), Some("Bash"));
    assert_eq!(input.command(), Some("git push origin main"));
}

#[test]
fn test_full_stop_envelope() {
    let input: StopInput = read_envelope(
        r#"{"session_id":"abc-123","hook_event_name":"Stop","stop_hook_active":false}"#.as_bytes(),
    )
    .unwrap();
    assert_eq!(input.hook_event_name.as_deref(), Some("Stop"));
    assert!(!input.already_ran());
    assert_eq!(input.workdir(), None);
}

#[test]
fn test_wrong_typed_metadata_keeps_the_command() {
    for json in [
        r#"{"session_id":5,"tool_input":{"command":"git push --force"}}"#,
        r#"{"tool_name":{"name":"Bash"},"tool_input":{"command":"git push --force"}}"#,
        r#"{"cwd":false,"hook_event_name":1,"tool_input":{"command":"git push --force"}}"#,
    ] {
        let input: PreToolUseInput = parse_envelope(json)
            .unwrap_or_else(|e| panic!("envelope {} should parse: {}", json, e));
        assert_eq!(input.command(), Some("git push --force"), "{}", json);
    }
}

#[test]
fn test_wrong_typed_cwd_keeps_the_guard() {
    let input: StopInput = parse_envelope(r#"{"cwd":7,"stop_hook_active":true}"#).unwrap();
    assert_eq!(input.cwd, None);
    assert!(input.already_ran());
}

#[test]
fn test_non_object_bodies_fail_to_parse() {
    for body in ["", "null", "[1,2]", "\"git push\"", "{\"tool_input\":"] {
        let err = parse_envelope::<PreToolUseInput>(body).unwrap_err();
        assert!(matches!(err, EnvelopeError::Parse(_)), "{:?}", body);
    }
}

#[test]
fn test_deny_output_round_trips_through_host_shape() {
    let json = PreToolUseOutput::deny("Direct push to main/master is blocked.")
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "hookSpecificOutput": {
                "hookEventName": "PreToolUse",
                "permissionDecision": "deny",
                "permissionDecisionReason": "Direct push to main/master is blocked."
            }
        })
    );
}
