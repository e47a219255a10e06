//! Core types shared by both gates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of a single gate evaluation.
/// Exactly one verdict is produced per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Verdict {
    /// Nothing to object to: the command runs, or the agent stops.
    Allow,
    /// Blocked. The reason is surfaced verbatim to the agent as guidance.
    Deny { reason: String },
}

impl Verdict {
    pub fn deny(reason: impl Into<String>) -> Self {
        Verdict::Deny {
            reason: reason.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Verdict::Deny { .. })
    }

    /// The denial reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Allow => None,
            Verdict::Deny { reason } => Some(reason),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Allow => write!(f, "allowed"),
            Verdict::Deny { reason } => write!(f, "denied: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Verdict::Allow.to_string(), "allowed");
        assert_eq!(Verdict::deny("nope").to_string(), "denied: nope");
    }

    #[test]
    fn test_reason_only_on_deny() {
        assert_eq!(Verdict::Allow.reason(), None);
        assert_eq!(Verdict::deny("nope").reason(), Some("nope"));
    }

    #[test]
    fn test_serializes_tagged() {
        let json = serde_json::to_string(&Verdict::deny("x")).unwrap();
        assert_eq!(json, r#"{"decision":"deny","reason":"x"}"#);
        let json = serde_json::to_string(&Verdict::Allow).unwrap();
        assert_eq!(json, r#"{"decision":"allow"}"#);
    }
}
