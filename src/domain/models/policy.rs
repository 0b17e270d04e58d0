//! Command policy rules and gate decisions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a rule pattern is compared against a normalized command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The whole command equals the pattern.
    Exact,
    /// The command starts with the pattern.
    Prefix,
    /// The pattern occurs anywhere in the command.
    Substring,
}

/// One allow or deny entry in the command policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRule {
    /// Pattern text, compared per `kind`.
    pub pattern: String,
    /// Comparison mode.
    pub kind: MatchKind,
}

impl CommandRule {
    /// Rule matching the whole command.
    pub fn exact(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: MatchKind::Exact,
        }
    }

    /// Rule matching the start of the command.
    pub fn prefix(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: MatchKind::Prefix,
        }
    }

    /// Rule matching anywhere in the command.
    pub fn substring(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: MatchKind::Substring,
        }
    }

    /// True if `command` satisfies this rule.
    pub fn matches(&self, command: &str) -> bool {
        match self.kind {
            MatchKind::Exact => command == self.pattern,
            MatchKind::Prefix => command.starts_with(&self.pattern),
            MatchKind::Substring => command.contains(&self.pattern),
        }
    }
}

impl fmt::Display for CommandRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MatchKind::Exact => write!(f, "'{}'", self.pattern),
            MatchKind::Prefix => write!(f, "'{}*'", self.pattern),
            MatchKind::Substring => write!(f, "'*{}*'", self.pattern),
        }
    }
}

/// Outcome of evaluating one command against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// The command may run.
    Allowed,
    /// The command must not run; the reason is surfaced to the conversation
    /// as a failed tool call.
    Denied { reason: String },
}

impl PolicyDecision {
    /// Denial with a human-readable reason.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self::Denied {
            reason: reason.into(),
        }
    }

    /// True if the command may run.
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// True if the command was rejected.
    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }

    /// The denial reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed => None,
            Self::Denied { reason } => Some(reason),
        }
    }
}
