//! Model capability tiers accepted by the runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Capability/cost level requested for an agent.
///
/// Serializes to the lowercase string form the runtime expects in its
/// `--agents` JSON and `--model` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    /// Fast, inexpensive tier for routine delegation work.
    Haiku,
    /// Mid tier for implementation work.
    Sonnet,
    /// Highest-capability tier.
    Opus,
    /// Use the parent session's model. Valid for delegate agents only.
    Inherit,
}

impl ModelTier {
    /// Parse a raw override value, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything outside the valid set so callers can
    /// fall back to a default without surfacing an error.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "haiku" => Some(Self::Haiku),
            "sonnet" => Some(Self::Sonnet),
            "opus" => Some(Self::Opus),
            "inherit" => Some(Self::Inherit),
            _ => None,
        }
    }

    /// The string form the runtime expects.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Haiku => "haiku",
            Self::Sonnet => "sonnet",
            Self::Opus => "opus",
            Self::Inherit => "inherit",
        }
    }

    /// True for the delegate-only tier that defers to the parent session.
    pub const fn is_inherit(self) -> bool {
        matches!(self, Self::Inherit)
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
