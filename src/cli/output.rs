//! Output formatting utilities for the CLI.

use serde::Serialize;

/// A command result renderable for humans or as JSON.
pub trait CommandOutput: Serialize {
    /// Human-readable form for terminal display.
    fn to_human(&self) -> String;
    /// Machine-readable form for `--json` mode.
    fn to_json(&self) -> serde_json::Value;
}

/// Print a command result in the mode the user selected.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
        );
    } else {
        println!("{}", result.to_human());
    }
}

/// Truncate a string to a maximum number of characters, appending "..."
/// if truncated. Counts characters, not bytes, so assistant text with
/// multibyte content never splits mid-character.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
