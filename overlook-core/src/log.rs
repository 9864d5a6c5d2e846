//! The append-only narration log.

use serde::{Deserialize, Serialize};

/// Story lines every session opens with (and returns to on reset).
pub const INTRO: [&str; 4] = [
    "Welcome to the Overlook Hotel...",
    "The winter caretaker position seemed like a dream job.",
    "Now, as snow blocks all exits, you realize the truth.",
    "The hotel has a dark history, and you're not alone.",
];

/// How many lines the display surfaces.
pub const VISIBLE_LINES: usize = 8;

/// Append-only story text. Storage is unbounded; display is truncated to
/// the most recent [`VISIBLE_LINES`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationLog {
    lines: Vec<String>,
}

impl NarrationLog {
    /// A fresh log holding the intro.
    pub fn new() -> Self {
        Self {
            lines: INTRO.iter().map(|line| line.to_string()).collect(),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// The most recent `count` lines, oldest first.
    pub fn recent(&self, count: usize) -> &[String] {
        &self.lines[self.lines.len().saturating_sub(count)..]
    }

    /// The display window.
    pub fn visible(&self) -> &[String] {
        self.recent(VISIBLE_LINES)
    }

    /// Every line since the session began.
    pub fn all(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for NarrationLog {
    fn default() -> Self {
        Self::new()
    }
}
