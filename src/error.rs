//! Error types for the highlighting engine

use thiserror::Error;

/// Result type alias for highlighting operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighting error types
///
/// Every variant is recovered locally: a bad rule is skipped, a runaway
/// line keeps its previous styling, a desynced pass degrades to a full
/// catch-up. Nothing here is surfaced to the end user as a failure.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt rule description: {0}")]
    Config(String),

    #[error("invalid pattern '{pattern}': {message}")]
    BadPattern { pattern: String, message: String },

    #[error("span limit exceeded on line {line} ({count} spans)")]
    RunawayMatch { line: usize, count: usize },

    #[error("line state out of sync with document (expected {expected} lines, found {actual})")]
    StateDesync { expected: usize, actual: usize },
}
