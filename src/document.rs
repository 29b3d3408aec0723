//! Document and viewport collaborator interfaces
//!
//! The engine never owns text. It reads lines and writes styles through
//! [`Document`], and learns what is on screen through [`LineRange`] values
//! delivered on scroll.

use crate::style::Span;

/// A document mutation, as reported by the text widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    /// Char offset where the mutation happened
    pub position: usize,
    /// Number of chars removed at that position
    pub chars_removed: usize,
    /// Number of chars inserted at that position
    pub chars_added: usize,
}

impl Edit {
    /// Create an edit notification
    pub fn new(position: usize, chars_removed: usize, chars_added: usize) -> Self {
        Self {
            position,
            chars_removed,
            chars_added,
        }
    }

    /// Whether the edit changed anything at all
    pub fn is_effective(&self) -> bool {
        self.chars_removed > 0 || self.chars_added > 0
    }
}

/// An inclusive range of visible lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    /// First visible line
    pub first: usize,
    /// Last visible line (inclusive)
    pub last: usize,
}

impl LineRange {
    /// Create a range; endpoints are reordered if reversed
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            first: a.min(b),
            last: a.max(b),
        }
    }

    /// Whether a line is inside the range
    pub fn contains(&self, line: usize) -> bool {
        line >= self.first && line <= self.last
    }
}

/// The text document the engine highlights
///
/// Implementations wrap whatever the host's text widget is. Two contract
/// points matter beyond plain line access:
///
/// - `set_line_spans` replaces all styling for one line as a single unit,
///   and MUST NOT create an undo entry, emit a change notification, or
///   touch the modified flag. Recoloring is not a content edit.
/// - `is_modified` / `set_modified` exist so the engine can save and
///   restore the flag around a batch of style writes, for widgets whose
///   style storage is entangled with the document state.
pub trait Document {
    /// Total number of lines
    fn line_count(&self) -> usize;

    /// Text of one line, without its trailing newline
    fn line_text(&self, index: usize) -> Option<String>;

    /// Index of the line containing a char offset, clamped to the last line
    fn char_to_line(&self, offset: usize) -> usize;

    /// Whether the document has unsaved changes
    fn is_modified(&self) -> bool;

    /// Set the unsaved-changes flag
    fn set_modified(&mut self, modified: bool);

    /// Replace the styling of one line
    fn set_line_spans(&mut self, line: usize, spans: &[Span]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_effective() {
        assert!(Edit::new(0, 1, 0).is_effective());
        assert!(Edit::new(5, 0, 3).is_effective());
        assert!(!Edit::new(5, 0, 0).is_effective());
    }

    #[test]
    fn test_line_range() {
        let range = LineRange::new(9, 4);
        assert_eq!((range.first, range.last), (4, 9));
        assert!(range.contains(4));
        assert!(range.contains(9));
        assert!(!range.contains(10));
    }
}
