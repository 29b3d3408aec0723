//! In-memory reference document
//!
//! [`TextBuffer`] implements [`Document`] without a GUI widget behind it.
//! Its edit operations return the notification triple a real text widget
//! would emit, so tests (and hosts without a widget) can drive the engine
//! end to end: apply an edit, feed the returned [`Edit`] to the engine,
//! poll, inspect the applied spans.
//!
//! Style writes go to a span side-table and, by construction, never touch
//! the modified flag or the edit serial — the buffer's stand-in for undo
//! availability.

use crate::document::{Document, Edit};
use crate::style::Span;

/// A document held as a vector of lines
#[derive(Debug)]
pub struct TextBuffer {
    /// Lines of text, without trailing newlines; never empty
    lines: Vec<String>,
    /// Applied styling, one row per line
    spans: Vec<Vec<Span>>,
    /// Whether the buffer has unsaved changes
    modified: bool,
    /// Bumped once per content edit, never by style writes
    edit_serial: u64,
}

impl TextBuffer {
    /// Create a buffer from text; an empty string yields one empty line
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let spans = vec![Vec::new(); lines.len()];
        Self {
            lines,
            spans,
            modified: false,
            edit_serial: 0,
        }
    }

    /// The buffer contents joined with newlines
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Spans currently applied to a line
    pub fn spans_for_line(&self, line: usize) -> &[Span] {
        self.spans.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Content edit counter; style writes must never advance it
    pub fn edit_serial(&self) -> u64 {
        self.edit_serial
    }

    /// Insert text at a char offset, returning the change notification
    pub fn insert(&mut self, offset: usize, text: &str) -> Edit {
        if text.is_empty() {
            return Edit::new(offset, 0, 0);
        }
        let (line, col) = self.locate(offset);
        let byte = char_to_byte(&self.lines[line], col);

        if !text.contains('\n') {
            self.lines[line].insert_str(byte, text);
        } else {
            let tail = self.lines[line].split_off(byte);
            let mut segments = text.split('\n');
            if let Some(first) = segments.next() {
                self.lines[line].push_str(first);
            }
            let rest: Vec<&str> = segments.collect();
            let mut insert_at = line + 1;
            for (i, segment) in rest.iter().enumerate() {
                let mut new_line = segment.to_string();
                if i + 1 == rest.len() {
                    new_line.push_str(&tail);
                }
                self.lines.insert(insert_at, new_line);
                self.spans.insert(insert_at, Vec::new());
                insert_at += 1;
            }
        }

        self.modified = true;
        self.edit_serial += 1;
        Edit::new(offset, 0, text.chars().count())
    }

    /// Delete up to `count` chars at a char offset, returning the change
    /// notification; a deleted line break counts as one char
    pub fn delete(&mut self, offset: usize, count: usize) -> Edit {
        let (line, col) = self.locate(offset);
        let mut remaining = count;
        let mut removed = 0;

        while remaining > 0 {
            let line_len = self.lines[line].chars().count();
            let available = line_len.saturating_sub(col);
            if remaining <= available {
                let b0 = char_to_byte(&self.lines[line], col);
                let b1 = char_to_byte(&self.lines[line], col + remaining);
                self.lines[line].replace_range(b0..b1, "");
                removed += remaining;
                remaining = 0;
            } else {
                let b0 = char_to_byte(&self.lines[line], col);
                self.lines[line].truncate(b0);
                removed += available;
                remaining -= available;
                if line + 1 < self.lines.len() {
                    removed += 1;
                    remaining -= 1;
                    let next = self.lines.remove(line + 1);
                    self.spans.remove(line + 1);
                    self.lines[line].push_str(&next);
                } else {
                    remaining = 0;
                }
            }
        }

        if removed > 0 {
            self.modified = true;
            self.edit_serial += 1;
        }
        Edit::new(offset, removed, 0)
    }

    /// Map a char offset to (line, column), clamped to the buffer end
    fn locate(&self, offset: usize) -> (usize, usize) {
        let mut remaining = offset;
        for (i, text) in self.lines.iter().enumerate() {
            let len = text.chars().count();
            if remaining <= len {
                return (i, remaining);
            }
            if i + 1 == self.lines.len() {
                return (i, len);
            }
            remaining -= len + 1;
        }
        (0, 0)
    }
}

impl Document for TextBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, index: usize) -> Option<String> {
        self.lines.get(index).cloned()
    }

    fn char_to_line(&self, offset: usize) -> usize {
        self.locate(offset).0
    }

    fn is_modified(&self) -> bool {
        self.modified
    }

    fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    fn set_line_spans(&mut self, line: usize, spans: &[Span]) {
        if line >= self.spans.len() {
            return;
        }
        self.spans[line] = spans.to_vec();
    }
}

fn char_to_byte(text: &str, col: usize) -> usize {
    text.char_indices()
        .nth(col)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
