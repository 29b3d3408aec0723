//! Per-line cached highlighting state
//!
//! The document owns its lines; the engine keeps this side-table keyed by
//! line index. Entries are created lazily as lines are visited, invalidated
//! when their text changes, shifted when lines are inserted or deleted, and
//! dropped wholesale when the document or rule set is replaced.

/// Cached metadata for one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEntry {
    /// Snapshot of the line text at the time spans were applied; used only
    /// to detect whether re-highlighting is actually necessary
    pub text: String,
    /// Carried-over parser state: whether the line begins inside a block
    /// comment
    pub in_block_comment_at_start: bool,
    /// Whether the spans currently applied to the line are valid
    pub highlighted: bool,
}

/// Side-table of per-line entries
#[derive(Debug, Default)]
pub struct LineStore {
    entries: Vec<Option<LineEntry>>,
}

impl LineStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for a line, if one was ever recorded
    pub fn get(&self, line: usize) -> Option<&LineEntry> {
        self.entries.get(line).and_then(|e| e.as_ref())
    }

    /// Record an entry for a line, growing the table as needed
    pub fn record(&mut self, line: usize, entry: LineEntry) {
        if self.entries.len() <= line {
            self.entries.resize(line + 1, None);
        }
        self.entries[line] = Some(entry);
    }

    /// Mark a line's cached spans as stale, keeping its state
    pub fn invalidate(&mut self, line: usize) {
        if let Some(Some(entry)) = self.entries.get_mut(line) {
            entry.highlighted = false;
        }
    }

    /// Mark a range of lines stale (inclusive)
    pub fn invalidate_range(&mut self, first: usize, last: usize) {
        for line in first..=last {
            self.invalidate(line);
        }
    }

    /// Record a line the pass could not style: entry state is kept current
    /// so state resolution stays correct, but the snapshot is dropped and
    /// the line stays unhighlighted for retry
    pub fn mark_failed(&mut self, line: usize, in_block_comment_at_start: bool) {
        self.record(
            line,
            LineEntry {
                text: String::new(),
                in_block_comment_at_start,
                highlighted: false,
            },
        );
    }

    /// Shift entries after a structural edit
    ///
    /// `delta` is the signed change in total line count. Lines after
    /// `start_line` move by `delta`; on deletion the removed region's
    /// entries are dropped. The edited line itself is invalidated by the
    /// caller via the dirty range.
    pub fn rebase(&mut self, start_line: usize, delta: isize) {
        if delta == 0 || start_line >= self.entries.len() {
            return;
        }
        if delta > 0 {
            let insert_at = (start_line + 1).min(self.entries.len());
            for _ in 0..delta {
                self.entries.insert(insert_at, None);
            }
        } else {
            let remove = (-delta) as usize;
            let remove_at = start_line + 1;
            for _ in 0..remove {
                if remove_at < self.entries.len() {
                    self.entries.remove(remove_at);
                } else {
                    break;
                }
            }
        }
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of slots in the table (not the number of recorded entries)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
