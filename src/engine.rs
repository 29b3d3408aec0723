//! The highlighting engine
//!
//! [`Highlighter`] ties the pieces together: it observes edits and scrolls,
//! debounces them into passes, and re-tokenizes the minimal set of lines —
//! dirty lines plus never-highlighted visible lines — carrying block-comment
//! state across line boundaries. Styles are applied through the [`Document`]
//! trait with the modified flag saved and restored, so a pass is invisible
//! to the document's history.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::changes::{ChangeTracker, DirtyRange};
use crate::document::{Document, Edit, LineRange};
use crate::error::{HighlightError, Result};
use crate::line_store::{LineEntry, LineStore};
use crate::loader;
use crate::rules::{self, RuleSet};
use crate::scheduler::{Scheduler, DEFAULT_DEBOUNCE};

/// What one pass did, for host logging and tests
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// Lines visited by the pass
    pub lines_processed: usize,
    /// Total spans applied across those lines
    pub spans_applied: usize,
}

/// The incremental syntax highlighter
pub struct Highlighter {
    rules: RuleSet,
    store: LineStore,
    tracker: ChangeTracker,
    scheduler: Scheduler,
    viewport: Option<LineRange>,
    enabled: bool,
    /// Line count after the last edit or pass; a mismatch at pass start
    /// means a structural edit went unreported
    expected_lines: Option<usize>,
}

impl Highlighter {
    /// Create a highlighter with the default debounce interval
    pub fn new(rules: RuleSet) -> Self {
        Self::with_debounce(rules, DEFAULT_DEBOUNCE)
    }

    /// Create a highlighter with a custom debounce interval
    pub fn with_debounce(rules: RuleSet, interval: Duration) -> Self {
        Self {
            rules,
            store: LineStore::new(),
            tracker: ChangeTracker::new(),
            scheduler: Scheduler::with_interval(interval),
            viewport: None,
            enabled: true,
            expected_lines: None,
        }
    }

    /// The active rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Whether a pass is currently scheduled
    pub fn pass_pending(&self) -> bool {
        self.scheduler.is_armed()
    }

    /// Enable or disable highlighting; while disabled, scheduled passes are
    /// discarded as no-ops and pending dirty ranges are kept for later
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether highlighting is enabled
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Replace the rule set wholesale and force a full re-highlight
    pub fn set_rules(&mut self, rules: RuleSet, now: Instant) {
        self.rules = rules;
        self.store.clear();
        self.tracker.clear();
        self.scheduler.notify_change(now);
    }

    /// Reload rules from a file; on failure the previous rules stay active
    pub fn reload_rules(&mut self, path: &Path, now: Instant) -> Result<()> {
        match loader::load_rule_file(path) {
            Ok(rules) => {
                self.set_rules(rules, now);
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), "rule reload failed, keeping previous rules: {e}");
                Err(e)
            }
        }
    }

    /// A document mutation happened
    ///
    /// `edit` is the widget's `(position, chars_removed, chars_added)`
    /// triple; `doc` must already reflect the mutation, since offsets are
    /// mapped through its post-edit line index.
    pub fn notify_edit(&mut self, doc: &impl Document, edit: Edit, now: Instant) {
        if !edit.is_effective() {
            return;
        }
        let line_count = doc.line_count();
        let first = doc.char_to_line(edit.position);
        let last = doc.char_to_line(edit.position + edit.chars_added);

        if let Some(expected) = self.expected_lines {
            let delta = line_count as isize - expected as isize;
            if delta != 0 {
                self.store.rebase(first, delta);
            }
        }
        self.expected_lines = Some(line_count);
        self.store.invalidate_range(first, last);
        self.tracker.push(DirtyRange::new(first, last));
        self.scheduler.notify_change(now);
        debug!(first, last, "edit marked lines dirty");
    }

    /// The viewport scrolled; newly visible never-highlighted lines get a
    /// catch-up pass without waiting for an edit
    pub fn notify_scroll(&mut self, visible: LineRange, now: Instant) {
        self.viewport = Some(visible);
        self.scheduler.notify_scroll(now);
    }

    /// Drive the scheduler; runs at most one pass
    pub fn poll(&mut self, doc: &mut impl Document, now: Instant) -> Option<PassReport> {
        if !self.scheduler.poll(now) {
            return None;
        }
        let report = self.run_pass(doc, now);
        self.scheduler.finish();
        Some(report)
    }

    /// The document was closed or replaced: discard all pending state
    ///
    /// A stray [`poll`] afterwards is a safe no-op.
    ///
    /// [`poll`]: Highlighter::poll
    pub fn document_closed(&mut self) {
        self.tracker.clear();
        self.store.clear();
        self.scheduler.cancel();
        self.viewport = None;
        self.expected_lines = None;
    }

    /// Run one highlighting pass immediately
    ///
    /// Normally driven through [`poll`]; exposed for hosts that want to
    /// force a pass, e.g. right after opening a file.
    ///
    /// [`poll`]: Highlighter::poll
    pub fn run_pass(&mut self, doc: &mut impl Document, now: Instant) -> PassReport {
        if !self.enabled {
            debug!("highlighting disabled, pass skipped");
            return PassReport::default();
        }
        let line_count = doc.line_count();
        if line_count == 0 {
            self.tracker.clear();
            return PassReport::default();
        }

        // an unreported structural edit invalidates every pending index;
        // abort and repaint the viewport from scratch
        if let Some(expected) = self.expected_lines {
            if expected != line_count {
                let err = HighlightError::StateDesync {
                    expected,
                    actual: line_count,
                };
                warn!("{err}; scheduling full catch-up");
                self.store.clear();
                self.tracker.clear();
                self.expected_lines = Some(line_count);
                self.scheduler.notify_change(now);
                return PassReport::default();
            }
        }

        let mut pending: BTreeSet<usize> = BTreeSet::new();
        for range in self.tracker.take() {
            for line in range.first..=range.last.min(line_count - 1) {
                pending.insert(line);
            }
        }
        if let Some(vp) = self.viewport {
            let last = vp.last.min(line_count - 1);
            if vp.first <= last {
                for line in vp.first..=last {
                    match self.store.get(line) {
                        Some(entry) if entry.highlighted => {}
                        _ => {
                            pending.insert(line);
                        }
                    }
                }
            }
        }
        let first_work = match pending.first() {
            Some(&line) => line,
            None => return PassReport::default(),
        };
        let mut state = self.entry_state(doc, first_work);

        let was_modified = doc.is_modified();
        let mut report = PassReport::default();
        let mut prev_line: Option<usize> = None;

        while let Some(line) = pending.pop_first() {
            if line >= line_count {
                break;
            }

            // bridge the gap since the previously processed line
            if let Some(prev) = prev_line {
                if line > prev + 1 {
                    state = self.bridge_state(doc, prev + 1, line, state);
                }
            }

            let Some(text) = doc.line_text(line) else {
                warn!(line, "line unreadable mid-pass, leaving it stale");
                self.store.mark_failed(line, state);
                prev_line = Some(line);
                continue;
            };

            // unchanged text entering in the same state means the applied
            // spans are still right; only the state needs to move forward
            let unchanged = self
                .store
                .get(line)
                .map_or(false, |e| e.text == text && e.in_block_comment_at_start == state);

            let exit_state = if unchanged {
                let exit = rules::scan_state(&self.rules, &text, state);
                self.store.record(
                    line,
                    LineEntry {
                        text,
                        in_block_comment_at_start: state,
                        highlighted: true,
                    },
                );
                exit
            } else {
                match rules::highlight_line(&self.rules, line, &text, state) {
                    Ok(result) => {
                        doc.set_line_spans(line, &result.spans);
                        report.spans_applied += result.spans.len();
                        self.store.record(
                            line,
                            LineEntry {
                                text,
                                in_block_comment_at_start: state,
                                highlighted: true,
                            },
                        );
                        result.exit_state
                    }
                    Err(e) => {
                        warn!(line, "{e}; line keeps its previous styling");
                        self.store.mark_failed(line, state);
                        rules::scan_state(&self.rules, &text, state)
                    }
                }
            };
            report.lines_processed += 1;

            // a changed exit state invalidates the next line's cached entry
            // state; pull it into the pass so the comment carry stays true
            if line + 1 < line_count && !pending.contains(&(line + 1)) {
                if let Some(next) = self.store.get(line + 1) {
                    if next.in_block_comment_at_start != exit_state {
                        pending.insert(line + 1);
                    }
                }
            }

            state = exit_state;
            prev_line = Some(line);
        }

        doc.set_modified(was_modified);
        self.expected_lines = Some(line_count);
        debug!(
            lines = report.lines_processed,
            spans = report.spans_applied,
            "highlight pass complete"
        );
        report
    }

    /// Block-comment state at the start of `first`
    ///
    /// The line store doubles as a checkpoint cache: a cached entry for the
    /// line (or the nearest preceding line) bounds the scan, so steady-state
    /// typing resolves against the immediately preceding line instead of
    /// rescanning from the top of the document.
    fn entry_state(&self, doc: &impl Document, first: usize) -> bool {
        if first == 0 {
            return false;
        }
        if let Some(entry) = self.store.get(first) {
            // entry state depends only on earlier lines, which are not
            // dirty when `first` is the first working line
            return entry.in_block_comment_at_start;
        }

        let mut anchor = 0;
        let mut state = false;
        for line in (0..first).rev() {
            if let Some(entry) = self.store.get(line) {
                anchor = line;
                state = entry.in_block_comment_at_start;
                break;
            }
        }
        for line in anchor..first {
            match doc.line_text(line) {
                Some(text) => state = rules::scan_state(&self.rules, &text, state),
                None => break,
            }
        }
        state
    }

    /// State after a gap of untouched lines between two working-set lines
    fn bridge_state(
        &self,
        doc: &impl Document,
        from: usize,
        to: usize,
        state_after_prev: bool,
    ) -> bool {
        if let Some(entry) = self.store.get(to) {
            return entry.in_block_comment_at_start;
        }
        let mut state = state_after_prev;
        for line in from..to {
            match doc.line_text(line) {
                Some(text) => state = rules::scan_state(&self.rules, &text, state),
                None => break,
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextBuffer;
    use crate::loader::parse_rule_set;
    use crate::style::Color;

    const TEST_RULES: &str = r#"{
        "block_comment_start": "/\\*",
        "block_comment_end": "\\*/",
        "patterns": [
            { "match": "'.*$", "color": "gray", "italic": true },
            { "match": "\\bIF\\b", "color": "blue", "bold": true },
            { "match": "\\bTHEN\\b", "color": "blue", "bold": true },
            { "match": "\\b\\d+\\b", "color": "green" }
        ]
    }"#;

    fn test_highlighter() -> Highlighter {
        Highlighter::with_debounce(
            parse_rule_set(TEST_RULES).unwrap(),
            Duration::from_millis(100),
        )
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Arm via scroll and run the resulting pass
    fn paint(
        hl: &mut Highlighter,
        buf: &mut TextBuffer,
        first: usize,
        last: usize,
        t: Instant,
    ) -> PassReport {
        hl.notify_scroll(LineRange::new(first, last), t);
        hl.poll(buf, t + ms(100)).expect("pass should fire")
    }

    #[test]
    fn test_visible_lines_highlighted() {
        let mut hl = test_highlighter();
        let mut buf = TextBuffer::from_text("IF x THEN\n' note\ny = 42");
        let t0 = Instant::now();

        let report = paint(&mut hl, &mut buf, 0, 2, t0);
        assert_eq!(report.lines_processed, 3);

        let line0 = buf.spans_for_line(0);
        assert_eq!(line0.len(), 2); // IF and THEN
        assert_eq!((line0[0].start, line0[0].end), (0, 2));
        assert!(line0[0].style.bold);
        let line1 = buf.spans_for_line(1);
        assert_eq!(line1.len(), 1);
        assert!(line1[0].style.italic);
        assert_eq!(buf.spans_for_line(2).len(), 1); // 42
    }

    #[test]
    fn test_block_comment_carry_over() {
        let mut hl = test_highlighter();
        let mut buf = TextBuffer::from_text("/* start\nIF x THEN\nend */");
        let t0 = Instant::now();

        paint(&mut hl, &mut buf, 0, 2, t0);

        // the middle line is entirely comment, not IF/THEN-highlighted
        let middle = buf.spans_for_line(1);
        assert_eq!(middle.len(), 1);
        assert_eq!((middle[0].start, middle[0].end), (0, 9));
        assert_eq!(middle[0].style.fg, Color::parse("gray").unwrap());

        let last = buf.spans_for_line(2);
        assert_eq!((last[0].start, last[0].end), (0, 6));
    }

    #[test]
    fn test_pass_is_idempotent() {
        let mut hl = test_highlighter();
        let mut buf = TextBuffer::from_text("IF a THEN\n/* b\nc */\nd = 7");
        let t0 = Instant::now();

        paint(&mut hl, &mut buf, 0, 3, t0);
        let before: Vec<Vec<_>> = (0..4).map(|i| buf.spans_for_line(i).to_vec()).collect();

        let report = paint(&mut hl, &mut buf, 0, 3, t0 + ms(1000));
        // nothing was dirty and everything visible is already highlighted
        assert_eq!(report.lines_processed, 0);
        for (i, spans) in before.iter().enumerate() {
            assert_eq!(buf.spans_for_line(i), spans.as_slice());
        }
    }

    #[test]
    fn test_edit_cascades_comment_open() {
        let mut hl = test_highlighter();
        let mut buf = TextBuffer::from_text("x = 1\ny = 2\nz = 3");
        let t0 = Instant::now();
        paint(&mut hl, &mut buf, 0, 2, t0);

        // opening a comment on line 0 must repaint the lines it swallows,
        // even though they were never marked dirty
        let t1 = t0 + ms(1000);
        let edit = buf.insert(0, "/* ");
        hl.notify_edit(&buf, edit, t1);
        let report = hl.poll(&mut buf, t1 + ms(100)).unwrap();
        assert_eq!(report.lines_processed, 3);

        for line in 0..3 {
            let spans = buf.spans_for_line(line);
            assert_eq!(spans.len(), 1, "line {line} should be one comment span");
            assert_eq!(spans[0].style.fg, Color::parse("gray").unwrap());
        }

        // closing it again restores normal highlighting below
        let t2 = t1 + ms(1000);
        let edit = buf.insert(8, " */"); // end of line 0
        hl.notify_edit(&buf, edit, t2);
        hl.poll(&mut buf, t2 + ms(100)).unwrap();
        assert_eq!(buf.spans_for_line(2).len(), 1); // the 3 on line 2
        assert_eq!(
            buf.spans_for_line(2)[0].style.fg,
            Color::parse("green").unwrap()
        );
    }

    #[test]
    fn test_no_side_effects_on_document_metadata() {
        let mut hl = test_highlighter();
        let mut buf = TextBuffer::from_text("IF x THEN");
        let t0 = Instant::now();

        assert!(!buf.is_modified());
        let serial = buf.edit_serial();
        paint(&mut hl, &mut buf, 0, 0, t0);
        assert!(!buf.is_modified());
        assert_eq!(buf.edit_serial(), serial);

        // and a modified document stays modified
        let t1 = t0 + ms(1000);
        let edit = buf.insert(0, "a");
        hl.notify_edit(&buf, edit, t1);
        let serial = buf.edit_serial();
        hl.poll(&mut buf, t1 + ms(100)).unwrap();
        assert!(buf.is_modified());
        assert_eq!(buf.edit_serial(), serial);
    }

    #[test]
    fn test_locality_of_rehighlighting() {
        let mut hl = test_highlighter();
        let text: Vec<String> = (0..10).map(|i| format!("line {i}")).collect();
        let mut buf = TextBuffer::from_text(&text.join("\n"));
        let t0 = Instant::now();
        paint(&mut hl, &mut buf, 0, 9, t0);

        // a single-char edit on line 5 revisits only line 5
        let t1 = t0 + ms(1000);
        let offset = buf.to_text().find("line 5").unwrap(); // ascii, chars == bytes
        let edit = buf.insert(offset, "x");
        hl.notify_edit(&buf, edit, t1);
        let report = hl.poll(&mut buf, t1 + ms(100)).unwrap();
        assert_eq!(report.lines_processed, 1);
    }

    #[test]
    fn test_burst_of_edits_accumulates() {
        let mut hl = test_highlighter();
        let mut buf = TextBuffer::from_text("aaa\nbbb\nccc\nddd");
        let t0 = Instant::now();
        paint(&mut hl, &mut buf, 0, 3, t0);

        let t1 = t0 + ms(1000);
        let edit = buf.insert(0, "1 ");
        hl.notify_edit(&buf, edit, t1);
        // second edit before the deadline re-arms without losing the first
        let t2 = t1 + ms(50);
        let len = buf.to_text().chars().count();
        let edit = buf.insert(len, " 2");
        hl.notify_edit(&buf, edit, t2);

        assert!(hl.poll(&mut buf, t1 + ms(120)).is_none()); // re-armed
        let report = hl.poll(&mut buf, t2 + ms(100)).unwrap();
        assert_eq!(report.lines_processed, 2); // line 0 and line 3
        assert_eq!(buf.spans_for_line(0).len(), 1); // the 1
        assert_eq!(buf.spans_for_line(3).len(), 1); // the 2
    }

    #[test]
    fn test_scroll_catches_up_new_lines() {
        let mut hl = test_highlighter();
        let mut buf = TextBuffer::from_text("IF a THEN\nIF b THEN\nIF c THEN\nIF d THEN");
        let t0 = Instant::now();
        paint(&mut hl, &mut buf, 0, 1, t0);
        assert!(buf.spans_for_line(3).is_empty());

        let report = paint(&mut hl, &mut buf, 2, 3, t0 + ms(1000));
        assert_eq!(report.lines_processed, 2);
        assert_eq!(buf.spans_for_line(3).len(), 2);
    }

    #[test]
    fn test_newline_insert_rebases_store() {
        let mut hl = test_highlighter();
        let mut buf = TextBuffer::from_text("IF a THEN\n/* open\nclose */\nIF b THEN");
        let t0 = Instant::now();
        paint(&mut hl, &mut buf, 0, 3, t0);

        // split line 0; everything below shifts by one
        let t1 = t0 + ms(1000);
        let edit = buf.insert(2, "\n");
        hl.notify_edit(&buf, edit, t1);
        hl.notify_scroll(LineRange::new(0, 4), t1 + ms(10));
        hl.poll(&mut buf, t1 + ms(200)).unwrap();

        // the comment opener, now line 2, kept its spans through the shift
        let spans = buf.spans_for_line(2);
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (0, 7));
        // and the keyword line below still highlights after the shift
        assert_eq!(buf.spans_for_line(4).len(), 2);
    }

    #[test]
    fn test_document_closed_discards_pending() {
        let mut hl = test_highlighter();
        let mut buf = TextBuffer::from_text("IF x THEN");
        let t0 = Instant::now();
        let edit = buf.insert(0, "a");
        hl.notify_edit(&buf, edit, t0);
        hl.document_closed();
        // the stray fire after cancellation is a no-op
        assert!(hl.poll(&mut buf, t0 + ms(500)).is_none());
        assert!(buf.spans_for_line(0).is_empty());
    }

    #[test]
    fn test_unreported_structural_edit_recovers() {
        let mut hl = test_highlighter();
        let mut buf = TextBuffer::from_text("IF a THEN\nIF b THEN");
        let t0 = Instant::now();
        let edit = buf.insert(0, "x");
        hl.notify_edit(&buf, edit, t0);
        hl.poll(&mut buf, t0 + ms(100)).unwrap();

        // a structural edit the engine never hears about
        buf.insert(0, "top\n");

        let t1 = t0 + ms(1000);
        hl.notify_scroll(LineRange::new(0, 2), t1);
        // the desynced pass applies nothing and reschedules
        let report = hl.poll(&mut buf, t1 + ms(100)).unwrap();
        assert_eq!(report, PassReport::default());
        assert!(hl.pass_pending());

        // the catch-up pass repaints the viewport correctly
        let report = hl.poll(&mut buf, t1 + ms(300)).unwrap();
        assert_eq!(report.lines_processed, 3);
        assert_eq!(buf.spans_for_line(1).len(), 1); // THEN ("xIF" is one word)
        assert_eq!(buf.spans_for_line(2).len(), 2);
    }

    #[test]
    fn test_disabled_pass_is_noop() {
        let mut hl = test_highlighter();
        hl.set_enabled(false);
        let mut buf = TextBuffer::from_text("IF x THEN");
        let t0 = Instant::now();
        let report = paint(&mut hl, &mut buf, 0, 0, t0);
        assert_eq!(report, PassReport::default());
        assert!(buf.spans_for_line(0).is_empty());

        // re-enabling lets the next pass catch up
        hl.set_enabled(true);
        paint(&mut hl, &mut buf, 0, 0, t0 + ms(1000));
        assert_eq!(buf.spans_for_line(0).len(), 2);
    }

    #[test]
    fn test_set_rules_forces_full_rehighlight() {
        let mut hl = test_highlighter();
        let mut buf = TextBuffer::from_text("IF x THEN");
        let t0 = Instant::now();
        paint(&mut hl, &mut buf, 0, 0, t0);
        assert_eq!(buf.spans_for_line(0).len(), 2);

        let t1 = t0 + ms(1000);
        let only_numbers =
            parse_rule_set(r#"{ "patterns": [ { "match": "\\d+", "color": "green" } ] }"#).unwrap();
        hl.set_rules(only_numbers, t1);
        assert!(hl.pass_pending());
        hl.poll(&mut buf, t1 + ms(100)).unwrap();
        assert!(buf.spans_for_line(0).is_empty());
    }

    #[test]
    fn test_reload_failure_keeps_previous_rules() {
        let mut hl = test_highlighter();
        let mut buf = TextBuffer::from_text("IF x THEN");
        let t0 = Instant::now();
        paint(&mut hl, &mut buf, 0, 0, t0);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let t1 = t0 + ms(1000);
        assert!(hl.reload_rules(&path, t1).is_err());
        // the old rules still drive the next pass
        let edit = buf.insert(0, "IF ");
        hl.notify_edit(&buf, edit, t1);
        hl.poll(&mut buf, t1 + ms(100)).unwrap();
        assert_eq!(buf.spans_for_line(0).len(), 3);
    }

    #[test]
    fn test_runaway_line_keeps_previous_styling() {
        let letters = "abcdefghijk";
        let patterns: Vec<String> = letters
            .chars()
            .map(|c| format!(r#"{{ "match": "{c}", "color": "red" }}"#))
            .collect();
        let json = format!(r#"{{ "patterns": [ {} ] }}"#, patterns.join(","));
        let mut hl = Highlighter::with_debounce(parse_rule_set(&json).unwrap(), ms(100));
        let mut buf = TextBuffer::from_text(&format!("ok\n{}", letters.repeat(1000)));
        let t0 = Instant::now();

        let report = paint(&mut hl, &mut buf, 0, 1, t0);
        assert_eq!(report.lines_processed, 2);
        // the overflowing line keeps what it had (nothing) instead of a
        // truncated paint
        assert!(buf.spans_for_line(1).is_empty());
        assert_eq!(buf.spans_for_line(0).len(), 1); // the k in "ok"

        // it stays unhighlighted, so the next pass retries it
        let report = paint(&mut hl, &mut buf, 0, 1, t0 + ms(1000));
        assert_eq!(report.lines_processed, 1);
    }

    #[test]
    fn test_entry_state_resolves_from_checkpoint() {
        let mut hl = test_highlighter();
        let lines = ["/* open", "inside", "still */", "IF x THEN", "tail"];
        let mut buf = TextBuffer::from_text(&lines.join("\n"));
        let t0 = Instant::now();
        paint(&mut hl, &mut buf, 0, 4, t0);

        // editing line 3 resolves its entry state from the cached line 3
        // entry, not by rescanning from the top
        let t1 = t0 + ms(1000);
        let offset = buf.to_text().find("IF x").unwrap();
        let edit = buf.insert(offset, "IF y ");
        hl.notify_edit(&buf, edit, t1);
        let report = hl.poll(&mut buf, t1 + ms(100)).unwrap();
        assert_eq!(report.lines_processed, 1);
        assert_eq!(buf.spans_for_line(3).len(), 3);
    }
}
