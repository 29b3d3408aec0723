//! Compiled highlighting rules and the per-line tokenizer
//!
//! A [`RuleSet`] is an ordered list of flat pattern rules plus an optional
//! pair of block-comment boundary patterns. Rule order is match priority;
//! the block comment construct behaves as an implicit rule 0 and wins over
//! every flat rule.

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::error::{HighlightError, Result};
use crate::style::{Span, Style};

/// Matches for a single rule on a single line stop after this many
pub const MAX_MATCHES_PER_RULE: usize = 1000;

/// A line keeps its previous styling once it accumulates this many spans
pub const MAX_SPANS_PER_LINE: usize = 10_000;

/// A single flat pattern rule
pub struct Rule {
    /// Pattern source text, kept for diagnostics
    pub name: String,
    /// Compiled regex
    pub pattern: Regex,
    /// Style assigned to matches
    pub style: Style,
    /// Whether the pattern was compiled case-insensitively
    pub case_insensitive: bool,
}

impl Rule {
    /// Compile a rule. Case-insensitivity is baked into the regex here,
    /// never applied per match.
    pub fn new(pattern: &str, style: Style, case_insensitive: bool) -> Result<Self> {
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| HighlightError::BadPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            name: pattern.to_string(),
            pattern: compiled,
            style,
            case_insensitive,
        })
    }
}

/// An immutable, ordered set of highlighting rules
///
/// Replaced wholesale on reload; never mutated in place.
pub struct RuleSet {
    rules: Vec<Rule>,
    block_comment_start: Option<Regex>,
    block_comment_end: Option<Regex>,
}

impl RuleSet {
    /// Create a rule set. Block comment handling requires both boundary
    /// patterns; if either is missing the pair is dropped.
    pub fn new(
        rules: Vec<Rule>,
        block_comment_start: Option<Regex>,
        block_comment_end: Option<Regex>,
    ) -> Self {
        let (start, end) = match (block_comment_start, block_comment_end) {
            (Some(s), Some(e)) => (Some(s), Some(e)),
            _ => (None, None),
        };
        Self {
            rules,
            block_comment_start: start,
            block_comment_end: end,
        }
    }

    /// An empty rule set: no flat rules, no block comments
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            block_comment_start: None,
            block_comment_end: None,
        }
    }

    /// The flat rules, in priority order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether block comment boundaries are available
    pub fn block_comments_enabled(&self) -> bool {
        self.block_comment_start.is_some() && self.block_comment_end.is_some()
    }

    /// Style used for block comment spans: the first flat rule's style
    pub fn comment_style(&self) -> Style {
        self.rules.first().map(|r| r.style).unwrap_or_default()
    }
}

/// Result of tokenizing a single line
#[derive(Debug)]
pub struct LineHighlight {
    /// Non-overlapping spans, sorted by start column
    pub spans: Vec<Span>,
    /// Whether the line ends inside a block comment
    pub exit_state: bool,
}

/// Tokenize one line
///
/// `starts_in_comment` is the carried-over state from the preceding line.
/// At most one block comment region is recognized per line: either the tail
/// of a comment carried in from above, or the first start-boundary match and
/// whatever follows it. Flat rules then run in priority order over the line,
/// and a candidate match that overlaps any accepted span is discarded rather
/// than truncated.
pub fn highlight_line(
    rules: &RuleSet,
    line: usize,
    text: &str,
    starts_in_comment: bool,
) -> Result<LineHighlight> {
    let mut ranges: Vec<(usize, usize, Style)> = Vec::new();
    let mut in_comment = starts_in_comment && rules.block_comments_enabled();

    if let (Some(start_re), Some(end_re)) =
        (&rules.block_comment_start, &rules.block_comment_end)
    {
        let comment_style = rules.comment_style();

        if in_comment {
            match end_re.find(text) {
                Some(m) => {
                    push_range(&mut ranges, 0, m.end(), comment_style);
                    in_comment = false;
                }
                None => {
                    push_range(&mut ranges, 0, text.len(), comment_style);
                }
            }
        } else if let Some(start_m) = start_re.find(text) {
            let start = start_m.start();
            match end_re.find_at(text, start) {
                Some(end_m) => {
                    push_range(&mut ranges, start, end_m.end(), comment_style);
                }
                None => {
                    push_range(&mut ranges, start, text.len(), comment_style);
                    in_comment = true;
                }
            }
        }
    }

    // Flat rules only apply when the line does not end inside a comment;
    // overlap suppression keeps them out of the comment region.
    if !in_comment {
        for rule in rules.rules() {
            let mut match_count = 0;
            for m in rule.pattern.find_iter(text) {
                if match_count >= MAX_MATCHES_PER_RULE {
                    warn!(
                        pattern = %rule.name,
                        line,
                        limit = MAX_MATCHES_PER_RULE,
                        "match limit reached, dropping remaining matches"
                    );
                    break;
                }
                match_count += 1;
                let (start, end) = (m.start(), m.end());
                if start == end {
                    continue;
                }
                let overlaps = ranges
                    .iter()
                    .any(|&(r_start, r_end, _)| start < r_end && end > r_start);
                if !overlaps {
                    push_range(&mut ranges, start, end, rule.style);
                }
                if ranges.len() > MAX_SPANS_PER_LINE {
                    return Err(HighlightError::RunawayMatch {
                        line,
                        count: ranges.len(),
                    });
                }
            }
        }
    }

    ranges.sort_by_key(|r| r.0);
    Ok(LineHighlight {
        spans: to_char_spans(text, &ranges),
        exit_state: in_comment,
    })
}

/// Propagate block-comment state across one line without producing spans
///
/// Mirrors the comment handling in [`highlight_line`] exactly; the two must
/// agree or cached entry states would drift from what a real pass computes.
pub fn scan_state(rules: &RuleSet, text: &str, starts_in_comment: bool) -> bool {
    let (Some(start_re), Some(end_re)) =
        (&rules.block_comment_start, &rules.block_comment_end)
    else {
        return false;
    };

    if starts_in_comment {
        return end_re.find(text).is_none();
    }
    match start_re.find(text) {
        Some(m) => end_re.find_at(text, m.start()).is_none(),
        None => false,
    }
}

fn push_range(ranges: &mut Vec<(usize, usize, Style)>, start: usize, end: usize, style: Style) {
    if start < end {
        ranges.push((start, end, style));
    }
}

/// Convert sorted, non-overlapping byte ranges to char-column spans
fn to_char_spans(text: &str, ranges: &[(usize, usize, Style)]) -> Vec<Span> {
    let mut spans = Vec::with_capacity(ranges.len());
    let mut col = 0usize;
    let mut byte = 0usize;
    let mut chars = text.chars();
    let mut advance_to = |target: usize, col: &mut usize, byte: &mut usize| {
        while *byte < target {
            match chars.next() {
                Some(c) => {
                    *byte += c.len_utf8();
                    *col += 1;
                }
                None => break,
            }
        }
        *col
    };
    for &(start, end, style) in ranges {
        let start_col = advance_to(start, &mut col, &mut byte);
        let end_col = advance_to(end, &mut col, &mut byte);
        if start_col < end_col {
            spans.push(Span::new(start_col, end_col, style));
        }
    }
    spans
}
