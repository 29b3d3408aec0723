//! relight - incremental rule-driven syntax highlighting
//!
//! A highlighting engine for line-based editors: flat ordered regex rules
//! plus a block-comment construct whose state is carried across line
//! boundaries. Edits and scrolls are debounced into passes that touch only
//! the affected lines plus the visible region, and style writes never show
//! up in the document's undo history or modified flag.
//!
//! The engine owns no text and no widget. Hosts implement [`Document`],
//! feed edit notifications and viewport ranges to a [`Highlighter`], and
//! poll it from their event loop:
//!
//! ```
//! use std::time::Instant;
//! use relight::{builtin, Highlighter, LineRange, TextBuffer};
//!
//! let mut doc = TextBuffer::from_text("IF x THEN\n' a comment");
//! let mut engine = Highlighter::new(builtin::default_rule_set());
//!
//! let now = Instant::now();
//! engine.notify_scroll(LineRange::new(0, 1), now);
//! // ...later, once the debounce interval has elapsed:
//! engine.poll(&mut doc, now + std::time::Duration::from_millis(500));
//! ```

mod buffer;
mod changes;
mod document;
mod engine;
mod error;
mod line_store;
mod rules;
mod scheduler;
mod style;

pub mod builtin;
pub mod loader;

pub use buffer::TextBuffer;
pub use changes::{ChangeTracker, DirtyRange};
pub use document::{Document, Edit, LineRange};
pub use engine::{Highlighter, PassReport};
pub use error::{HighlightError, Result};
pub use line_store::{LineEntry, LineStore};
pub use rules::{
    highlight_line, scan_state, LineHighlight, Rule, RuleSet, MAX_MATCHES_PER_RULE,
    MAX_SPANS_PER_LINE,
};
pub use scheduler::{Scheduler, DEFAULT_DEBOUNCE};
pub use style::{Color, Span, Style};
