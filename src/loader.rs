//! Rule description loading
//!
//! The rule description is a JSON document:
//!
//! ```json
//! {
//!   "block_comment_start": "/\\*",
//!   "block_comment_end": "\\*/",
//!   "patterns": [
//!     { "match": "'.*$", "color": "#6a9955", "italic": true },
//!     { "match": "\\b(if|then)\\b", "color": "blue", "bold": true,
//!       "case_insensitive": true }
//!   ]
//! }
//! ```
//!
//! A malformed individual rule is skipped with a warning; only a corrupt
//! document as a whole fails the load. A missing file is seeded from the
//! bundled default description.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::{info, warn};

use crate::builtin;
use crate::error::{HighlightError, Result};
use crate::rules::{Rule, RuleSet};
use crate::style::{Color, Style};

/// Boundary patterns used when the description omits them
const DEFAULT_BLOCK_START: &str = r"/\*";
const DEFAULT_BLOCK_END: &str = r"\*/";

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    block_comment_start: Option<String>,
    #[serde(default)]
    block_comment_end: Option<String>,
    #[serde(default)]
    patterns: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
struct RuleEntry {
    #[serde(rename = "match")]
    pattern: String,
    color: String,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    case_insensitive: bool,
}

/// Parse a rule description from JSON text
///
/// Individual bad rules are skipped; an unparseable document is a
/// [`HighlightError::Config`].
pub fn parse_rule_set(json: &str) -> Result<RuleSet> {
    let file: RuleFile =
        serde_json::from_str(json).map_err(|e| HighlightError::Config(e.to_string()))?;

    let start_pattern = file
        .block_comment_start
        .as_deref()
        .unwrap_or(DEFAULT_BLOCK_START);
    let end_pattern = file
        .block_comment_end
        .as_deref()
        .unwrap_or(DEFAULT_BLOCK_END);

    let block_start = compile_boundary(start_pattern, "block_comment_start");
    let block_end = compile_boundary(end_pattern, "block_comment_end");
    if block_start.is_none() || block_end.is_none() {
        warn!("block comment handling disabled for this rule set");
    }

    let mut rules = Vec::with_capacity(file.patterns.len());
    for entry in &file.patterns {
        match compile_rule(entry) {
            Ok(rule) => rules.push(rule),
            Err(e) => warn!(pattern = %entry.pattern, "skipping rule: {e}"),
        }
    }

    Ok(RuleSet::new(rules, block_start, block_end))
}

/// Load a rule description from a file
pub fn load_rule_file(path: &Path) -> Result<RuleSet> {
    let contents = fs::read_to_string(path)?;
    parse_rule_set(&contents)
}

/// Load a rule description, seeding the bundled default if the file is
/// missing
///
/// The seeded copy lets users edit the defaults in place, matching how the
/// surrounding application manages its rule file.
pub fn load_or_seed(path: &Path) -> Result<RuleSet> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, builtin::DEFAULT_RULES)?;
        info!(path = %path.display(), "seeded default rule description");
    }
    load_rule_file(path)
}

fn compile_boundary(pattern: &str, which: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(pattern, "invalid {which} pattern: {e}");
            None
        }
    }
}

fn compile_rule(entry: &RuleEntry) -> Result<Rule> {
    let color = Color::parse(&entry.color).ok_or_else(|| HighlightError::BadPattern {
        pattern: entry.pattern.clone(),
        message: format!("unknown color '{}'", entry.color),
    })?;
    let mut style = Style::fg(color);
    if entry.bold {
        style = style.with_bold();
    }
    if entry.italic {
        style = style.with_italic();
    }
    Rule::new(&entry.pattern, style, entry.case_insensitive)
}
