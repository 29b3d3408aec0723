//! Bundled default rule description
//!
//! Seeded to disk when no rule file exists yet, so users always start from
//! a working description they can edit. The rules target a BASIC-flavored
//! language; the comment rule comes first because the block comment
//! construct borrows the first rule's style.

use crate::loader;
use crate::rules::RuleSet;

/// The default rule description, as shipped
pub const DEFAULT_RULES: &str = r##"{
  "block_comment_start": "/\\*",
  "block_comment_end": "\\*/",
  "patterns": [
    { "match": "('|;).*$", "color": "#6a9955", "italic": true },
    { "match": "\"[^\"]*\"", "color": "#ce9178" },
    { "match": "^\\s*#\\w+.*$", "color": "#c586c0" },
    { "match": "\\b(if|then|else|elseif|end\\s+if|select|case|end\\s+select|for|to|step|next|do|loop|while|wend|until|exit|sub|end\\s+sub|function|end\\s+function|dim|redim|as|let|const|goto|gosub|return|wait|repeat|and|or|xor|not)\\b", "color": "#569cd6", "bold": true, "case_insensitive": true },
    { "match": "\\b(byte|word|integer|long|single|string|bit)\\b", "color": "#4ec9b0", "case_insensitive": true },
    { "match": "\\b\\d+(\\.\\d+)?\\b", "color": "#b5cea8" },
    { "match": "0x[0-9a-fA-F]+", "color": "#b5cea8" }
  ]
}
"##;

/// Parse the bundled description into a rule set
///
/// The constant is known-good; if it ever fails to parse the engine runs
/// with an empty set rather than refusing to start.
pub fn default_rule_set() -> RuleSet {
    loader::parse_rule_set(DEFAULT_RULES).unwrap_or_else(|_| RuleSet::empty())
}
