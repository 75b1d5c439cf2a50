//! Generic line rewrite engine.
//!
//! Scans a text stream line by line, matches each line against a set of
//! rules, and conditionally rewrites matched lines. Matching happens against
//! the trimmed line; handlers receive (and replacements substitute into) the
//! original untrimmed line, so indentation survives a rewrite and unmatched
//! lines pass through byte-for-byte.

use std::io::BufRead;

use regex::Regex;

use crate::error::{RewriteError, RewriteResult};

/// Handler invoked when a rule's pattern matches a line.
///
/// Receives the original untrimmed line, its 0-based index, and the text of
/// the pattern's single capture group. Returns `Some(replacement)` to rewrite
/// the line or `None` to keep it unchanged (match-for-detection-only).
pub type Handler<'a> = Box<dyn FnMut(&str, usize, &str) -> Option<String> + 'a>;

/// A pattern/handler pair used by [`rewrite`] to detect and optionally
/// transform lines.
pub struct Rule<'a> {
    pattern: Regex,
    handler: Handler<'a>,
}

impl<'a> Rule<'a> {
    /// Create a rule, enforcing the pattern contract up front: the regex must
    /// define exactly one capture group, the value the handler gets to
    /// consider or replace.
    pub fn new<F>(pattern: Regex, handler: F) -> RewriteResult<Self>
    where
        F: FnMut(&str, usize, &str) -> Option<String> + 'a,
    {
        // captures_len counts the implicit whole-match group.
        let groups = pattern.captures_len() - 1;
        if groups != 1 {
            return Err(RewriteError::invalid_pattern(pattern.as_str(), groups));
        }
        Ok(Self {
            pattern,
            handler: Box::new(handler),
        })
    }

    /// The rule's compiled pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

/// An ordered collection of rules.
///
/// Rules are tried in registration order and at most one rule fires per
/// line. Patterns are expected to be mutually exclusive per line; the engine
/// does not detect conflicts.
#[derive(Default)]
pub struct RuleSet<'a> {
    rules: Vec<Rule<'a>>,
}

impl<'a> RuleSet<'a> {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule to the set.
    pub fn register(&mut self, rule: Rule<'a>) {
        self.rules.push(rule);
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Scan `reader` line by line and rewrite lines matched by `rules`.
///
/// For each line, rules are tried in order against the trimmed line. The
/// first rule whose pattern matches fires: its handler decides whether the
/// line is replaced or kept, and no further rules are tried for that line.
/// Lines no rule matches are emitted unchanged. The output is all lines
/// joined with `\n`; an empty input yields an empty output.
///
/// The only failure modes are a read error from the stream and (at rule
/// construction, not here) a pattern without exactly one capture group.
pub fn rewrite<R: BufRead>(reader: R, rules: &mut RuleSet<'_>) -> RewriteResult<String> {
    let mut output: Vec<String> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(RewriteError::read)?;
        let trimmed = line.trim();

        let mut replacement = None;
        for rule in &mut rules.rules {
            if let Some(caps) = rule.pattern.captures(trimmed) {
                let value = caps.get(1).map_or("", |group| group.as_str());
                replacement = (rule.handler)(&line, index, value);
                break;
            }
        }

        output.push(replacement.unwrap_or(line));
    }

    Ok(output.join("\n"))
}
