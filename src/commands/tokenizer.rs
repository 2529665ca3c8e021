//! Line tokenizer for the console protocol.
//!
//! Tokenization is deliberately minimal: no quoting, no escapes, no flags.
//! A line is trimmed and split on single spaces, so `"a  b"` yields an empty
//! token between `a` and `b`.

use std::fmt;

/// A non-empty input line split into a command name and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// First token; looked up in the registry.
    pub command: String,
    /// Remaining tokens, in order.
    pub args: Vec<String>,
}

impl ParsedLine {
    /// Returns every token, command name first.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.command.as_str()).chain(self.args.iter().map(String::as_str))
    }
}

/// Renders the tokens the way the unknown-command notice shows them: `[a b c]`.
impl fmt::Display for ParsedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.tokens().collect::<Vec<_>>().join(" "))
    }
}

/// Tokenizes one input line.
///
/// Returns `None` when the line is empty after trimming surrounding whitespace.
pub fn tokenize(line: &str) -> Option<ParsedLine> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut tokens = line.split(' ').map(str::to_string);
    let command = tokens.next()?;
    Some(ParsedLine {
        command,
        args: tokens.collect(),
    })
}
