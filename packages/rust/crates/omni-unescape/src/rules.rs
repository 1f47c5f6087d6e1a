//! Backslash substitution rules.
//!
//! Three passes, always in this order, each over the output of the previous:
//!
//! 1. `\` directly before `\n` is dropped (the newline stays).
//! 2. `\'` becomes `'` and `\"` becomes `"`.
//! 3. `\[` becomes `[` and `\]` becomes `]`.
//!
//! Only a backslash *adjacent* to the newline counts for rule 1, so
//! `"a\\ \nb"` is left alone. Rules 2 and 3 are plain substring replacements.

use std::sync::LazyLock;

use regex::Regex;

/// Backslash immediately followed by a line feed.
static LINE_CONTINUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\\n").unwrap_or_else(|err| panic!("invalid LINE_CONTINUATION regex: {err}"))
});

const QUOTE_ESCAPES: [(&str, &str); 2] = [("\\'", "'"), ("\\\"", "\"")];
const BRACKET_ESCAPES: [(&str, &str); 2] = [("\\[", "["), ("\\]", "]")];

/// Result of running the substitution rules over one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// Text after all three rules.
    pub text: String,
    /// Whether `text` differs from the input.
    pub changed: bool,
    /// Rule 1 matches removed.
    pub line_continuations: usize,
    /// Rule 2 matches replaced.
    pub escaped_quotes: usize,
    /// Rule 3 matches replaced.
    pub escaped_brackets: usize,
}

impl Transformed {
    /// Total replacements across all rules.
    #[must_use]
    pub fn replacements(&self) -> usize {
        self.line_continuations + self.escaped_quotes + self.escaped_brackets
    }
}

/// Apply the three rules to `text`.
///
/// Total over any input; text without backslashes comes back unchanged with
/// `changed == false`.
#[must_use]
pub fn transform(text: &str) -> Transformed {
    // Fast path: every rule needs a backslash.
    if !text.contains('\\') {
        return Transformed {
            text: text.to_string(),
            changed: false,
            line_continuations: 0,
            escaped_quotes: 0,
            escaped_brackets: 0,
        };
    }

    let line_continuations = LINE_CONTINUATION.find_iter(text).count();
    let mut out = LINE_CONTINUATION.replace_all(text, "\n").into_owned();

    let escaped_quotes = replace_literals(&mut out, &QUOTE_ESCAPES);
    let escaped_brackets = replace_literals(&mut out, &BRACKET_ESCAPES);

    let changed = out != text;
    Transformed {
        text: out,
        changed,
        line_continuations,
        escaped_quotes,
        escaped_brackets,
    }
}

/// Replace each `(from, to)` pair in sequence, returning the number of hits.
fn replace_literals(text: &mut String, pairs: &[(&str, &str)]) -> usize {
    let mut hits = 0;
    for &(from, to) in pairs {
        let n = text.matches(from).count();
        if n > 0 {
            *text = text.replace(from, to);
            hits += n;
        }
    }
    hits
}
