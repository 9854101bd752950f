//! Comment stripping for the regex-driven scanners.
//!
//! This is a best-effort pass, not a lexer: quoted strings and template
//! literals are skipped so comment markers inside them survive, but regex
//! literals containing `//` or `/*` are not recognised.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Alternation order matters: string literals are consumed before comments.
static COMMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"("(?:\\.|[^"\\\n])*"|'(?:\\.|[^'\\\n])*'|`(?:\\.|[^`\\])*`)|//[^\n]*|/\*[\s\S]*?\*/"#,
    )
    .expect("Invalid regex pattern for comment stripping")
});

static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n(?:[ \t]*\r?\n){2,}").expect("Invalid regex pattern for blank line runs")
});

/// Removes `//` and `/* */` comments, then collapses blank-line runs.
pub fn strip_comments(code: &str) -> String {
    let stripped = COMMENT_RE.replace_all(code, |caps: &Captures| {
        caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default()
    });
    collapse_blank_lines(&stripped)
}

/// Collapses two or more consecutive blank lines into a single blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").into_owned()
}
