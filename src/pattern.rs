//! Rewrite of Perl-style (source dialect) regular expressions into patterns
//! valid for a JSON Schema `pattern` (ECMAScript dialect).
//!
//! The source text is parsed into a [`RegexNode`] tree and printed back out;
//! grouping that the tree carries implicitly is made explicit in the output:
//! - a quantified compound (or multi-character literal) gets `(?:...)`
//! - an alternation inside a concatenation gets `(?:...)`
//! - `.` under the dot-matches-newline flag becomes `[\s\S]`
pub mod node;

use std::fmt::{self, Write};

use regex::Regex;
use regex_syntax::ast::parse::Parser;

use crate::context::Context;
use crate::error::{Error, Result};

pub use node::{Op, RegexNode};

/// Parse a source-dialect pattern.
pub fn parse(ctx: &Context, pattern: &str) -> Result<RegexNode> {
    let ast = Parser::new().parse(pattern).map_err(|source| {
        ctx.fail(Error::InvalidPattern {
            pattern: pattern.to_string(),
            source: Box::new(source),
        })
    })?;
    Ok(RegexNode::from_ast(&ast))
}

/// Rewrite a source-dialect pattern into an equivalent ECMAScript pattern.
pub fn to_ecmascript(ctx: &Context, pattern: &str) -> Result<String> {
    ctx.trace("to_ecmascript");
    Ok(parse(ctx, pattern)?.to_string())
}

/// Whether `pattern` matches the empty string, using the source engine.
pub fn matches_empty_string(ctx: &Context, pattern: &str) -> Result<bool> {
    ctx.trace("matches_empty_string");
    let regex = Regex::new(pattern).map_err(|source| {
        ctx.fail(Error::EmptyMatchProbe {
            pattern: pattern.to_string(),
            source: Box::new(source),
        })
    })?;
    Ok(regex.is_match(""))
}

/// Escape `text` so it matches itself literally in both dialects.
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a `String` cannot fail.
    let _ = write_escaped(&mut out, text);
    out
}

fn write_escaped<W: Write>(w: &mut W, text: &str) -> fmt::Result {
    for c in text.chars() {
        match c {
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$' => {
                w.write_char('\\')?;
                w.write_char(c)?;
            }
            '\t' => w.write_str(r"\t")?,
            '\n' => w.write_str(r"\n")?,
            '\r' => w.write_str(r"\r")?,
            '\x0B' => w.write_str(r"\v")?,
            '\x0C' => w.write_str(r"\f")?,
            c if c.is_control() => write!(w, "\\u{:04X}", c as u32)?,
            c => w.write_char(c)?,
        }
    }
    Ok(())
}

impl fmt::Display for RegexNode {
    /// Prints the node in the ECMAScript dialect.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ecmascript(f, self)
    }
}

fn write_ecmascript<W: Write>(w: &mut W, node: &RegexNode) -> fmt::Result {
    match node {
        RegexNode::Empty => Ok(()),
        RegexNode::Literal(text) => write_escaped(w, text),
        RegexNode::Class(text) | RegexNode::Verbatim(text) => w.write_str(text),
        RegexNode::AnyCharNotNL => w.write_str("."),
        // ECMAScript `.` never matches a newline without the `s` flag.
        RegexNode::AnyChar => w.write_str(r"[\s\S]"),
        RegexNode::BeginLine | RegexNode::BeginText => w.write_str("^"),
        RegexNode::EndLine | RegexNode::EndText => w.write_str("$"),
        RegexNode::Capture(sub) => {
            w.write_char('(')?;
            write_ecmascript(w, sub)?;
            w.write_char(')')
        }
        RegexNode::Star { sub, greedy } => {
            write_quantified(w, sub)?;
            w.write_char('*')?;
            write_laziness(w, *greedy)
        }
        RegexNode::Plus { sub, greedy } => {
            write_quantified(w, sub)?;
            w.write_char('+')?;
            write_laziness(w, *greedy)
        }
        RegexNode::Quest { sub, greedy } => {
            write_quantified(w, sub)?;
            w.write_char('?')?;
            write_laziness(w, *greedy)
        }
        RegexNode::Repeat { sub, min, max, greedy } => {
            write_quantified(w, sub)?;
            write!(w, "{{{min}")?;
            if *max != Some(*min) {
                w.write_char(',')?;
                if let Some(max) = max {
                    write!(w, "{max}")?;
                }
            }
            w.write_char('}')?;
            write_laziness(w, *greedy)
        }
        RegexNode::Concat(subs) => {
            for sub in subs {
                if sub.op() == Op::Alternate {
                    write_group(w, sub)?;
                } else {
                    write_ecmascript(w, sub)?;
                }
            }
            Ok(())
        }
        RegexNode::Alternate(subs) => {
            for (i, sub) in subs.iter().enumerate() {
                if i > 0 {
                    w.write_char('|')?;
                }
                write_ecmascript(w, sub)?;
            }
            Ok(())
        }
    }
}

fn write_quantified<W: Write>(w: &mut W, sub: &RegexNode) -> fmt::Result {
    let compound = match sub {
        RegexNode::Empty => true,
        // Counted in UTF-16 units: a non-BMP character is a surrogate pair
        // to an engine without the `u` flag.
        RegexNode::Literal(text) => text.encode_utf16().count() > 1,
        other => other.op() > Op::Capture,
    };
    if compound {
        write_group(w, sub)
    } else {
        write_ecmascript(w, sub)
    }
}

fn write_group<W: Write>(w: &mut W, sub: &RegexNode) -> fmt::Result {
    w.write_str("(?:")?;
    write_ecmascript(w, sub)?;
    w.write_char(')')
}

fn write_laziness<W: Write>(w: &mut W, greedy: bool) -> fmt::Result {
    if greedy { Ok(()) } else { w.write_char('?') }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(pattern: &str) -> String {
        to_ecmascript(&Context::default(), pattern).unwrap()
    }

    #[test]
    fn restores_alternation_grouping_in_concat() {
        assert_eq!(rewrite("x(?:a|b)y"), "x(?:a|b)y");
        assert_eq!(rewrite("^(?:foo|bar)$"), "^(?:foo|bar)$");
        assert_eq!(rewrite("a|bc|"), "a|bc|");
    }

    #[test]
    fn groups_quantified_compounds() {
        assert_eq!(rewrite("ab*"), "ab*");
        assert_eq!(rewrite("(?:ab)+"), "(?:ab)+");
        assert_eq!(rewrite("(ab)+"), "(ab)+");
        assert_eq!(rewrite("(?:a|b){3}"), "(?:a|b){3}");
        assert_eq!(rewrite("(?:a*)+"), "(?:a*)+");
        assert_eq!(rewrite(r"[a-z]+\d{1,3}"), r"[a-z]+\d{1,3}");
    }

    #[test]
    fn groups_quantified_astral_characters() {
        assert_eq!(rewrite(r"\x{1F600}+"), "(?:\u{1F600})+");
        assert_eq!(rewrite(r"\x{E9}+"), "\u{E9}+");
    }

    #[test]
    fn spells_out_posix_classes() {
        assert_eq!(rewrite("[[:alpha:]]+"), "[A-Za-z]+");
        assert_eq!(rewrite("x[[:^digit:]]{2}"), "x[^0-9]{2}");
    }

    #[test]
    fn keeps_escaped_whitespace_under_extended_mode() {
        let rewritten = rewrite(r"(?x)a\ b");
        assert_eq!(rewritten, r"(?x)a\u0020b");
        let regex = Regex::new(&rewritten).unwrap();
        assert!(regex.is_match("a b"));
        assert!(!regex.is_match("ab"));
    }

    #[test]
    fn renders_repeat_bounds() {
        assert_eq!(rewrite("a{2}"), "a{2}");
        assert_eq!(rewrite("a{2,}"), "a{2,}");
        assert_eq!(rewrite("a{2,5}"), "a{2,5}");
        assert_eq!(rewrite("a{2,5}?"), "a{2,5}?");
        assert_eq!(rewrite("a*?b+?c??"), "a*?b+?c??");
    }

    #[test]
    fn rewrites_anchors_and_dots() {
        assert_eq!(rewrite(r"\Aabc\z"), "^abc$");
        assert_eq!(rewrite("^a.c$"), "^a.c$");
        assert_eq!(rewrite("(?s)a.c"), r"a[\s\S]c");
        assert_eq!(rewrite("(?s:.)."), r"[\s\S].");
    }

    #[test]
    fn keeps_escapes_and_unknown_constructs() {
        assert_eq!(rewrite(r"\.\+x"), r"\.\+x");
        assert_eq!(rewrite(r"a\nb"), r"a\nb");
        assert_eq!(rewrite("(?i)abc"), "(?i)abc");
        assert_eq!(rewrite(r"\bword\b"), r"\bword\b");
    }

    #[test]
    fn rejects_malformed_pattern() {
        let err = to_ecmascript(&Context::default(), "(abc").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "(abc"));
    }

    #[test]
    fn probes_empty_match() {
        let ctx = Context::default();
        assert!(matches_empty_string(&ctx, "a*").unwrap());
        assert!(matches_empty_string(&ctx, "^$").unwrap());
        assert!(matches_empty_string(&ctx, "x|").unwrap());
        assert!(!matches_empty_string(&ctx, "a+").unwrap());
        assert!(!matches_empty_string(&ctx, "^.$").unwrap());
    }

    #[test]
    fn empty_probe_fails_where_the_engine_rejects() {
        let ctx = Context::default();
        assert_eq!(to_ecmascript(&ctx, r"\p{Bogus}").unwrap(), r"\p{Bogus}");
        let err = matches_empty_string(&ctx, r"\p{Bogus}").unwrap_err();
        assert!(matches!(err, Error::EmptyMatchProbe { .. }));
    }

    #[test]
    fn escapes_literal_text() {
        assert_eq!(escape_literal("a.b*c"), r"a\.b\*c");
        assert_eq!(escape_literal("(x)|[y]{z}^$"), r"\(x\)\|\[y\]\{z\}\^\$");
        assert_eq!(escape_literal("tab\there"), r"tab\there");
        assert_eq!(escape_literal("a-b/c#d"), "a-b/c#d");
        assert_eq!(escape_literal("\u{1}"), r"\u0001");
    }
}
