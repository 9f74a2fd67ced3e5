use std::fmt::Write;

use regex_syntax::ast::print::Printer;
use regex_syntax::ast::{
    AssertionKind, Ast, ClassSet, ClassSetItem, Flag, Flags, FlagsItemKind, GroupKind,
    RepetitionKind, RepetitionRange,
};
use regex_syntax::hir::translate::Translator;
use regex_syntax::hir::{self, ClassUnicode, HirKind};

/// Operator tag of a [`RegexNode`], ordered by structural rank: everything
/// after `Capture` is a compound that needs explicit grouping when quantified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Op {
    Empty,
    Literal,
    Class,
    AnyCharNotNL,
    AnyChar,
    BeginLine,
    EndLine,
    BeginText,
    EndText,
    Verbatim,
    Capture,
    Star,
    Plus,
    Quest,
    Repeat,
    Concat,
    Alternate,
}

/// Source-dialect regex tree. Parents own their children.
#[derive(Debug, Clone, PartialEq)]
pub enum RegexNode {
    /// Matches the empty string.
    Empty,
    /// A run of literal characters, unescaped.
    Literal(String),
    /// A character class in a spelling both dialects read (`[a-z]`, `\d`,
    /// `\pL`).
    Class(String),
    AnyCharNotNL,
    AnyChar,
    BeginLine,
    EndLine,
    BeginText,
    EndText,
    /// Any other construct, kept in its source spelling.
    Verbatim(String),
    Capture(Box<RegexNode>),
    Star { sub: Box<RegexNode>, greedy: bool },
    Plus { sub: Box<RegexNode>, greedy: bool },
    Quest { sub: Box<RegexNode>, greedy: bool },
    /// `max: None` is unbounded.
    Repeat { sub: Box<RegexNode>, min: u32, max: Option<u32>, greedy: bool },
    Concat(Vec<RegexNode>),
    Alternate(Vec<RegexNode>),
}

impl RegexNode {
    pub fn op(&self) -> Op {
        match self {
            Self::Empty => Op::Empty,
            Self::Literal(_) => Op::Literal,
            Self::Class(_) => Op::Class,
            Self::AnyCharNotNL => Op::AnyCharNotNL,
            Self::AnyChar => Op::AnyChar,
            Self::BeginLine => Op::BeginLine,
            Self::EndLine => Op::EndLine,
            Self::BeginText => Op::BeginText,
            Self::EndText => Op::EndText,
            Self::Verbatim(_) => Op::Verbatim,
            Self::Capture(_) => Op::Capture,
            Self::Star { .. } => Op::Star,
            Self::Plus { .. } => Op::Plus,
            Self::Quest { .. } => Op::Quest,
            Self::Repeat { .. } => Op::Repeat,
            Self::Concat(_) => Op::Concat,
            Self::Alternate(_) => Op::Alternate,
        }
    }

    /// Build a concatenation: nested concatenations are flattened, empty
    /// nodes dropped and adjacent literals merged into one run.
    pub fn concat(nodes: Vec<RegexNode>) -> Self {
        let mut out: Vec<RegexNode> = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                Self::Empty => {}
                Self::Concat(inner) => {
                    for n in inner {
                        push_merged(&mut out, n);
                    }
                }
                other => push_merged(&mut out, other),
            }
        }
        match out.len() {
            0 => Self::Empty,
            1 => out.remove(0),
            _ => Self::Concat(out),
        }
    }

    pub fn alternate(mut nodes: Vec<RegexNode>) -> Self {
        match nodes.len() {
            0 => Self::Empty,
            1 => nodes.remove(0),
            _ => Self::Alternate(nodes),
        }
    }

    /// Lower a parsed source-dialect syntax tree.
    pub fn from_ast(ast: &Ast) -> Self {
        lower(ast, &mut FlagScope::default())
    }
}

fn push_merged(out: &mut Vec<RegexNode>, node: RegexNode) {
    if let RegexNode::Literal(text) = &node {
        if let Some(RegexNode::Literal(run)) = out.last_mut() {
            run.push_str(text);
            return;
        }
    }
    out.push(node);
}

// Inline flags the lowering acts on. A scope belongs to the enclosing group
// and flows left to right through concatenations and alternation branches.
#[derive(Debug, Clone, Copy, Default)]
struct FlagScope {
    dot_nl: bool,
    extended: bool,
}

impl FlagScope {
    fn apply(&mut self, flags: &Flags) {
        if let Some(state) = flags.flag_state(Flag::DotMatchesNewLine) {
            self.dot_nl = state;
        }
        if let Some(state) = flags.flag_state(Flag::IgnoreWhitespace) {
            self.extended = state;
        }
    }
}

fn lower(ast: &Ast, scope: &mut FlagScope) -> RegexNode {
    match ast {
        Ast::Empty(_) => RegexNode::Empty,
        Ast::Flags(set) => {
            scope.apply(&set.flags);
            if only_dot_flag(&set.flags) {
                RegexNode::Empty
            } else {
                RegexNode::Verbatim(print(ast))
            }
        }
        Ast::Literal(literal) => {
            // Under `x` a bare space or `#` is insignificant, so these stay
            // escaped and out of literal runs.
            if scope.extended && (literal.c.is_whitespace() || literal.c == '#') {
                RegexNode::Verbatim(format!("\\u{:04X}", literal.c as u32))
            } else {
                RegexNode::Literal(literal.c.to_string())
            }
        }
        Ast::Dot(_) => {
            if scope.dot_nl {
                RegexNode::AnyChar
            } else {
                RegexNode::AnyCharNotNL
            }
        }
        Ast::Assertion(assertion) => match assertion.kind {
            AssertionKind::StartLine => RegexNode::BeginLine,
            AssertionKind::EndLine => RegexNode::EndLine,
            AssertionKind::StartText => RegexNode::BeginText,
            AssertionKind::EndText => RegexNode::EndText,
            _ => RegexNode::Verbatim(print(ast)),
        },
        Ast::ClassBracketed(class) if !set_is_portable(&class.kind) => class_from_ranges(ast),
        Ast::ClassUnicode(_) | Ast::ClassPerl(_) | Ast::ClassBracketed(_) => {
            RegexNode::Class(print(ast))
        }
        Ast::Repetition(repetition) => {
            let sub = Box::new(lower(&repetition.ast, scope));
            let greedy = repetition.greedy;
            match &repetition.op.kind {
                RepetitionKind::ZeroOrOne => RegexNode::Quest { sub, greedy },
                RepetitionKind::ZeroOrMore => RegexNode::Star { sub, greedy },
                RepetitionKind::OneOrMore => RegexNode::Plus { sub, greedy },
                RepetitionKind::Range(range) => {
                    let (min, max) = match range {
                        RepetitionRange::Exactly(n) => (*n, Some(*n)),
                        RepetitionRange::AtLeast(n) => (*n, None),
                        RepetitionRange::Bounded(m, n) => (*m, Some(*n)),
                    };
                    RegexNode::Repeat { sub, min, max, greedy }
                }
            }
        }
        Ast::Group(group) => match &group.kind {
            GroupKind::CaptureIndex(_) | GroupKind::CaptureName { .. } => {
                let mut inner = *scope;
                RegexNode::Capture(Box::new(lower(&group.ast, &mut inner)))
            }
            GroupKind::NonCapturing(flags) => {
                if !only_dot_flag(flags) {
                    return RegexNode::Verbatim(print(ast));
                }
                let mut inner = *scope;
                inner.apply(flags);
                lower(&group.ast, &mut inner)
            }
        },
        Ast::Alternation(alternation) => RegexNode::alternate(
            alternation.asts.iter().map(|ast| lower(ast, scope)).collect(),
        ),
        Ast::Concat(concat) => {
            RegexNode::concat(concat.asts.iter().map(|ast| lower(ast, scope)).collect())
        }
    }
}

fn only_dot_flag(flags: &Flags) -> bool {
    flags.items.iter().all(|item| {
        matches!(
            item.kind,
            FlagsItemKind::Negation | FlagsItemKind::Flag(Flag::DotMatchesNewLine)
        )
    })
}

// POSIX classes (`[:alpha:]`), nested brackets and set operations have no
// ECMAScript spelling.
fn set_is_portable(set: &ClassSet) -> bool {
    match set {
        ClassSet::BinaryOp(_) => false,
        ClassSet::Item(item) => item_is_portable(item),
    }
}

fn item_is_portable(item: &ClassSetItem) -> bool {
    match item {
        ClassSetItem::Ascii(_) | ClassSetItem::Bracketed(_) => false,
        ClassSetItem::Union(union) => union.items.iter().all(item_is_portable),
        _ => true,
    }
}

/// Spell a bracketed class out as the ranges it matches.
fn class_from_ranges(ast: &Ast) -> RegexNode {
    let source = print(ast);
    let Ok(hir) = Translator::new().translate(&source, ast) else {
        return RegexNode::Class(source);
    };
    match hir.kind() {
        HirKind::Class(hir::Class::Unicode(class)) => RegexNode::Class(render_ranges(class)),
        HirKind::Literal(hir::Literal(bytes)) => match std::str::from_utf8(bytes) {
            Ok(text) => RegexNode::Literal(text.to_string()),
            Err(_) => RegexNode::Class(source),
        },
        _ => RegexNode::Class(source),
    }
}

// A class reaching the end of the code space prints as the negation of its
// complement.
fn render_ranges(class: &ClassUnicode) -> String {
    let mut class = class.clone();
    let negated = class.ranges().last().is_some_and(|range| range.end() == char::MAX);
    if negated {
        class.negate();
    }
    let mut out = String::from(if negated { "[^" } else { "[" });
    for range in class.iter() {
        push_class_char(&mut out, range.start());
        if range.end() != range.start() {
            if u32::from(range.end()) > u32::from(range.start()) + 1 {
                out.push('-');
            }
            push_class_char(&mut out, range.end());
        }
    }
    out.push(']');
    out
}

fn push_class_char(out: &mut String, c: char) {
    match c {
        '\\' | '[' | ']' | '^' | '-' => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() || c.is_whitespace() => {
            let _ = write!(out, "\\u{:04X}", c as u32);
        }
        c => out.push(c),
    }
}

fn print(ast: &Ast) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = Printer::new().print(ast, &mut out);
    out
}
