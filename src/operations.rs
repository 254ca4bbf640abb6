//! Critique-to-operation parsing.
//!
//! Extracts structured edit operations from the free-form critique text
//! returned by the text generator. The generator's output is untrusted:
//! matches that look truncated, contaminated by echoed formatting
//! instructions, or empty are silently discarded as expected noise.

use regex::Regex;

use std::fmt;
use std::sync::LazyLock;

// ---------------------------------------------------------------------------
// Operation types
// ---------------------------------------------------------------------------

/// The kind of edit an operation performs, with its optional target index.
///
/// `Add` never carries an index — any index the generator attaches to an ADD
/// line is stripped during parsing. The other three keep the generator's
/// claimed index verbatim; reconciliation decides whether to trust it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationKind {
    Add,
    Remove(Option<usize>),
    Edit(Option<usize>),
    Agree(Option<usize>),
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "ADD"),
            Self::Remove(None) => write!(f, "REMOVE"),
            Self::Remove(Some(index)) => write!(f, "REMOVE {index}"),
            Self::Edit(None) => write!(f, "EDIT"),
            Self::Edit(Some(index)) => write!(f, "EDIT {index}"),
            Self::Agree(None) => write!(f, "AGREE"),
            Self::Agree(Some(index)) => write!(f, "AGREE {index}"),
        }
    }
}

/// A parsed edit instruction: the operation kind plus its insight text.
///
/// Operations are ephemeral — produced per critique round, consumed by
/// reconciliation, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub text: String,
}

impl Operation {
    pub fn new(kind: OperationKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.text)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Matches `OPERATION[ index]: [optional-label:] description` segments.
///
/// The optional label group swallows a leading `Insight:`-style tag some
/// generators prepend to the description.
static OPERATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:REMOVE|EDIT|ADD|AGREE)(?: \d+)?): (?:[a-zA-Z\s\d]+: )?(.*)").unwrap()
});

/// Tokens that signal the description text itself got contaminated with
/// operation formatting (the generator echoing instructions or stacking
/// several operations into one line).
const BANNED_TOKENS: &[&str] = &["ADD", "AGREE", "EDIT"];

/// Extract edit operations from raw critique text, in textual order.
///
/// A match survives only if its description is non-empty after trimming,
/// contains none of the banned operation tokens, and ends with a period
/// (guarding against truncated generations). Everything else is dropped
/// without error — noise is expected from a free-form generator.
pub fn parse_operations(critique: &str) -> Vec<Operation> {
    let mut operations = Vec::new();

    for captures in OPERATION_PATTERN.captures_iter(critique) {
        let header = &captures[1];
        let text = captures[2].trim();

        if text.is_empty() {
            continue;
        }
        if BANNED_TOKENS.iter().any(|token| text.contains(token)) {
            continue;
        }
        if !text.ends_with('.') {
            continue;
        }

        let Some(kind) = parse_kind(header) else {
            continue;
        };
        operations.push(Operation::new(kind, text));
    }

    operations
}

/// Turn a matched operation header (`"EDIT 2"`, `"ADD"`) into a typed kind.
fn parse_kind(header: &str) -> Option<OperationKind> {
    let mut parts = header.split_whitespace();
    let verb = parts.next()?;
    let index = parts.next().and_then(|raw| raw.parse::<usize>().ok());

    match verb {
        "ADD" => Some(OperationKind::Add),
        "REMOVE" => Some(OperationKind::Remove(index)),
        "EDIT" => Some(OperationKind::Edit(index)),
        "AGREE" => Some(OperationKind::Agree(index)),
        _ => None,
    }
}
