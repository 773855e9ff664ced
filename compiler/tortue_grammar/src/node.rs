//! Rule node kinds.

use std::fmt;

use tortue_lexer::{TokenKind, WordChar};

use crate::RuleId;

/// One node of a grammar tree.
///
/// The set of kinds is closed; matching is a single `match` over this enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleNode {
    /// All children, in order. Fails at the first failing child and does not
    /// undo what earlier children consumed.
    Sequence(Vec<RuleId>),
    /// Children in declared order; the first success wins.
    Choice(Vec<RuleId>),
    /// `body` as a sequence, repeated between `min` and `max` times.
    /// `max: None` is unbounded.
    Repeat {
        min: u32,
        max: Option<u32>,
        body: Vec<RuleId>,
    },
    /// The next token's text, compared with the tokenizer's case sensitivity.
    Literal(String),
    /// One character of the current word.
    CharClass(CharClass),
    /// The next token's kind.
    Token(TokenKind),
    /// A named rule, bound to its node during resolution.
    Reference {
        name: String,
        target: Option<RuleId>,
    },
}

impl RuleNode {
    /// Direct children. References report none; follow `target` instead.
    pub fn children(&self) -> &[RuleId] {
        match self {
            RuleNode::Sequence(children) | RuleNode::Choice(children) => children,
            RuleNode::Repeat { body, .. } => body,
            RuleNode::Literal(_)
            | RuleNode::CharClass(_)
            | RuleNode::Token(_)
            | RuleNode::Reference { .. } => &[],
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            RuleNode::Sequence(_) => "sequence",
            RuleNode::Choice(_) => "choice",
            RuleNode::Repeat { .. } => "repeat",
            RuleNode::Literal(_) => "literal",
            RuleNode::CharClass(_) => "char-class",
            RuleNode::Token(_) => "token",
            RuleNode::Reference { .. } => "reference",
        }
    }
}

/// Character test applied by [`RuleNode::CharClass`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    Alphanumeric,
    Letter,
    /// ASCII `0`–`9`, the same digits the tokenizer starts numbers with.
    Digit,
    /// This exact character (case-folded when the grammar is case-insensitive).
    Exact(char),
    /// The current word has no characters left. Consumes nothing.
    EndOfWord,
}

impl CharClass {
    /// Whether a word-character read satisfies this class.
    pub fn accepts(self, read: WordChar, case_sensitive: bool) -> bool {
        match (self, read) {
            (CharClass::EndOfWord, WordChar::EndOfWord) => true,
            (_, WordChar::EndOfWord | WordChar::NotAWord) | (CharClass::EndOfWord, _) => false,
            (CharClass::Alphanumeric, WordChar::Char(c)) => c.is_alphanumeric(),
            (CharClass::Letter, WordChar::Char(c)) => c.is_alphabetic(),
            (CharClass::Digit, WordChar::Char(c)) => c.is_ascii_digit(),
            (CharClass::Exact(expected), WordChar::Char(c)) => {
                c == expected
                    || (!case_sensitive && c.to_lowercase().eq(expected.to_lowercase()))
            }
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClass::Alphanumeric => f.write_str("alphanumeric"),
            CharClass::Letter => f.write_str("letter"),
            CharClass::Digit => f.write_str("digit"),
            CharClass::Exact(c) => write!(f, "`{c}`"),
            CharClass::EndOfWord => f.write_str("end of word"),
        }
    }
}
