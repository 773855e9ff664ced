//! Grammar construction and matching errors.
//!
//! Two channels, kept apart on purpose:
//!
//! | Situation | Channel |
//! |-----------|---------|
//! | Input does not conform | `Ok(false)` from a match |
//! | Reader failure | `MatchError::Lex` |
//! | Defective grammar found while matching | `MatchError::UnresolvedReference` |
//! | Defective grammar found while building | `GrammarError` |

use tortue_lexer::LexError;

use crate::RuleId;

/// A hard failure while matching. Rejection is never reported this way.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A reference reached the matcher without a target.
    #[error("reference to rule `{name}` was never resolved")]
    UnresolvedReference { name: String },

    /// A rule ID that does not belong to the arena being matched.
    #[error("rule {rule} is not part of this grammar")]
    DanglingRule { rule: RuleId },

    /// A named entry rule that the grammar does not define.
    #[error("grammar `{grammar}` has no rule named `{name}`")]
    UnknownRule { grammar: String, name: String },
}

/// A grammar-authoring defect, reported before any matching happens.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("rule `{name}` is defined more than once")]
    DuplicateRule { name: String },

    #[error("unresolved rule references: {}", names.join(", "))]
    UnresolvedReferences { names: Vec<String> },

    #[error("grammar `{grammar}` has no root rule")]
    MissingRoot { grammar: String },

    #[error("root rule `{name}` is not defined")]
    UnknownRoot { name: String },

    #[error("root {rule} is not part of this grammar")]
    DanglingRoot { rule: RuleId },

    #[error("rule `{name}` is defined as {rule}, which is not part of this grammar")]
    DanglingDefinition { name: String, rule: RuleId },

    #[error("rule {rule} refers to {child}, which is not part of this grammar")]
    DanglingRule { rule: RuleId, child: RuleId },

    #[error("repeat {rule} allows at most {max} but at least {min} repetitions")]
    InvalidRepeatBounds { rule: RuleId, min: u32, max: u32 },

    #[error("literal {rule} is empty")]
    EmptyLiteral { rule: RuleId },

    #[error("token leaf {rule} matches words; use a literal or a character class")]
    WordTokenLeaf { rule: RuleId },

    #[error("rule `{rule}` can reach itself without consuming input")]
    LeftRecursion { rule: String },
}
