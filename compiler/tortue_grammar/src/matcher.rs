//! Backtracking match over a rule arena.
//!
//! # Contract
//!
//! `match_rule` returns `Ok(true)` with the tokenizer positioned just past
//! what the rule consumed, or `Ok(false)`. Leaves that fail restore the
//! tokenizer themselves (one token or one word character of pushback), so
//! composites never need to save and restore state:
//!
//! - `Sequence` stops at the first failing child. Earlier children keep what
//!   they consumed.
//! - `Choice` tries children in declared order and commits to the first
//!   success. There is no longest-match search.
//! - `Repeat` runs its body until it fails, hits `max`, or succeeds without
//!   consuming anything (every further pass would do the same, so the count
//!   is treated as satisfying `min`).

use tortue_lexer::{words_equal, Reader, TokenKind, Tokenizer};
use tracing::trace;

use crate::stack::ensure_sufficient_stack;
use crate::{CharClass, MatchError, RuleArena, RuleId, RuleNode};

impl RuleArena {
    /// Match the rule `id` against the tokenizer.
    pub fn match_rule<R: Reader>(
        &self,
        id: RuleId,
        tokenizer: &mut Tokenizer<R>,
    ) -> Result<bool, MatchError> {
        ensure_sufficient_stack(|| self.match_node(id, tokenizer))
    }

    fn match_node<R: Reader>(
        &self,
        id: RuleId,
        tokenizer: &mut Tokenizer<R>,
    ) -> Result<bool, MatchError> {
        let Some(node) = self.get(id) else {
            return Err(MatchError::DanglingRule { rule: id });
        };

        let matched = match node {
            RuleNode::Sequence(children) => self.match_sequence(children, tokenizer)?,
            RuleNode::Choice(children) => self.match_choice(children, tokenizer)?,
            RuleNode::Repeat { min, max, body } => {
                self.match_repeat(*min, *max, body, tokenizer)?
            }
            RuleNode::Literal(word) => match_literal(word, tokenizer)?,
            RuleNode::CharClass(class) => match_char_class(*class, tokenizer)?,
            RuleNode::Token(kind) => match_token(*kind, tokenizer)?,
            RuleNode::Reference { name, target } => match target {
                Some(target) => self.match_rule(*target, tokenizer)?,
                None => {
                    return Err(MatchError::UnresolvedReference { name: name.clone() });
                }
            },
        };

        trace!(rule = %id, kind = node.kind_name(), matched, "match");
        Ok(matched)
    }

    fn match_sequence<R: Reader>(
        &self,
        children: &[RuleId],
        tokenizer: &mut Tokenizer<R>,
    ) -> Result<bool, MatchError> {
        for &child in children {
            if !self.match_rule(child, tokenizer)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn match_choice<R: Reader>(
        &self,
        children: &[RuleId],
        tokenizer: &mut Tokenizer<R>,
    ) -> Result<bool, MatchError> {
        for &child in children {
            if self.match_rule(child, tokenizer)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn match_repeat<R: Reader>(
        &self,
        min: u32,
        max: Option<u32>,
        body: &[RuleId],
        tokenizer: &mut Tokenizer<R>,
    ) -> Result<bool, MatchError> {
        let mut count = 0u32;
        while max.is_none_or(|max| count < max) {
            let before = tokenizer.mark();
            if !self.match_sequence(body, tokenizer)? {
                break;
            }
            count += 1;
            if tokenizer.mark() == before {
                count = count.max(min);
                break;
            }
        }
        Ok(count >= min)
    }
}

fn match_literal<R: Reader>(word: &str, tokenizer: &mut Tokenizer<R>) -> Result<bool, MatchError> {
    let case_sensitive = tokenizer.config().case_sensitive;
    let token = tokenizer.next_token()?;
    let matched = !token.is_end_of_stream() && words_equal(&token.text, word, case_sensitive);
    if !matched {
        tokenizer.push_back()?;
    }
    Ok(matched)
}

fn match_char_class<R: Reader>(
    class: CharClass,
    tokenizer: &mut Tokenizer<R>,
) -> Result<bool, MatchError> {
    let case_sensitive = tokenizer.config().case_sensitive;
    let read = tokenizer.next_word_char()?;
    let matched = class.accepts(read, case_sensitive);
    if !matched {
        tokenizer.push_back_word_char()?;
    }
    Ok(matched)
}

fn match_token<R: Reader>(kind: TokenKind, tokenizer: &mut Tokenizer<R>) -> Result<bool, MatchError> {
    let matched = tokenizer.next_token()?.kind == kind;
    if !matched {
        tokenizer.push_back()?;
    }
    Ok(matched)
}
