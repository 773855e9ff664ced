#![allow(clippy::unwrap_used)]

use super::*;
use crate::{GrammarBuilder, RuleNode};
use pretty_assertions::assert_eq;
use tortue_lexer::TokenKind;

/// `BEGIN Number* END`, with a spare `pair` rule the root never uses.
fn blocks() -> Grammar {
    let mut b = GrammarBuilder::new("blocks");
    b.extension(".blk");
    let begin = b.literal("BEGIN");
    let number = b.token(TokenKind::Number);
    let numbers = b.zero_or_more(number);
    let end = b.literal("END");
    let root = b.sequence([begin, numbers, end]);
    b.define("document", root).unwrap();

    let left = b.token(TokenKind::Number);
    let right = b.token(TokenKind::Number);
    let pair = b.sequence([left, right]);
    b.define("pair", pair).unwrap();

    b.root_named("document");
    b.build().unwrap()
}

#[test]
fn accessors_describe_the_grammar() {
    let grammar = blocks();
    assert_eq!(grammar.name(), "blocks");
    assert_eq!(grammar.extensions(), ["blk".to_owned()]);
    assert!(grammar.has_extension(".BLK"));
    assert_eq!(grammar.rule("document"), Some(grammar.root()));
    assert_eq!(grammar.rule_names(), vec!["document", "pair"]);
    assert!(matches!(
        grammar.arena()[grammar.root()],
        RuleNode::Sequence(_)
    ));
}

#[test]
fn begin_end_examples() {
    let grammar = blocks();
    assert!(grammar.matches_str("BEGIN 1 2 3 END").unwrap());
    assert!(grammar.matches_str("BEGIN END").unwrap());

    let mut tokenizer = grammar.tokenizer(StrReader::new("BEGIN 1 2"));
    assert!(!grammar.matches(&mut tokenizer).unwrap());
    assert!(tokenizer.next_token().unwrap().is_end_of_stream());
}

#[test]
fn matches_applies_grammar_configuration() {
    let mut b = GrammarBuilder::new("loose");
    b.config(TokenizerConfig::default().with_case_sensitive(false));
    let root = b.literal("IF");
    b.root(root);
    let grammar = b.build().unwrap();

    // The tokenizer starts case-sensitive; matching switches it over.
    let mut tokenizer = Tokenizer::new(StrReader::new("if"));
    assert!(grammar.matches(&mut tokenizer).unwrap());
    assert!(!tokenizer.config().case_sensitive);
}

#[test]
fn matches_rule_starts_from_named_rule() {
    let grammar = blocks();
    let mut tokenizer = grammar.tokenizer(StrReader::new("4 5"));
    assert!(grammar.matches_rule("pair", &mut tokenizer).unwrap());
}

#[test]
fn matches_rule_rejects_unknown_names() {
    let grammar = blocks();
    let mut tokenizer = grammar.tokenizer(StrReader::new("4 5"));
    let err = grammar.matches_rule("triple", &mut tokenizer).unwrap_err();
    assert!(matches!(
        err,
        MatchError::UnknownRule { ref grammar, ref name } if grammar == "blocks" && name == "triple"
    ));
}

#[test]
fn spare_rules_are_reported_unreachable() {
    assert_eq!(blocks().unreachable_rules(), vec!["pair".to_owned()]);
}

#[test]
fn grammar_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Grammar>();

    let grammar = &blocks();
    let inputs = ["BEGIN 1 END", "BEGIN 2 3 END", "BEGIN 4", "END"];
    let results: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .into_iter()
            .map(|input| scope.spawn(move || grammar.matches_str(input).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results, vec![true, true, false, false]);
}
