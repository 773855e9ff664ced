//! Property tests for rule matching.
//!
//! Inputs are short documents over a tiny vocabulary so that random streams
//! hit both matches and rejections often.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use tortue_grammar::{builtin, Grammar, GrammarBuilder, RuleId};
use tortue_lexer::{StrReader, TokenKind, Tokenizer};

fn vocabulary() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!["a", "b", "c", "1", "22", "ab", "\n"]),
        0..12,
    )
    .prop_map(|words| words.join(" "))
}

fn single(root: impl FnOnce(&mut GrammarBuilder) -> RuleId) -> Grammar {
    let mut b = GrammarBuilder::new("prop");
    let id = root(&mut b);
    b.root(id);
    b.build().expect("grammar builds")
}

/// Match and report the outcome plus every token left in the stream.
fn outcome(grammar: &Grammar, source: &str) -> (bool, Vec<(TokenKind, String)>) {
    let mut tokenizer = Tokenizer::new(StrReader::new(source));
    let matched = grammar.matches(&mut tokenizer).unwrap();
    let mut rest = Vec::new();
    loop {
        let token = tokenizer.next_token().unwrap();
        if token.is_end_of_stream() {
            return (matched, rest);
        }
        rest.push((token.kind, token.text.clone()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Fresh tokenizers over the same input always agree.
    #[test]
    fn matching_is_deterministic(source in vocabulary()) {
        let grammar = builtin::turtle().unwrap();
        let first = grammar.matches_str(&source).unwrap();
        let second = grammar.matches_str(&source).unwrap();
        prop_assert_eq!(first, second);
    }

    /// `Repeat(0, 1, [C])` behaves as `Choice([Sequence([C]), Sequence([])])`.
    #[test]
    fn optional_is_choice_with_empty(source in vocabulary()) {
        let optional = single(|b| {
            let a = b.literal("a");
            let n = b.token(TokenKind::Number);
            b.repeat(0, Some(1), [a, n])
        });
        let choice = single(|b| {
            let a = b.literal("a");
            let n = b.token(TokenKind::Number);
            let some = b.sequence([a, n]);
            let none = b.sequence(Vec::new());
            b.choice([some, none])
        });
        prop_assert_eq!(outcome(&optional, &source), outcome(&choice, &source));
    }

    /// Kleene star never rejects and stops at the first non-matching token.
    #[test]
    fn star_never_fails(source in vocabulary()) {
        let star = single(|b| {
            let a = b.literal("a");
            b.zero_or_more(a)
        });
        let (matched, rest) = outcome(&star, &source);
        prop_assert!(matched);
        prop_assert!(rest.first().is_none_or(|(_, text)| text != "a"));
    }

    /// A failing literal leaves the stream exactly as it found it.
    #[test]
    fn failed_leaf_restores_stream(source in vocabulary()) {
        let never = single(|b| b.literal("zzz"));
        let identity = single(|b| b.sequence(Vec::new()));
        let (matched, rest) = outcome(&never, &source);
        prop_assert!(!matched);
        prop_assert_eq!(rest, outcome(&identity, &source).1);
    }
}
