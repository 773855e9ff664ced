#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

/// An arena plus its name map, resolved the same way the builder does it.
struct Fixture {
    arena: RuleArena,
    names: FxHashMap<String, RuleId>,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            arena: RuleArena::new(),
            names: FxHashMap::default(),
        }
    }

    fn node(&mut self, node: RuleNode) -> RuleId {
        self.arena.alloc(node)
    }

    fn literal(&mut self, word: &str) -> RuleId {
        self.node(RuleNode::Literal(word.into()))
    }

    fn reference(&mut self, name: &str) -> RuleId {
        self.node(RuleNode::Reference {
            name: name.into(),
            target: None,
        })
    }

    fn define(&mut self, name: &str, id: RuleId) {
        self.names.insert(name.into(), id);
    }

    fn structure(&self) -> Result<(), GrammarError> {
        check_structure(&self.arena, &self.names)
    }

    fn left_recursion(&mut self) -> Result<(), GrammarError> {
        self.arena.resolve(&self.names).unwrap();
        check_left_recursion(&self.arena, &self.names)
    }
}

// === Structure ===

#[test]
fn well_formed_nodes_pass() {
    let mut f = Fixture::new();
    let a = f.literal("a");
    let n = f.node(RuleNode::Token(TokenKind::Number));
    let rep = f.node(RuleNode::Repeat {
        min: 2,
        max: Some(2),
        body: vec![a, n],
    });
    f.define("root", rep);
    assert_eq!(f.structure(), Ok(()));
}

#[test]
fn repeat_max_below_min_is_rejected() {
    let mut f = Fixture::new();
    let a = f.literal("a");
    let rep = f.node(RuleNode::Repeat {
        min: 3,
        max: Some(1),
        body: vec![a],
    });
    assert_eq!(
        f.structure(),
        Err(GrammarError::InvalidRepeatBounds {
            rule: rep,
            min: 3,
            max: 1
        })
    );
}

#[test]
fn empty_literal_is_rejected() {
    let mut f = Fixture::new();
    let empty = f.literal("");
    assert_eq!(f.structure(), Err(GrammarError::EmptyLiteral { rule: empty }));
}

#[test]
fn word_token_leaf_is_rejected() {
    let mut f = Fixture::new();
    let word = f.node(RuleNode::Token(TokenKind::Word));
    assert_eq!(f.structure(), Err(GrammarError::WordTokenLeaf { rule: word }));
}

#[test]
fn child_outside_the_arena_is_rejected() {
    let mut f = Fixture::new();
    let seq = f.node(RuleNode::Sequence(vec![RuleId::new(40)]));
    assert_eq!(
        f.structure(),
        Err(GrammarError::DanglingRule {
            rule: seq,
            child: RuleId::new(40)
        })
    );
}

#[test]
fn definition_outside_the_arena_is_rejected() {
    let mut f = Fixture::new();
    f.literal("a");
    f.define("ghost", RuleId::new(9));
    assert_eq!(
        f.structure(),
        Err(GrammarError::DanglingDefinition {
            name: "ghost".into(),
            rule: RuleId::new(9)
        })
    );
}

// === Left Recursion ===

#[test]
fn direct_left_recursion_is_named_by_reference() {
    // expr := expr "+" number
    let mut f = Fixture::new();
    let r = f.reference("expr");
    let plus = f.literal("+");
    let n = f.node(RuleNode::Token(TokenKind::Number));
    let expr = f.node(RuleNode::Sequence(vec![r, plus, n]));
    f.define("expr", expr);

    assert_eq!(
        f.left_recursion(),
        Err(GrammarError::LeftRecursion {
            rule: "expr".into()
        })
    );
}

#[test]
fn recursion_behind_nullable_prefix_is_found() {
    // list := optional(",") list
    let mut f = Fixture::new();
    let comma = f.literal(",");
    let opt = f.node(RuleNode::Repeat {
        min: 0,
        max: Some(1),
        body: vec![comma],
    });
    let r = f.reference("list");
    let list = f.node(RuleNode::Sequence(vec![opt, r]));
    f.define("list", list);

    assert!(matches!(
        f.left_recursion(),
        Err(GrammarError::LeftRecursion { .. })
    ));
}

#[test]
fn indirect_recursion_through_choice_is_found() {
    // a := b | "x" ; b := a
    let mut f = Fixture::new();
    let to_b = f.reference("b");
    let x = f.literal("x");
    let a = f.node(RuleNode::Choice(vec![to_b, x]));
    let to_a = f.reference("a");
    f.define("a", a);
    f.define("b", to_a);

    assert!(matches!(
        f.left_recursion(),
        Err(GrammarError::LeftRecursion { .. })
    ));
}

#[test]
fn recursion_after_a_consuming_child_is_fine() {
    // block := "{" zero_or_more(block) "}"
    let mut f = Fixture::new();
    let open = f.literal("{");
    let r = f.reference("block");
    let inner = f.node(RuleNode::Repeat {
        min: 0,
        max: None,
        body: vec![r],
    });
    let close = f.literal("}");
    let block = f.node(RuleNode::Sequence(vec![open, inner, close]));
    f.define("block", block);

    assert_eq!(f.left_recursion(), Ok(()));
}

#[test]
fn end_of_word_does_not_consume() {
    // w := end_of_word w
    let mut f = Fixture::new();
    let eow = f.node(RuleNode::CharClass(CharClass::EndOfWord));
    let r = f.reference("w");
    let w = f.node(RuleNode::Sequence(vec![eow, r]));
    f.define("w", w);

    assert!(matches!(
        f.left_recursion(),
        Err(GrammarError::LeftRecursion { .. })
    ));
}

#[test]
fn letter_consumes() {
    let mut f = Fixture::new();
    let letter = f.node(RuleNode::CharClass(CharClass::Letter));
    let r = f.reference("w");
    let w = f.node(RuleNode::Sequence(vec![letter, r]));
    f.define("w", w);

    assert_eq!(f.left_recursion(), Ok(()));
}

// === Reachability ===

#[test]
fn unreachable_rules_are_listed_sorted() {
    let mut f = Fixture::new();
    let used = f.literal("used");
    let r = f.reference("used");
    let root = f.node(RuleNode::Sequence(vec![r]));
    let orphan_b = f.literal("b");
    let orphan_a = f.literal("a");
    f.define("used", used);
    f.define("root", root);
    f.define("zulu", orphan_b);
    f.define("alpha", orphan_a);
    f.arena.resolve(&f.names).unwrap();

    assert_eq!(
        unreachable_rules(&f.arena, &f.names, root),
        vec!["alpha".to_owned(), "zulu".to_owned()]
    );
}
