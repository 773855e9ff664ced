//! Structural checks run by [`GrammarBuilder::build`](crate::GrammarBuilder::build).
//!
//! Checks run in two passes around reference resolution:
//!
//! 1. [`check_structure`]: IDs in range, sane repeat bounds, non-empty
//!    literals, token leaves that can actually match.
//! 2. [`check_left_recursion`]: no rule can reach itself without consuming
//!    a token or a word character first. Needs resolved references.

use rustc_hash::{FxHashMap, FxHashSet};
use tortue_lexer::TokenKind;

use crate::{CharClass, GrammarError, RuleArena, RuleId, RuleNode};

/// Local defects of individual nodes.
pub(crate) fn check_structure(
    arena: &RuleArena,
    names: &FxHashMap<String, RuleId>,
) -> Result<(), GrammarError> {
    let mut definitions: Vec<_> = names.iter().collect();
    definitions.sort();
    for (name, &rule) in definitions {
        if !arena.contains(rule) {
            return Err(GrammarError::DanglingDefinition {
                name: name.clone(),
                rule,
            });
        }
    }

    for (rule, node) in arena.iter() {
        if let Some(&child) = node.children().iter().find(|&&child| !arena.contains(child)) {
            return Err(GrammarError::DanglingRule { rule, child });
        }

        match node {
            RuleNode::Repeat {
                min,
                max: Some(max),
                ..
            } if max < min => {
                return Err(GrammarError::InvalidRepeatBounds {
                    rule,
                    min: *min,
                    max: *max,
                });
            }
            RuleNode::Literal(word) if word.is_empty() => {
                return Err(GrammarError::EmptyLiteral { rule });
            }
            RuleNode::Token(TokenKind::Word) => {
                return Err(GrammarError::WordTokenLeaf { rule });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Reject grammars where some rule re-enters itself before consuming input.
///
/// Such a rule would recurse until the stack is exhausted on every match,
/// so it is refused up front.
pub(crate) fn check_left_recursion(
    arena: &RuleArena,
    names: &FxHashMap<String, RuleId>,
) -> Result<(), GrammarError> {
    let nullable = nullable_rules(arena);
    let edges: Vec<Vec<RuleId>> = arena
        .iter()
        .map(|(_, node)| left_edges(node, &nullable))
        .collect();

    match find_cycle(&edges) {
        Some(cycle) => Err(GrammarError::LeftRecursion {
            rule: cycle_name(arena, names, &cycle),
        }),
        None => Ok(()),
    }
}

/// Named rules the root can never reach, sorted.
pub(crate) fn unreachable_rules(
    arena: &RuleArena,
    names: &FxHashMap<String, RuleId>,
    root: RuleId,
) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        if !seen.insert(id) {
            continue;
        }
        match arena.get(id) {
            Some(RuleNode::Reference {
                target: Some(target),
                ..
            }) => pending.push(*target),
            Some(node) => pending.extend(node.children().iter().copied()),
            None => {}
        }
    }

    let mut unreachable: Vec<String> = names
        .iter()
        .filter(|(_, id)| !seen.contains(*id))
        .map(|(name, _)| name.clone())
        .collect();
    unreachable.sort();
    unreachable
}

// === Nullability ===

/// Which nodes can succeed without consuming anything, as a fixpoint over
/// the whole arena (references make the graph cyclic).
fn nullable_rules(arena: &RuleArena) -> Vec<bool> {
    let mut nullable = vec![false; arena.len()];
    let mut changed = true;
    while changed {
        changed = false;
        for (id, node) in arena.iter() {
            if !nullable[id.index()] && is_nullable(node, &nullable) {
                nullable[id.index()] = true;
                changed = true;
            }
        }
    }
    nullable
}

fn is_nullable(node: &RuleNode, nullable: &[bool]) -> bool {
    let all = |ids: &[RuleId]| ids.iter().all(|id| nullable[id.index()]);
    match node {
        RuleNode::Sequence(children) => all(children),
        RuleNode::Choice(children) => children.iter().any(|id| nullable[id.index()]),
        RuleNode::Repeat { min, body, .. } => *min == 0 || all(body),
        RuleNode::Literal(_) => false,
        RuleNode::CharClass(class) => *class == CharClass::EndOfWord,
        RuleNode::Token(kind) => *kind == TokenKind::EndOfStream,
        RuleNode::Reference { target, .. } => target.is_some_and(|id| nullable[id.index()]),
    }
}

/// Nodes that may be entered before `node` has consumed anything.
fn left_edges(node: &RuleNode, nullable: &[bool]) -> Vec<RuleId> {
    match node {
        RuleNode::Sequence(children) | RuleNode::Repeat { body: children, .. } => {
            let mut edges = Vec::new();
            for &child in children {
                edges.push(child);
                if !nullable[child.index()] {
                    break;
                }
            }
            edges
        }
        RuleNode::Choice(children) => children.clone(),
        RuleNode::Reference {
            target: Some(target),
            ..
        } => vec![*target],
        RuleNode::Reference { target: None, .. }
        | RuleNode::Literal(_)
        | RuleNode::CharClass(_)
        | RuleNode::Token(_) => Vec::new(),
    }
}

// === Cycle Search ===

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Open,
    Done,
}

/// Iterative depth-first search; returns the nodes of the first cycle found.
fn find_cycle(edges: &[Vec<RuleId>]) -> Option<Vec<RuleId>> {
    let mut state = vec![Visit::New; edges.len()];

    for start in 0..edges.len() {
        if state[start] != Visit::New {
            continue;
        }
        // (node, index of the next edge to follow)
        let mut path: Vec<(usize, usize)> = vec![(start, 0)];
        state[start] = Visit::Open;

        while let Some(top) = path.last_mut() {
            let (node, next) = *top;
            let Some(&child) = edges[node].get(next) else {
                state[node] = Visit::Done;
                path.pop();
                continue;
            };
            top.1 += 1;

            let child = child.index();
            match state[child] {
                Visit::New => {
                    state[child] = Visit::Open;
                    path.push((child, 0));
                }
                Visit::Open => {
                    let from = path.iter().position(|&(id, _)| id == child).unwrap_or(0);
                    return Some(path[from..].iter().map(|&(id, _)| rule_id(id)).collect());
                }
                Visit::Done => {}
            }
        }
    }
    None
}

fn rule_id(index: usize) -> RuleId {
    RuleId::new(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Pick a readable name for a cycle: a reference inside it, then a defined
/// rule inside it, then the first node's ID.
fn cycle_name(arena: &RuleArena, names: &FxHashMap<String, RuleId>, cycle: &[RuleId]) -> String {
    let referenced = cycle.iter().find_map(|&id| match arena.get(id) {
        Some(RuleNode::Reference { name, .. }) => Some(name.clone()),
        _ => None,
    });
    if let Some(name) = referenced {
        return name;
    }

    let mut defined: Vec<&String> = names
        .iter()
        .filter(|(_, id)| cycle.contains(id))
        .map(|(name, _)| name)
        .collect();
    defined.sort();
    match defined.first() {
        Some(name) => (*name).clone(),
        None => cycle.first().map(ToString::to_string).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests;
