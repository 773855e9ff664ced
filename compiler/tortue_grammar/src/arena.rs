//! Flat storage for rule nodes.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{GrammarError, RuleId, RuleNode};

/// Owns every node of one grammar.
///
/// Nodes refer to each other by [`RuleId`], including recursive references,
/// so dropping the arena releases the whole tree at once.
#[derive(Clone, Debug, Default)]
pub struct RuleArena {
    nodes: Vec<RuleNode>,
}

impl RuleArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a node and return its ID.
    pub fn alloc(&mut self, node: RuleNode) -> RuleId {
        let index = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(node);
        RuleId::new(index)
    }

    /// Look up a node. IDs from another arena may be out of range.
    #[inline]
    pub fn get(&self, id: RuleId) -> Option<&RuleNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn contains(&self, id: RuleId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their IDs, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &RuleNode)> {
        (0u32..).zip(&self.nodes).map(|(index, node)| (RuleId::new(index), node))
    }

    /// Bind every [`RuleNode::Reference`] to the rule of that name.
    ///
    /// All missing names are reported together, sorted and deduplicated.
    pub fn resolve(&mut self, names: &FxHashMap<String, RuleId>) -> Result<(), GrammarError> {
        let mut missing = Vec::new();
        let mut bound = 0usize;
        for node in &mut self.nodes {
            if let RuleNode::Reference { name, target } = node {
                match names.get(name.as_str()) {
                    Some(&id) => {
                        *target = Some(id);
                        bound += 1;
                    }
                    None => missing.push(name.clone()),
                }
            }
        }

        if missing.is_empty() {
            debug!(references = bound, "resolved rule references");
            Ok(())
        } else {
            missing.sort();
            missing.dedup();
            Err(GrammarError::UnresolvedReferences { names: missing })
        }
    }
}

impl std::ops::Index<RuleId> for RuleArena {
    type Output = RuleNode;

    #[inline]
    fn index(&self, id: RuleId) -> &RuleNode {
        &self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    fn reference(name: &str) -> RuleNode {
        RuleNode::Reference {
            name: name.to_owned(),
            target: None,
        }
    }

    #[test]
    fn alloc_hands_out_sequential_ids() {
        let mut arena = RuleArena::new();
        let a = arena.alloc(RuleNode::Literal("a".into()));
        let b = arena.alloc(RuleNode::Literal("b".into()));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[b], RuleNode::Literal("b".into()));
        assert!(arena.get(RuleId::new(7)).is_none());
    }

    #[test]
    fn resolve_binds_references() {
        let mut arena = RuleArena::new();
        let lit = arena.alloc(RuleNode::Literal("x".into()));
        let r = arena.alloc(reference("x_rule"));
        let mut names = FxHashMap::default();
        names.insert("x_rule".to_owned(), lit);

        arena.resolve(&names).unwrap();
        assert_eq!(
            arena[r],
            RuleNode::Reference {
                name: "x_rule".into(),
                target: Some(lit)
            }
        );
    }

    #[test]
    fn resolve_reports_every_missing_name_once() {
        let mut arena = RuleArena::new();
        arena.alloc(reference("zeta"));
        arena.alloc(reference("alpha"));
        arena.alloc(reference("zeta"));

        let err = arena.resolve(&FxHashMap::default()).unwrap_err();
        match err {
            GrammarError::UnresolvedReferences { names } => {
                assert_eq!(names, vec!["alpha".to_owned(), "zeta".to_owned()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
