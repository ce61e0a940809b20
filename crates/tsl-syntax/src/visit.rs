//! Tree traversal.

use crate::node::{NodeArena, NodeIndex};

/// Pre-order, document-order walk over a subtree, tokens included.
pub struct Preorder<'a> {
    arena: &'a NodeArena,
    stack: Vec<NodeIndex>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let index = self.stack.pop()?;
        self.stack
            .extend(self.arena.children(index).iter().rev().copied());
        Some(index)
    }
}

#[must_use]
pub fn preorder(arena: &NodeArena, root: NodeIndex) -> Preorder<'_> {
    let stack = if arena.get(root).is_some() {
        vec![root]
    } else {
        Vec::new()
    };
    Preorder { arena, stack }
}

/// Tokens of a subtree in document order.
pub fn tokens(arena: &NodeArena, root: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
    preorder(arena, root).filter(move |&i| arena.kind(i).is_some_and(|k| k.is_token()))
}

/// Ancestors of a node, nearest first, excluding the node itself.
pub fn ancestors(arena: &NodeArena, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
    std::iter::successors(arena.parent(index).into_option(), move |&i| {
        arena.parent(i).into_option()
    })
}
